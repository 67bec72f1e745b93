use std::time::Duration;

use amatsukaze_proto::MacAddress;

/// Everything a run needs, resolved once from the command line.
#[derive(Clone, Debug)]
pub struct AddJobConfig {
    pub output_path: String,
    /// Input path as the server should see it.
    pub input_path: String,
    pub profile: String,
    /// `host:port` of the server.
    pub server: String,
    pub wake: Option<WakeConfig>,
    pub connect_timeout: Duration,
    pub response_timeout: Option<Duration>,
    pub max_responses: usize,
}

#[derive(Clone, Debug)]
pub struct WakeConfig {
    pub mac: MacAddress,
    pub iface: String,
    /// How long the remote machine gets to boot before we connect.
    pub delay: Duration,
}

/// Map a local input file into a Windows-style folder on the server.
///
/// Only the base name of `input` is kept; `remote_dir` gets a trailing
/// backslash if it lacks one.
pub fn remote_input_path(remote_dir: &str, input: &str) -> String {
    let base = input
        .trim_end_matches(['/', '\\'])
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();

    let mut out = remote_dir.to_string();
    if !out.ends_with('\\') {
        out.push('\\');
    }
    out.push_str(base);
    out
}
