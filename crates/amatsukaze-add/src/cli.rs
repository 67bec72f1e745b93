use std::time::Duration;

use amatsukaze_proto::MacAddress;
use clap::Parser;
use clap::builder::RangedU64ValueParser;

use crate::config::{AddJobConfig, WakeConfig, remote_input_path};

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_SHA"),
    ", ",
    env!("BUILD_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "amatsukaze-add", version = VERSION)]
pub struct Args {
    /// Path to save the encoded output to
    #[arg(short = 'e', long = "encode")]
    pub encode_path: String,

    /// Path to the input file
    #[arg(short, long)]
    pub input: String,

    /// Folder of the input file as seen by the server, e.g. \\nas\rec
    #[arg(short, long)]
    pub remote: Option<String>,

    /// Amatsukaze server address
    #[arg(short, long, default_value = "127.0.0.1:32768")]
    pub connect: String,

    /// Encoding profile name on the server
    #[arg(short, long)]
    pub profile: String,

    /// Wake-on-LAN target MAC address
    #[arg(short = 'w', long = "wol", requires = "wol_iface")]
    pub wol_mac: Option<MacAddress>,

    /// Local interface to send the wake packet from
    #[arg(short = 'I', long = "wol-iface", requires = "wol_mac")]
    pub wol_iface: Option<String>,

    /// Seconds to wait for the server to boot after the wake packet
    #[arg(long = "wol-delay", default_value_t = 10)]
    pub wol_delay_secs: u64,

    /// Connect timeout in seconds
    #[arg(
        long = "connect-timeout",
        default_value_t = 5,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub connect_timeout_secs: u64,

    /// Give up if no response arrives for this many seconds
    #[arg(long = "response-timeout", value_parser = clap::value_parser!(u64).range(1..))]
    pub response_timeout_secs: Option<u64>,

    /// Maximum number of responses to read before giving up
    #[arg(
        long,
        default_value_t = 10_000,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub max_responses: usize,
}

impl Args {
    pub fn into_config(self) -> AddJobConfig {
        let input_path = match &self.remote {
            Some(remote) => remote_input_path(remote, &self.input),
            None => self.input,
        };
        let wake = match (self.wol_mac, self.wol_iface) {
            (Some(mac), Some(iface)) => Some(WakeConfig {
                mac,
                iface,
                delay: Duration::from_secs(self.wol_delay_secs),
            }),
            _ => None,
        };

        AddJobConfig {
            output_path: self.encode_path,
            input_path,
            profile: self.profile,
            server: self.connect,
            wake,
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            response_timeout: self.response_timeout_secs.map(Duration::from_secs),
            max_responses: self.max_responses,
        }
    }
}
