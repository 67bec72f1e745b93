//! Runs one add-job: optional wake, connect, submit, wait for finish.

use amatsukaze_proto::AddQueueRequest;

use crate::config::{AddJobConfig, WakeConfig};
use crate::error::{AddJobError, Result};
use crate::{client, wake};

/// Submit the encode job described by `config`.
///
/// Returns the number of responses read before the finish code.
pub fn run(config: &AddJobConfig) -> Result<usize> {
    run_with_waker(config, |w| wake::send_magic_packet(&w.mac, &w.iface))
}

/// [`run`] with the wake packet sender supplied by the caller.
///
/// `waker` is called once, before the boot delay and the connect, and only
/// when `config.wake` is set.
pub fn run_with_waker<F>(config: &AddJobConfig, waker: F) -> Result<usize>
where
    F: FnOnce(&WakeConfig) -> Result<()>,
{
    if let Some(wake_cfg) = &config.wake {
        waker(wake_cfg)?;
        tracing::info!(delay_secs = wake_cfg.delay.as_secs(), "waiting for server to wake");
        std::thread::sleep(wake_cfg.delay);
    }

    let request =
        AddQueueRequest::with_random_id(&config.output_path, &config.profile, &config.input_path);
    tracing::info!(
        request_id = %request.request_id,
        input = %config.input_path,
        output = %config.output_path,
        profile = %config.profile,
        "submitting encode job"
    );
    tracing::debug!(xml = %request.to_xml(), "add request body");

    let mut stream = client::connect(&config.server, config.connect_timeout)?;
    stream
        .set_read_timeout(config.response_timeout)
        .map_err(|source| AddJobError::Connection {
            addr: config.server.clone(),
            source,
        })?;

    client::submit(&mut stream, &request)?;
    client::await_finish(&mut stream, config.max_responses)
}
