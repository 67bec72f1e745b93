//! One TCP conversation with the server: connect, send the request, read
//! responses until the finish code.

use std::io::{self, Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use amatsukaze_proto::{
    AddQueueRequest, FINISH_CMD, ProtoError, encode_add_queue_request, read_frame, response_text,
};

use crate::error::{AddJobError, Result};

/// Resolve `addr` and connect to the first address that answers in time.
pub fn connect(addr: &str, timeout: Duration) -> Result<TcpStream> {
    let conn_err = |source| AddJobError::Connection {
        addr: addr.to_string(),
        source,
    };

    let mut last_err = None;
    for sock_addr in addr.to_socket_addrs().map_err(conn_err)? {
        match TcpStream::connect_timeout(&sock_addr, timeout) {
            Ok(stream) => {
                tracing::info!(server = %sock_addr, "connected");
                return Ok(stream);
            }
            Err(e) => {
                tracing::debug!(server = %sock_addr, error = %e, "connect attempt failed");
                last_err = Some(e);
            }
        }
    }

    Err(conn_err(last_err.unwrap_or_else(|| {
        io::Error::new(io::ErrorKind::AddrNotAvailable, "address resolved to nothing")
    })))
}

/// Encode and write the add-queue request.
pub fn submit(mut w: impl Write, req: &AddQueueRequest) -> Result<()> {
    let bytes = encode_add_queue_request(req).map_err(AddJobError::Encode)?;
    w.write_all(&bytes).map_err(AddJobError::Write)?;
    w.flush().map_err(AddJobError::Write)?;
    tracing::debug!(bytes = bytes.len(), "add request sent");
    Ok(())
}

/// Read and log responses until [`FINISH_CMD`] arrives.
///
/// Returns the number of responses read, the finish message included. Fails
/// with [`AddJobError::ResponseLimit`] if `max_responses` messages go by
/// without it.
pub fn await_finish(mut r: impl Read, max_responses: usize) -> Result<usize> {
    for received in 0..max_responses {
        let frame = read_frame(&mut r).map_err(|e| read_error(e, received))?;
        tracing::info!(cmd = frame.cmd, "{}", response_text(&frame.payload));
        if frame.cmd == FINISH_CMD {
            return Ok(received + 1);
        }
    }

    Err(AddJobError::ResponseLimit {
        limit: max_responses,
    })
}

fn read_error(e: ProtoError, received: usize) -> AddJobError {
    match e {
        ProtoError::Truncated { .. } => AddJobError::TruncatedStream(e),
        ProtoError::TimedOut { .. } => AddJobError::ResponseTimeout { received },
        other => AddJobError::ResponseRead(other),
    }
}
