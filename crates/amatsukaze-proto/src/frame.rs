//! Frame encoding/decoding.
//!
//! Every message on the wire is `cmd: u16 LE`, `len: u32 LE`, then `len`
//! payload bytes. The add-queue request nests a second u32 length inside the
//! payload, so its outer length is always the XML length plus four.

use std::io::{self, Read, Write};

use crate::error::{ProtoError, Result};
use crate::request::AddQueueRequest;

/// Client → server: enqueue an encode job.
pub const ADD_QUEUE_CMD: u16 = 0x0066;

/// Server → client: request handling finished.
pub const FINISH_CMD: u16 = 210;

const CMD_LEN: usize = 2;
const LEN_LEN: usize = 4;

/// One decoded message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub cmd: u16,
    pub payload: Vec<u8>,
}

/// Encode a frame into a single buffer (header + payload).
pub fn encode_frame(cmd: u16, payload: &[u8]) -> Result<Vec<u8>> {
    let len = wire_len(payload.len())?;

    let mut out = Vec::with_capacity(CMD_LEN + LEN_LEN + payload.len());
    out.extend_from_slice(&cmd.to_le_bytes());
    out.extend_from_slice(&len.to_le_bytes());
    out.extend_from_slice(payload);
    Ok(out)
}

/// Write a frame header + payload.
pub fn write_frame(mut w: impl Write, cmd: u16, payload: &[u8]) -> Result<()> {
    let frame = encode_frame(cmd, payload)?;
    w.write_all(&frame)?;
    Ok(())
}

/// Encode an add-queue request:
/// `[0x66, 0x00]`, `outer_len`, `inner_len`, XML bytes.
pub fn encode_add_queue_request(req: &AddQueueRequest) -> Result<Vec<u8>> {
    let xml = req.to_xml();
    let inner_len = wire_len(xml.len())?;

    let mut payload = Vec::with_capacity(LEN_LEN + xml.len());
    payload.extend_from_slice(&inner_len.to_le_bytes());
    payload.extend_from_slice(xml.as_bytes());
    encode_frame(ADD_QUEUE_CMD, &payload)
}

/// Read one complete frame.
///
/// Blocks until the whole frame has arrived. A stream that ends early yields
/// [`ProtoError::Truncated`]; partial frames are never returned. The payload
/// buffer grows as bytes arrive rather than being sized from the header, but
/// no upper bound is placed on the declared length.
pub fn read_frame(mut r: impl Read) -> Result<Frame> {
    let mut cmdb = [0u8; CMD_LEN];
    read_full(&mut r, &mut cmdb, "command code")?;
    let cmd = u16::from_le_bytes(cmdb);

    let mut lenb = [0u8; LEN_LEN];
    read_full(&mut r, &mut lenb, "payload length")?;
    let len = u32::from_le_bytes(lenb) as usize;

    let mut payload = Vec::new();
    (&mut r)
        .take(len as u64)
        .read_to_end(&mut payload)
        .map_err(|e| map_read_err(e, "payload"))?;
    if payload.len() < len {
        return Err(ProtoError::Truncated {
            stage: "payload",
            expected: len,
            received: payload.len(),
        });
    }

    Ok(Frame { cmd, payload })
}

/// Text carried by a response payload, skipping its 4-byte inner length.
///
/// Payloads shorter than the header yield an empty string.
pub fn response_text(payload: &[u8]) -> String {
    payload
        .get(LEN_LEN..)
        .map(|body| String::from_utf8_lossy(body).into_owned())
        .unwrap_or_default()
}

fn wire_len(len: usize) -> Result<u32> {
    len.try_into().map_err(|_| ProtoError::PayloadTooLarge(len))
}

fn read_full<R: Read>(r: &mut R, buf: &mut [u8], stage: &'static str) -> Result<()> {
    let mut off = 0usize;
    while off < buf.len() {
        match r.read(&mut buf[off..]) {
            Ok(0) => {
                return Err(ProtoError::Truncated {
                    stage,
                    expected: buf.len(),
                    received: off,
                });
            }
            Ok(n) => off += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(map_read_err(e, stage)),
        }
    }
    Ok(())
}

fn map_read_err(e: io::Error, stage: &'static str) -> ProtoError {
    match e.kind() {
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => ProtoError::TimedOut { stage },
        _ => ProtoError::Io(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::NullableString;
    use proptest::prelude::*;
    use std::io::Cursor;

    fn sample_request() -> AddQueueRequest {
        AddQueueRequest::new(
            r"D:\encoded",
            "x265",
            r"\\nas\rec\show.ts",
            "0a4c6f8e-3b3d-4f61-9d1f-6a1d2c1f5e77",
        )
    }

    struct TimeoutReader;

    impl Read for TimeoutReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::WouldBlock, "timeout"))
        }
    }

    #[test]
    fn encode_frame_layout() {
        let frame = encode_frame(0x1234, b"abc").unwrap();
        assert_eq!(frame, vec![0x34, 0x12, 3, 0, 0, 0, b'a', b'b', b'c']);
    }

    #[test]
    fn write_frame_roundtrip() {
        let mut buf = Vec::new();
        write_frame(&mut buf, FINISH_CMD, b"done").unwrap();

        let frame = read_frame(Cursor::new(buf)).unwrap();
        assert_eq!(frame.cmd, FINISH_CMD);
        assert_eq!(frame.payload, b"done");
    }

    #[test]
    fn add_queue_request_envelope() {
        let req = sample_request();
        let xml = req.to_xml();
        let bytes = encode_add_queue_request(&req).unwrap();

        assert_eq!(&bytes[..2], &[102, 0]);
        let outer = u32::from_le_bytes(bytes[2..6].try_into().unwrap()) as usize;
        let inner = u32::from_le_bytes(bytes[6..10].try_into().unwrap()) as usize;
        assert_eq!(inner, xml.len());
        assert_eq!(outer, inner + 4);
        assert_eq!(&bytes[10..], xml.as_bytes());
        assert_eq!(bytes.len(), 2 + 4 + outer);
    }

    #[test]
    fn add_queue_request_decodes_as_frame() {
        let req = sample_request();
        let bytes = encode_add_queue_request(&req).unwrap();

        let frame = read_frame(Cursor::new(bytes)).unwrap();
        assert_eq!(frame.cmd, ADD_QUEUE_CMD);
        assert_eq!(response_text(&frame.payload), req.to_xml());
    }

    #[test]
    fn read_frame_sequential() {
        let mut buf = Vec::new();
        write_frame(&mut buf, 1, b"first").unwrap();
        write_frame(&mut buf, 2, b"").unwrap();
        let mut cur = Cursor::new(buf);

        assert_eq!(read_frame(&mut cur).unwrap(), Frame { cmd: 1, payload: b"first".to_vec() });
        assert_eq!(read_frame(&mut cur).unwrap(), Frame { cmd: 2, payload: Vec::new() });
        assert!(matches!(
            read_frame(&mut cur),
            Err(ProtoError::Truncated { stage: "command code", expected: 2, received: 0 })
        ));
    }

    #[test]
    fn read_frame_rejects_short_command() {
        let err = read_frame(Cursor::new(vec![0xD2])).unwrap_err();
        assert!(matches!(
            err,
            ProtoError::Truncated { stage: "command code", expected: 2, received: 1 }
        ));
    }

    #[test]
    fn read_frame_rejects_short_length() {
        let err = read_frame(Cursor::new(vec![0xD2, 0x00, 0x05, 0x00])).unwrap_err();
        assert!(matches!(
            err,
            ProtoError::Truncated { stage: "payload length", expected: 4, received: 2 }
        ));
    }

    #[test]
    fn read_frame_rejects_short_payload() {
        let mut frame = encode_frame(FINISH_CMD, b"0123456789").unwrap();
        frame.truncate(frame.len() - 3);

        let err = read_frame(Cursor::new(frame)).unwrap_err();
        assert!(matches!(
            err,
            ProtoError::Truncated { stage: "payload", expected: 10, received: 7 }
        ));
    }

    #[test]
    fn read_frame_reports_timeout() {
        let err = read_frame(TimeoutReader).unwrap_err();
        assert!(matches!(err, ProtoError::TimedOut { stage: "command code" }));
    }

    #[test]
    fn response_text_skips_inner_length() {
        let mut payload = 5u32.to_le_bytes().to_vec();
        payload.extend_from_slice(b"hello");
        assert_eq!(response_text(&payload), "hello");
    }

    #[test]
    fn response_text_short_payload_is_empty() {
        assert_eq!(response_text(&[]), "");
        assert_eq!(response_text(&[1, 2, 3]), "");
        assert_eq!(response_text(&[1, 2, 3, 4]), "");
    }

    proptest! {
        #[test]
        fn frame_roundtrip(cmd: u16, payload: Vec<u8>) {
            let bytes = encode_frame(cmd, &payload).unwrap();
            let frame = read_frame(Cursor::new(bytes)).unwrap();
            prop_assert_eq!(frame.cmd, cmd);
            prop_assert_eq!(frame.payload, payload);
        }

        #[test]
        fn outer_len_covers_inner_len(dst in "\\PC*", profile in "\\PC*", input in "\\PC*", hash in proptest::option::of("[0-9a-f]{0,32}")) {
            let mut req = AddQueueRequest::new(dst, profile, input, "id");
            req.targets.hash = NullableString::from(hash);
            let bytes = encode_add_queue_request(&req).unwrap();
            let outer = u32::from_le_bytes(bytes[2..6].try_into().unwrap());
            let inner = u32::from_le_bytes(bytes[6..10].try_into().unwrap());
            prop_assert_eq!(outer, inner + 4);
            prop_assert_eq!(inner as usize, req.to_xml().len());
        }
    }
}
