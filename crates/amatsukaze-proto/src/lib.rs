//! Protocol primitives for talking to an Amatsukaze encoding server.
//!
//! Frame format (both directions, no connection prelude):
//! - cmd: u16 LE
//! - len: u32 LE
//! - payload: [u8; len]
//!
//! Requests carry an XML data-contract document in the payload, itself
//! prefixed by a u32 LE length. Responses use the same nesting.
//!
//! This crate owns no sockets: callers hand in `Read`/`Write` impls.

pub mod error;
pub mod frame;
pub mod request;
pub mod wol;

pub use error::{ProtoError, Result};
pub use frame::{
    ADD_QUEUE_CMD, FINISH_CMD, Frame, encode_add_queue_request, encode_frame, read_frame,
    response_text, write_frame,
};
pub use request::{AddQueueItem, AddQueueRequest, NullableString, OutputInfo};
pub use wol::{MAGIC_PACKET_LEN, MacAddress, magic_packet};
