//! Failure modes of a single add-job run. Every one of them is fatal.

use std::io;

use amatsukaze_proto::ProtoError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AddJobError {
    #[error("network interface {iface:?} not found")]
    InterfaceNotFound { iface: String },

    #[error("network interface {iface:?} has no IPv4 address")]
    NoIpv4Address { iface: String },

    #[error("enumerate network interfaces")]
    InterfaceEnumeration(#[source] io::Error),

    #[error("send wake packet from {local}")]
    WakePacketSend {
        local: std::net::Ipv4Addr,
        #[source]
        source: io::Error,
    },

    #[error("connect to amatsukaze server {addr}")]
    Connection {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("encode add request")]
    Encode(#[source] ProtoError),

    #[error("send add request")]
    Write(#[source] io::Error),

    #[error("response stream ended early")]
    TruncatedStream(#[source] ProtoError),

    #[error("read response")]
    ResponseRead(#[source] ProtoError),

    #[error("timed out waiting for response after {received} messages")]
    ResponseTimeout { received: usize },

    #[error("no finish response within {limit} messages")]
    ResponseLimit { limit: usize },
}

pub type Result<T> = std::result::Result<T, AddJobError>;
