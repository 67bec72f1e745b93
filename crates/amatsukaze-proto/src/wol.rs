//! Wake-on-LAN magic packet construction.

use std::fmt;
use std::str::FromStr;

use crate::error::ProtoError;

/// 6 sync bytes + 16 copies of the hardware address.
pub const MAGIC_PACKET_LEN: usize = 6 + 16 * 6;

/// A 6-byte hardware address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacAddress(pub [u8; 6]);

impl MacAddress {
    pub fn octets(&self) -> [u8; 6] {
        self.0
    }
}

/// Accepts `01:23:45:67:89:ab`, `01-23-45-67-89-ab` and `0123.4567.89ab`.
impl FromStr for MacAddress {
    type Err = ProtoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ProtoError::InvalidMac(s.to_string());

        let groups: Vec<&str> = if s.contains('.') {
            let parts: Vec<&str> = s.split('.').collect();
            if parts.len() != 3
                || parts
                    .iter()
                    .any(|p| p.len() != 4 || !p.bytes().all(|b| b.is_ascii_hexdigit()))
            {
                return Err(invalid());
            }
            parts
                .iter()
                .flat_map(|p| [&p[..2], &p[2..]])
                .collect()
        } else {
            let sep = if s.contains('-') { '-' } else { ':' };
            let parts: Vec<&str> = s.split(sep).collect();
            if parts.len() != 6 || parts.iter().any(|p| p.len() != 2) {
                return Err(invalid());
            }
            parts
        };

        let mut octets = [0u8; 6];
        for (slot, group) in octets.iter_mut().zip(&groups) {
            if !group.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(invalid());
            }
            *slot = u8::from_str_radix(group, 16).map_err(|_| invalid())?;
        }
        Ok(MacAddress(octets))
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}

/// Build the 102-byte magic packet for `mac`.
pub fn magic_packet(mac: &MacAddress) -> [u8; MAGIC_PACKET_LEN] {
    let mut packet = [0xFFu8; MAGIC_PACKET_LEN];
    for chunk in packet[6..].chunks_exact_mut(6) {
        chunk.copy_from_slice(&mac.0);
    }
    packet
}
