//! Wake-on-LAN sender.
//!
//! The magic packet is broadcast from a specific interface so it leaves on
//! the LAN the server sits on, not whatever the default route picks.

use std::net::{IpAddr, Ipv4Addr, SocketAddr, SocketAddrV4, UdpSocket};

use amatsukaze_proto::{MacAddress, magic_packet};

use crate::error::{AddJobError, Result};

const WOL_TARGET: SocketAddrV4 = SocketAddrV4::new(Ipv4Addr::BROADCAST, 9999);

/// Broadcast a magic packet for `mac` from the IPv4 address of `iface`.
///
/// Success only means the local stack accepted the datagram.
pub fn send_magic_packet(mac: &MacAddress, iface: &str) -> Result<()> {
    let local = interface_ipv4(iface)?;
    tracing::info!(iface, %local, "local addr for wake packet");

    send_packet_from(local, SocketAddr::V4(WOL_TARGET), &magic_packet(mac))?;
    tracing::info!(%mac, target = %WOL_TARGET, "wake packet sent");
    Ok(())
}

/// First IPv4 address bound to the named interface.
pub fn interface_ipv4(iface: &str) -> Result<Ipv4Addr> {
    let addrs = if_addrs::get_if_addrs().map_err(AddJobError::InterfaceEnumeration)?;
    pick_ipv4(addrs.iter().map(|a| (a.name.as_str(), a.ip())), iface)
}

fn pick_ipv4<'a>(
    addrs: impl IntoIterator<Item = (&'a str, IpAddr)>,
    iface: &str,
) -> Result<Ipv4Addr> {
    let mut found = false;
    for (name, ip) in addrs {
        if name != iface {
            continue;
        }
        found = true;
        if let IpAddr::V4(v4) = ip {
            return Ok(v4);
        }
    }

    if found {
        Err(AddJobError::NoIpv4Address {
            iface: iface.to_string(),
        })
    } else {
        Err(AddJobError::InterfaceNotFound {
            iface: iface.to_string(),
        })
    }
}

fn send_packet_from(local: Ipv4Addr, target: SocketAddr, packet: &[u8]) -> Result<()> {
    let send_err = |source| AddJobError::WakePacketSend { local, source };

    let socket = UdpSocket::bind((local, 0)).map_err(send_err)?;
    socket.set_broadcast(true).map_err(send_err)?;
    let sent = socket.send_to(packet, target).map_err(send_err)?;
    tracing::debug!(bytes = sent, %target, "udp datagram written");
    Ok(())
}
