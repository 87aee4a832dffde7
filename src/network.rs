// src/network.rs
// Network utilities for port checking and LAN address detection

use local_ip_address::list_afinet_netifas;
use port_check::is_port_reachable;
use std::net::{IpAddr, Ipv4Addr};

pub struct NetworkUtils;

impl NetworkUtils {
    /// Check if a port is available on the given host
    pub fn is_port_available(host: &str, port: u16) -> bool {
        // A reachable port already has a listener behind it
        !is_port_reachable(format!("{}:{}", host, port))
    }

    /// First non-loopback IPv4 address, in the order given.
    pub fn first_lan_ipv4<I>(addrs: I) -> Option<Ipv4Addr>
    where
        I: IntoIterator<Item = IpAddr>,
    {
        addrs.into_iter().find_map(|addr| match addr {
            IpAddr::V4(v4) if !v4.is_loopback() => Some(v4),
            _ => None,
        })
    }

    /// Address other machines on the LAN can likely reach, or `localhost`.
    pub fn lan_address() -> String {
        match list_afinet_netifas() {
            Ok(interfaces) => Self::first_lan_ipv4(interfaces.into_iter().map(|(_, ip)| ip))
                .map(|ip| ip.to_string())
                .unwrap_or_else(|| "localhost".to_string()),
            Err(e) => {
                log::debug!("Could not list network interfaces: {}", e);
                "localhost".to_string()
            }
        }
    }

    pub fn server_url(port: u16) -> String {
        format!("http://{}:{}", Self::lan_address(), port)
    }
}
