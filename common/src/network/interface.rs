use std::net::IpAddr;

use pnet::datalink::NetworkInterface;
use pnet::ipnetwork::IpNetwork;

pub trait NetworkInterfaceExtension {
    /// Every address assigned to the interface, without prefix lengths.
    fn get_ip_addrs(&self) -> Vec<IpAddr>;
}

impl NetworkInterfaceExtension for NetworkInterface {
    fn get_ip_addrs(&self) -> Vec<IpAddr> {
        self.ips.iter().map(IpNetwork::ip).collect()
    }
}

/// Flattens the addresses of all interfaces, in enumeration order, without
/// duplicates. Interfaces that are down still count: their addresses are
/// assigned and a server may bind them.
pub fn collect_addresses(interfaces: &[NetworkInterface]) -> Vec<IpAddr> {
    let mut addrs: Vec<IpAddr> = Vec::new();
    for ip in interfaces.iter().flat_map(|iface| iface.get_ip_addrs()) {
        if !addrs.contains(&ip) {
            addrs.push(ip);
        }
    }
    addrs
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
