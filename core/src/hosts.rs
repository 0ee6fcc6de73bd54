use std::net::IpAddr;

use pnet::datalink::{self, NetworkInterface};
use portpick_common::network::host::{Host, HostRequest, HostSet};
use portpick_common::network::interface;
use tracing::debug;

/// Source of the hosts a port has to be free on.
pub trait HostEnumerator: Send + Sync {
    /// Every address assigned to a local interface, plus the unspecified
    /// and wildcard sentinels. Never fails.
    fn list_local_hosts(&self) -> HostSet;

    /// Narrows the local set to what `request` asks for.
    ///
    /// A request naming one of the local hosts expands to all of them, since
    /// whatever binds there shares ports with every other local address. A
    /// request for a host that is not local is probed on its own.
    fn resolve_target_hosts(&self, request: &HostRequest) -> HostSet {
        match request {
            HostRequest::Default => self.list_local_hosts(),
            HostRequest::All => HostSet::singleton(Host::WILDCARD),
            HostRequest::Specific(host) => {
                let local = self.list_local_hosts();
                if local.contains(host) {
                    local
                } else {
                    debug!("{host} is not a local address, probing it alone");
                    HostSet::singleton(host.clone())
                }
            }
        }
    }
}

/// Reads the live interface table of this machine.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemHosts;

impl HostEnumerator for SystemHosts {
    fn list_local_hosts(&self) -> HostSet {
        let interfaces: Vec<NetworkInterface> = datalink::interfaces();
        debug!("Identified {} network interface(s)", interfaces.len());
        StaticHosts::from_interfaces(&interfaces).list_local_hosts()
    }
}

/// A fixed list of interface addresses.
#[derive(Debug, Clone, Default)]
pub struct StaticHosts {
    addrs: Vec<IpAddr>,
}

impl StaticHosts {
    pub fn new(addrs: Vec<IpAddr>) -> Self {
        Self { addrs }
    }

    pub fn from_interfaces(interfaces: &[NetworkInterface]) -> Self {
        Self::new(interface::collect_addresses(interfaces))
    }
}

impl HostEnumerator for StaticHosts {
    fn list_local_hosts(&self) -> HostSet {
        let mut hosts = HostSet::with_sentinels();
        hosts.extend(self.addrs.iter().copied().map(Host::Addr));
        hosts
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
