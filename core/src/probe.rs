use std::io;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

use async_trait::async_trait;
use portpick_common::error::{ProbeError, ProbeFailure};
use portpick_common::network::host::Host;
use tokio::net::{TcpListener, ToSocketAddrs};
use tracing::trace;

/// Tests whether a single `(port, host)` pair can be bound right now.
#[async_trait]
pub trait PortProbe: Send + Sync {
    /// Returns the port that was bound, which only differs from `port` when
    /// `port` is 0. The socket is released before this returns.
    async fn probe(&self, port: u16, host: &Host) -> Result<u16, ProbeError>;
}

/// Probes with a real listening socket.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpProbe;

#[async_trait]
impl PortProbe for TcpProbe {
    async fn probe(&self, port: u16, host: &Host) -> Result<u16, ProbeError> {
        let bound: io::Result<u16> = match host {
            Host::Unspecified => bind_unspecified(port).await,
            Host::Addr(ip) => bind_and_release(SocketAddr::new(*ip, port)).await,
            Host::Name(name) => bind_and_release((name.as_str(), port)).await,
        };
        bound.map_err(|source| ProbeError::new(port, host.clone(), source))
    }
}

/// Binds `[::]` the way a server without a configured host would, falling
/// back to `0.0.0.0` on machines without an IPv6 stack.
async fn bind_unspecified(port: u16) -> io::Result<u16> {
    let v6 = SocketAddr::new(IpAddr::V6(Ipv6Addr::UNSPECIFIED), port);
    match bind_and_release(v6).await {
        Ok(bound) => Ok(bound),
        Err(err) if ProbeFailure::classify(&err) == ProbeFailure::PortUnavailable => Err(err),
        Err(err) => {
            trace!("IPv6 wildcard unusable ({err}), retrying on IPv4");
            bind_and_release(SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), port)).await
        }
    }
}

async fn bind_and_release<A: ToSocketAddrs>(addr: A) -> io::Result<u16> {
    let listener: TcpListener = TcpListener::bind(addr).await?;
    let port: u16 = listener.local_addr()?.port();
    // Closing is synchronous; the port is free again once this returns.
    drop(listener);
    Ok(port)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    fn loopback() -> Host {
        Host::Addr(IpAddr::V4(Ipv4Addr::LOCALHOST))
    }

    #[tokio::test]
    async fn probe_port_zero_reports_assigned_port() {
        let port = TcpProbe.probe(0, &loopback()).await.unwrap();
        assert_ne!(port, 0);
    }

    #[tokio::test]
    async fn probe_releases_socket() {
        let port = TcpProbe.probe(0, &loopback()).await.unwrap();
        // Free ports keep probing free; nothing is left bound in between.
        assert_eq!(TcpProbe.probe(port, &loopback()).await.unwrap(), port);
        assert_eq!(TcpProbe.probe(port, &loopback()).await.unwrap(), port);
        let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, port)).await;
        assert!(listener.is_ok(), "probe left port {port} bound");
    }

    #[tokio::test]
    async fn probe_occupied_port_is_port_unavailable() {
        let occupant = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await.unwrap();
        let port = occupant.local_addr().unwrap().port();

        for _ in 0..2 {
            let err = TcpProbe.probe(port, &loopback()).await.unwrap_err();
            assert_eq!(err.failure, ProbeFailure::PortUnavailable);
            assert_eq!(err.port, port);
            assert_eq!(err.host, loopback());
        }
    }

    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn probe_wildcard_sees_loopback_listener() {
        let occupant = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await.unwrap();
        let port = occupant.local_addr().unwrap().port();

        let err = TcpProbe.probe(port, &Host::WILDCARD).await.unwrap_err();
        assert_eq!(err.failure, ProbeFailure::PortUnavailable);
    }

    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn probe_foreign_address_is_interface_unavailable() {
        // TEST-NET-3, never assigned to a local interface.
        let foreign = Host::Addr(IpAddr::V4(Ipv4Addr::new(203, 0, 113, 9)));
        let err = TcpProbe.probe(0, &foreign).await.unwrap_err();
        assert_eq!(err.failure, ProbeFailure::InterfaceUnavailable);
    }

    #[tokio::test]
    async fn probe_unspecified_host() {
        let port = TcpProbe.probe(0, &Host::Unspecified).await.unwrap();
        assert_ne!(port, 0);
    }

    #[tokio::test]
    async fn probe_named_host() {
        let port = TcpProbe
            .probe(0, &Host::Name("localhost".to_string()))
            .await
            .unwrap();
        assert_ne!(port, 0);
    }
}
