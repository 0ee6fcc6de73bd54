#![cfg(test)]
use std::net::{IpAddr, Ipv4Addr};

use portpick_common::error::{ProbeFailure, ResolveError};
use portpick_common::network::host::{Host, HostRequest, HostSet};
use portpick_core::{HostEnumerator, PortProbe, PortResolver, SystemHosts, TcpProbe, resolve_port};
use tokio::net::TcpListener;

/// A base port high enough to stay clear of anything a developer runs.
fn random_base() -> u32 {
    rand::random_range(20_000..60_000)
}

/// Hosts of this machine that can actually be bound right now.
async fn bindable_hosts(port: u16) -> Vec<Host> {
    let mut hosts = Vec::new();
    for host in SystemHosts.list_local_hosts() {
        match TcpProbe.probe(port, &host).await {
            Ok(_) => hosts.push(host),
            Err(err) if err.failure == ProbeFailure::InterfaceUnavailable => {}
            Err(err) => panic!("{err}"),
        }
    }
    hosts
}

#[tokio::test]
async fn free_port_resolves_to_itself() -> anyhow::Result<()> {
    let port: u16 = resolve_port(random_base(), &HostRequest::Default).await?;
    let again: u16 = resolve_port(port as u32, &HostRequest::Default).await?;
    assert_eq!(port, again);
    Ok(())
}

#[tokio::test]
async fn resolved_port_binds_on_every_local_host() -> anyhow::Result<()> {
    let port: u16 = resolve_port(random_base(), &HostRequest::Default).await?;
    let hosts = bindable_hosts(port).await;
    assert!(!hosts.is_empty(), "not even the wildcard could bind {port}");
    Ok(())
}

#[tokio::test]
async fn port_held_on_loopback_is_skipped() -> anyhow::Result<()> {
    let base: u16 = resolve_port(random_base(), &HostRequest::Default).await?;
    let occupant = TcpListener::bind((Ipv4Addr::LOCALHOST, base)).await?;

    let port: u16 = resolve_port(base as u32, &HostRequest::Default).await?;
    assert!(port > base, "expected a port above {base}, got {port}");

    drop(occupant);
    Ok(())
}

#[tokio::test]
async fn port_held_on_wildcard_is_skipped() -> anyhow::Result<()> {
    let base: u16 = resolve_port(random_base(), &HostRequest::Default).await?;
    let occupant = TcpListener::bind((Ipv4Addr::UNSPECIFIED, base)).await?;

    let port: u16 = resolve_port(base as u32, &HostRequest::All).await?;
    assert!(port > base);

    drop(occupant);
    Ok(())
}

#[tokio::test]
async fn progress_starts_at_base() -> anyhow::Result<()> {
    let base: u32 = random_base();
    let first = std::sync::Arc::new(std::sync::Mutex::new(None));
    let first_ref = first.clone();
    let resolver = PortResolver::new(SystemHosts, TcpProbe).with_progress(move |port| {
        first_ref.lock().unwrap().get_or_insert(port);
    });

    resolver.resolve(base, &HostRequest::Default).await?;
    assert_eq!(*first.lock().unwrap(), Some(base as u16));
    Ok(())
}

#[tokio::test]
async fn privileged_port_is_rejected() {
    let err: ResolveError = resolve_port(80, &HostRequest::Default).await.unwrap_err();
    assert_eq!(err.to_string(), "Port number must lie between 1024 and 65535");
}

#[tokio::test]
async fn overflowing_port_is_rejected() {
    let err: ResolveError = resolve_port(65_536, &HostRequest::All).await.unwrap_err();
    assert_eq!(err.to_string(), "Port number must lie between 1024 and 65535");
}

#[test]
fn system_hosts_carry_sentinels_and_loopback() {
    let hosts: HostSet = SystemHosts.list_local_hosts();
    assert!(hosts.contains(&Host::Unspecified));
    assert!(hosts.contains(&Host::WILDCARD));
    assert!(hosts.contains(&Host::Addr(IpAddr::V4(Ipv4Addr::LOCALHOST))));
}

#[test]
fn external_host_is_targeted_alone() {
    let external = Host::Addr(IpAddr::V4(Ipv4Addr::new(203, 0, 113, 9)));
    let hosts: HostSet = SystemHosts.resolve_target_hosts(&HostRequest::Specific(external.clone()));
    assert_eq!(hosts, HostSet::singleton(external));
}

#[test]
fn loopback_request_targets_every_local_host() {
    let loopback = Host::Addr(IpAddr::V4(Ipv4Addr::LOCALHOST));
    let hosts: HostSet = SystemHosts.resolve_target_hosts(&HostRequest::Specific(loopback));
    assert_eq!(hosts, SystemHosts.list_local_hosts());
}

/// A host that cannot be bound here is skipped, so the base port comes back.
#[cfg(target_os = "linux")]
#[tokio::test]
async fn unbindable_external_host_is_skipped() -> anyhow::Result<()> {
    let base: u32 = random_base();
    let external = Host::Addr(IpAddr::V4(Ipv4Addr::new(203, 0, 113, 9)));
    let port: u16 = resolve_port(base, &HostRequest::Specific(external)).await?;
    assert_eq!(port as u32, base);
    Ok(())
}
