//! Finds a TCP port that is free on every host a dev server will bind.
//!
//! The search is split into two leaves and one orchestrator:
//!
//! * [`hosts`]: which addresses must accept the port ([`HostEnumerator`]).
//! * [`probe`]: whether a single `(port, host)` pair binds ([`PortProbe`]).
//! * [`resolver`]: walks ports upwards from the base port and applies the
//!   error policy ([`PortResolver`]).
//!
//! Both leaves are traits so that tests can replace the machine's interface
//! table and socket layer with fixed data.

use portpick_common::error::ResolveError;
use portpick_common::network::host::HostRequest;

pub mod hosts;
pub mod probe;
pub mod resolver;

pub use hosts::{HostEnumerator, StaticHosts, SystemHosts};
pub use probe::{PortProbe, TcpProbe};
pub use resolver::PortResolver;

/// Resolves `base` against this machine's interfaces using real binds.
pub async fn resolve_port(base: u32, request: &HostRequest) -> Result<u16, ResolveError> {
    PortResolver::new(SystemHosts, TcpProbe)
        .resolve(base, request)
        .await
}
