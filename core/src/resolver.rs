//! The port search.
//!
//! Starting at the base port, every host of the target set is probed one
//! after the other. A port is handed out only once every host accepted it;
//! a single host reporting the port as taken moves the search to the next
//! port, even if the other hosts would have been fine.
//!
//! Probes are awaited strictly in sequence, one socket open at a time.

use portpick_common::error::{ProbeError, ProbeFailure, ResolveError};
use portpick_common::network::host::{HostRequest, HostSet};
use portpick_common::network::port::{self, MAX_PORT};
use tracing::{debug, error, info, trace, warn};

use crate::hosts::HostEnumerator;
use crate::probe::PortProbe;

type ProgressCallback = Box<dyn Fn(u16) + Send + Sync>;

pub struct PortResolver<E, P> {
    enumerator: E,
    probe: P,
    on_progress: Option<ProgressCallback>,
}

impl<E: HostEnumerator, P: PortProbe> PortResolver<E, P> {
    pub fn new(enumerator: E, probe: P) -> Self {
        Self {
            enumerator,
            probe,
            on_progress: None,
        }
    }

    /// Called with each candidate port before it is probed.
    pub fn with_progress(mut self, on_progress: impl Fn(u16) + Send + Sync + 'static) -> Self {
        self.on_progress = Some(Box::new(on_progress));
        self
    }

    /// Returns the lowest port at or above `base` that binds on every host
    /// `request` resolves to.
    pub async fn resolve(&self, base: u32, request: &HostRequest) -> Result<u16, ResolveError> {
        let base: u16 = port::validate(base)?;
        let hosts: HostSet = self.enumerator.resolve_target_hosts(request);
        debug!("Probing {} host(s) from port {base}: {hosts}", hosts.len());

        for candidate in base..=MAX_PORT {
            if let Some(on_progress) = &self.on_progress {
                on_progress(candidate);
            }
            if self.is_free_on_all(candidate, &hosts).await? {
                if candidate != base {
                    warn!("Port {base} is in use, using {candidate} instead");
                }
                info!("Resolved port {candidate}");
                return Ok(candidate);
            }
        }

        Err(ResolveError::Exhausted)
    }

    async fn is_free_on_all(&self, port: u16, hosts: &HostSet) -> Result<bool, ProbeError> {
        for host in hosts {
            let err: ProbeError = match self.probe.probe(port, host).await {
                Ok(_) => {
                    trace!("{host}:{port} is free");
                    continue;
                }
                Err(err) => err,
            };
            match err.failure {
                ProbeFailure::InterfaceUnavailable => {
                    debug!("Skipping {host} for port {port}: {}", err.source);
                }
                ProbeFailure::PortUnavailable => {
                    debug!("Port {port} unavailable on {host}: {}", err.source);
                    return Ok(false);
                }
                ProbeFailure::Fatal => {
                    error!("{err}");
                    return Err(err);
                }
            }
        }
        Ok(true)
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
