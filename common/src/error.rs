use std::io;

use thiserror::Error;

use crate::network::host::Host;

/// How a failed bind affects the search.
///
/// Raw OS error codes stop at the probe boundary; everything past it only
/// sees one of these three.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ProbeFailure {
    /// The host cannot be bound on this machine at all (address not
    /// assigned, address family mismatch). The host is skipped.
    InterfaceUnavailable,
    /// Something else holds the port, or the process may not bind it.
    /// The whole port is abandoned.
    PortUnavailable,
    /// Anything else. Aborts the resolution.
    Fatal,
}

impl ProbeFailure {
    /// Maps a bind error onto the resolver's taxonomy.
    ///
    /// `InvalidInput` is what EINVAL decodes to on unix.
    pub fn classify(err: &io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::AddrNotAvailable | io::ErrorKind::InvalidInput => {
                ProbeFailure::InterfaceUnavailable
            }
            io::ErrorKind::AddrInUse | io::ErrorKind::PermissionDenied => {
                ProbeFailure::PortUnavailable
            }
            _ => ProbeFailure::Fatal,
        }
    }
}

/// A bind attempt that did not succeed.
#[derive(Debug, Error)]
#[error("cannot bind {host} on port {port}: {source}")]
pub struct ProbeError {
    pub port: u16,
    pub host: Host,
    pub failure: ProbeFailure,
    #[source]
    pub source: io::Error,
}

impl ProbeError {
    pub fn new(port: u16, host: Host, source: io::Error) -> Self {
        Self {
            port,
            host,
            failure: ProbeFailure::classify(&source),
            source,
        }
    }
}

/// Terminal failure of a port resolution.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Port number must lie between 1024 and 65535")]
    OutOfRange(u32),
    #[error("No available ports found")]
    Exhausted,
    /// An unclassified bind error, surfaced verbatim.
    #[error(transparent)]
    Fatal(io::Error),
}

impl From<ProbeError> for ResolveError {
    fn from(err: ProbeError) -> Self {
        ResolveError::Fatal(err.source)
    }
}

#[derive(Debug, PartialEq, Eq, Error)]
pub enum HostParseError {
    #[error("host must not be blank")]
    Blank,
    #[error("invalid host name {0:?}")]
    InvalidName(String),
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
