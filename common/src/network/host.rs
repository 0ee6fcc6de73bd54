use std::fmt;
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;

use crate::error::HostParseError;

/// Something a probe socket can be bound to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Host {
    /// No host given. Binds wherever the OS binds by default.
    Unspecified,
    Addr(IpAddr),
    /// A hostname, resolved by the OS at bind time.
    Name(String),
}

impl Host {
    /// `0.0.0.0`, every IPv4 interface at once.
    pub const WILDCARD: Host = Host::Addr(IpAddr::V4(Ipv4Addr::UNSPECIFIED));

    pub fn is_wildcard(&self) -> bool {
        *self == Host::WILDCARD
    }
}

impl From<IpAddr> for Host {
    fn from(ip: IpAddr) -> Self {
        Host::Addr(ip)
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Host::Unspecified => write!(f, "*"),
            Host::Addr(ip) => write!(f, "{ip}"),
            Host::Name(name) => write!(f, "{name}"),
        }
    }
}

impl FromStr for Host {
    type Err = HostParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(HostParseError::Blank);
        }
        if s == "*" {
            return Ok(Host::Unspecified);
        }
        // Bracketed IPv6 as it appears in URLs.
        let literal = s
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .unwrap_or(s);
        if let Ok(ip) = literal.parse::<IpAddr>() {
            return Ok(Host::Addr(ip));
        }
        let valid_name = s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.' || c == '_');
        if !valid_name {
            return Err(HostParseError::InvalidName(s.to_string()));
        }
        Ok(Host::Name(s.to_string()))
    }
}

/// What the caller asked for, before it is turned into a [`HostSet`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HostRequest {
    /// Nothing configured.
    #[default]
    Default,
    /// The "listen on all addresses" flag.
    All,
    Specific(Host),
}

impl FromStr for HostRequest {
    type Err = HostParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" => Ok(HostRequest::Default),
            "true" => Ok(HostRequest::All),
            other => other.parse().map(HostRequest::Specific),
        }
    }
}

/// Deduplicated set of bind targets.
///
/// Iteration follows insertion order so that probes run in a stable order;
/// equality ignores it.
#[derive(Debug, Clone, Default)]
pub struct HostSet {
    hosts: Vec<Host>,
}

impl HostSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The "unspecified" and wildcard sentinels, which every local set carries.
    pub fn with_sentinels() -> Self {
        Self {
            hosts: vec![Host::Unspecified, Host::WILDCARD],
        }
    }

    pub fn singleton(host: Host) -> Self {
        Self { hosts: vec![host] }
    }

    /// Returns `false` if the host was already present.
    pub fn insert(&mut self, host: Host) -> bool {
        if self.contains(&host) {
            return false;
        }
        self.hosts.push(host);
        true
    }

    pub fn contains(&self, host: &Host) -> bool {
        self.hosts.contains(host)
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Host> {
        self.hosts.iter()
    }
}

impl PartialEq for HostSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|host| other.contains(host))
    }
}

impl Eq for HostSet {}

impl FromIterator<Host> for HostSet {
    fn from_iter<I: IntoIterator<Item = Host>>(iter: I) -> Self {
        let mut set = HostSet::new();
        set.extend(iter);
        set
    }
}

impl Extend<Host> for HostSet {
    fn extend<I: IntoIterator<Item = Host>>(&mut self, iter: I) {
        for host in iter {
            self.insert(host);
        }
    }
}

impl IntoIterator for HostSet {
    type Item = Host;
    type IntoIter = std::vec::IntoIter<Host>;

    fn into_iter(self) -> Self::IntoIter {
        self.hosts.into_iter()
    }
}

impl<'a> IntoIterator for &'a HostSet {
    type Item = &'a Host;
    type IntoIter = std::slice::Iter<'a, Host>;

    fn into_iter(self) -> Self::IntoIter {
        self.hosts.iter()
    }
}

impl fmt::Display for HostSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, host) in self.hosts.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{host}")?;
        }
        Ok(())
    }
}
