//! Shared domain types for `portpick`.
//!
//! Nothing in here touches a socket. Hosts, host sets, port bounds and the
//! error taxonomy live here so that both the resolver and the command line
//! front end speak the same language.

pub mod config;
pub mod error;
pub mod network;
