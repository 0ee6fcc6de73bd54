//! Bounds of the port search.

use crate::error::ResolveError;

/// Lowest non-privileged port.
pub const MIN_PORT: u16 = 1024;
pub const MAX_PORT: u16 = u16::MAX;

/// Narrows a requested base port to `u16`, rejecting privileged and
/// overflowing values.
pub fn validate(port: u32) -> Result<u16, ResolveError> {
    match u16::try_from(port) {
        Ok(p) if p >= MIN_PORT => Ok(p),
        _ => Err(ResolveError::OutOfRange(port)),
    }
}
