use crate::network::host::HostRequest;

/// Port most dev servers start from when nothing is configured.
pub const DEFAULT_PORT: u32 = 5173;

pub struct Config {
    /// First candidate port of the search.
    ///
    /// Kept wider than `u16` so that out of range requests reach the
    /// resolver and fail validation instead of failing to parse.
    pub port: u32,
    /// Which hosts must accept the port before it is handed out.
    pub host: HostRequest,
    /// Hides the progress spinner.
    pub quiet: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            host: HostRequest::Default,
            quiet: false,
        }
    }
}
