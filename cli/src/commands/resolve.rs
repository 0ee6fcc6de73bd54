use portpick_common::config::Config;
use portpick_core::{PortResolver, SystemHosts, TcpProbe};

use crate::terminal::{print, spinner};

pub async fn resolve(cfg: &Config) -> anyhow::Result<()> {
    print::header("resolving port", cfg.quiet);

    let mut resolver = PortResolver::new(SystemHosts, TcpProbe);
    if !cfg.quiet {
        spinner::start();
        resolver = resolver.with_progress(spinner::report_probe_progress);
    }

    let result = resolver.resolve(cfg.port, &cfg.host).await;
    spinner::get_spinner().finish_and_clear();

    let port: u16 = result?;
    print::result(&port.to_string());
    Ok(())
}
