mod commands;
mod terminal;

use commands::{CommandLine, Commands, hosts, resolve};
use portpick_common::config::Config;
use terminal::{logging, spinner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    spinner::init(commands.quiet);
    logging::init_logging(commands.verbose, commands.quiet);

    match commands.command {
        Commands::Resolve { port, host } => {
            let cfg = Config {
                port,
                host: host.unwrap_or_default(),
                quiet: commands.quiet,
            };
            resolve::resolve(&cfg).await
        }
        Commands::Hosts { host } => Ok(hosts::hosts(&host.unwrap_or_default(), commands.quiet)),
    }
}
