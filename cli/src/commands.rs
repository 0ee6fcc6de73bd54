pub mod hosts;
pub mod resolve;

use clap::{ArgAction, Parser, Subcommand};
use portpick_common::config::DEFAULT_PORT;
use portpick_common::network::host::HostRequest;

#[derive(Parser)]
#[command(name = "portpick")]
#[command(about = "Finds a TCP port that is free on every local interface.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,
    /// Log more (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
    /// Only print results and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the first free port at or above the given one
    #[command(alias = "r")]
    Resolve {
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u32,
        /// Address or name the server will bind, or `true` for all interfaces
        #[arg(short = 'H', long)]
        host: Option<HostRequest>,
    },
    /// List the hosts a port has to be free on
    #[command(alias = "h")]
    Hosts {
        #[arg(short = 'H', long)]
        host: Option<HostRequest>,
    },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
