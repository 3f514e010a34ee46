use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Zabbix probe for FRRouting BGP neighbors
#[derive(Parser, Debug)]
#[command(
    name = "bgpmon",
    about = "Zabbix probe for FRRouting BGP neighbor discovery and session state",
    version,
    long_about = "bgpmon queries vtysh for BGP neighbor configuration and session state, \
                  caches the parsed result briefly, and prints Zabbix-shaped JSON. \
                  Failures print ZBX_NOTSUPPORTED and exit non-zero."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error logging"
    )]
    pub quiet: bool,

    #[arg(
        long,
        global = true,
        help = "Skip cache reads and query vtysh directly (the cache is still refreshed)"
    )]
    pub no_cache: bool,

    #[arg(
        long,
        global = true,
        value_name = "FILE",
        help = "Override the cache file location"
    )]
    pub cache_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Emit low-level discovery data for all configured neighbors",
        long_about = "Scans the running config for neighbors and prints one discovery \
                      entry per neighbor with its description and maximum-prefix limit.\n\n\
                      Example:\n  bgpmon discovery"
    )]
    Discovery,

    #[command(
        name = "neighbor-state",
        // Item keys written for the original probe spell the action with an
        // underscore; accept both.
        alias = "neighbor_state",
        about = "Emit the encoded session state of one neighbor",
        long_about = "Looks up one neighbor in the BGP summary table and prints its \
                      session state as a signed code ({\"state\": -8} for Established, \
                      0 for unknown/no data).\n\n\
                      Example:\n  bgpmon neighbor-state -n 192.0.2.10"
    )]
    NeighborState(NeighborStateArgs),
}

#[derive(Args, Debug, Clone)]
pub struct NeighborStateArgs {
    #[arg(
        short = 'n',
        long = "neighbor",
        value_name = "IP",
        help = "Neighbor IPv4 address to look up"
    )]
    pub neighbor: String,
}
