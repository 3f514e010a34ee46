use bgpmon::cache::CacheStore;
use bgpmon::cli::commands::{CliArgs, Commands};
use bgpmon::cli::output;
use bgpmon::config::BgpmonConfig;
use bgpmon::probe::Probe;
use bgpmon::source::VtyshSource;
use bgpmon::VERSION;

use clap::Parser;
use std::env;
use tracing::{debug, error, Level};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() {
    let args = CliArgs::parse();
    let config = BgpmonConfig::from_env();

    let fallback_level = config
        .as_ref()
        .map(|c| c.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    init_logging_from_args(&args, &fallback_level);

    debug!("bgpmon v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match config {
        Ok(config) => run(&args, &config),
        Err(err) => {
            error!(%err, "configuration error");
            println!("{}", output::format_notsupported(&err.to_string()));
            1
        }
    };

    std::process::exit(exit_code);
}

fn run(args: &CliArgs, config: &BgpmonConfig) -> i32 {
    let cache_file = args
        .cache_file
        .clone()
        .unwrap_or_else(|| config.cache_file.clone());
    let cache = CacheStore::new(cache_file, config.cache_ttl);

    let mut probe = Probe::new(
        VtyshSource::running_config(config.vtysh_path.as_str()),
        VtyshSource::bgp_summary(config.vtysh_path.as_str()),
        cache,
    );
    if args.no_cache {
        probe = probe.without_cache_reads();
    }

    let rendered = match &args.command {
        Commands::Discovery => probe
            .discovery()
            .map_err(anyhow::Error::from)
            .and_then(|settings| output::format_discovery(&settings)),
        Commands::NeighborState(ns) => probe
            .neighbor_state(&ns.neighbor)
            .map_err(anyhow::Error::from)
            .and_then(output::format_state),
    };

    match rendered {
        Ok(payload) => {
            println!("{}", payload);
            0
        }
        Err(err) => {
            error!(%err, "probe failed");
            println!("{}", output::format_notsupported(&err.to_string()));
            1
        }
    }
}

fn init_logging_from_args(args: &CliArgs, fallback_level: &str) {
    use std::sync::Once;
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let level = if let Some(level_str) = &args.log_level {
            parse_level(level_str)
        } else if args.verbose {
            Level::DEBUG
        } else if args.quiet {
            Level::ERROR
        } else {
            parse_level(fallback_level)
        };

        let mut filter = EnvFilter::from_default_env();

        if env::var("RUST_LOG").is_err() {
            filter = filter.add_directive(format!("bgpmon={}", level).parse().unwrap());
        }

        // stdout carries the Zabbix payload; logs must stay on stderr.
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    });
}

fn parse_level(level_str: &str) -> Level {
    match level_str.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!(
                "Invalid log level '{}', defaulting to INFO. Valid levels: trace, debug, info, warn, error",
                level_str
            );
            Level::INFO
        }
    }
}
