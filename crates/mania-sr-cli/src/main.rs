mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Args, Command};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    // RUST_LOG wins over the defaults; --verbose still raises the engine to debug
    let mut env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("mania_sr=info,mania_sr_core=info"));
    if args.verbose {
        env_filter = env_filter.add_directive("mania_sr_core=debug".parse()?);
    }
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match args.command {
        Command::Rate {
            files,
            rate,
            timings,
            json,
            config,
        } => commands::rate::run(&files, rate, timings, json, config.as_deref()),
    }
}
