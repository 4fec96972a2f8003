//! CLI argument definitions for mania-sr.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use mania_sr_core::RateModifier;

#[derive(Parser)]
#[command(name = "mania-sr")]
#[command(about = "Star rating calculator for mania charts", version)]
pub struct Args {
    /// Log rating engine internals (stage timings, rejected charts)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Rate one or more chart documents (JSON)
    Rate {
        /// Chart document files
        #[arg(required = true, value_name = "FILE")]
        files: Vec<PathBuf>,
        /// Rate modifier applied to every chart (nm, dt, ht)
        #[arg(long, short)]
        rate: Option<RateModifier>,
        /// Print elapsed time per stage
        #[arg(long)]
        timings: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Engine options file (JSON)
        #[arg(long, short, value_name = "FILE", env = "MANIA_SR_CONFIG")]
        config: Option<PathBuf>,
    },
}
