//! LogMon command line interface
//!
//! Decodes arcdps `.evtc` combat logs and prints the team and squad
//! composition of each fight.
//!
//! Examples:
//!   logmon 20241019-201500.evtc
//!   logmon --format json fights/*.evtc
//!   logmon --tables tables.json 20241019-201500.evtc

mod app;
mod report;

use clap::Parser;

use app::{AppConfig, Args};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    app::init_tracing(args.verbose);

    if args.verbose {
        tracing::info!("Verbose mode enabled");
    }

    app::run(AppConfig::from(args))
}
