use anyhow::Result;
use clap::Parser;

use sub_tagger::{cli, config, pipeline};

fn main() -> Result<()> {
    let args = cli::Args::parse();

    let cfg = config::Config::load(args.config.as_deref())?;
    config::init_tracing(&cfg.logging, args.log_level.as_deref())?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "subtag starting");

    match args.command {
        cli::Command::Clean(cmd) => pipeline::run_clean(cmd, &cfg),
        cli::Command::Tag(cmd) => pipeline::run_tag(cmd, &cfg),
        cli::Command::Report(cmd) => pipeline::run_report(cmd),
        cli::Command::Palette => pipeline::run_palette(),
        cli::Command::PrintDefaultConfig => {
            let s = cfg.to_toml_pretty()?;
            print!("{s}");
            Ok(())
        }
    }
}
