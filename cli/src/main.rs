mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::{districts, export, link, overview, show, summary};
use tracing_subscriber::EnvFilter;

/// `-v` counts map to log levels; `RUST_LOG` wins when set.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn run() -> anyhow::Result<()> {
    use clap::Parser;

    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Commands::Districts(args) => districts::run(&cli, args),
        Commands::Show(args) => show::run(&cli, args),
        Commands::Overview(args) => overview::run(&cli, args),
        Commands::Link(args) => link::run(&cli, args),
        Commands::Export(args) => export::run(&cli, args),
        Commands::Summary => summary::run(&cli),
    }
}

fn main() -> anyhow::Result<()> { run() }
