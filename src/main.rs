use std::io;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use triage_queue::cli::{run, Cli};

/// Environment variable holding a `tracing` filter directive
const LOG_ENV: &str = "TRIAGE_LOG";

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(&cli, io::stdin().lock(), io::stdout().lock()) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
