//! Throughput report generator.
//!
//! Reads the benchmark record, then renders the comparison chart and/or
//! fills the README placeholders.
//!
//! Run: `cargo run -- all [--results <json>] [--chart <png|svg>] [--report <md>]`

use std::process::ExitCode;

use clap::Parser;
use throughput_report::config::Cli;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    tracing::debug!(paths = ?cli.paths, command = ?cli.command, "starting");

    let mut failed = false;
    for &pipeline in cli.command.pipelines() {
        if let Err(e) = pipeline.run(&cli.paths) {
            eprintln!("error[{}]: {pipeline}: {e}", e.kind());
            failed = true;
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
