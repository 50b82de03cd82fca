//! Command-line surface and the artifact paths every pipeline receives.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::Pipeline;

/// Default location of the benchmark record.
pub const DEFAULT_RESULTS: &str = "benches/benchmark_results.json";
/// Default location of the chart.
pub const DEFAULT_CHART: &str = "benches/benchmark_plot.png";
/// Default location of the report document.
pub const DEFAULT_REPORT: &str = "benches/README.md";

/// Locations of the input record and the two output artifacts.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    /// Benchmark record written by the benchmark run.
    #[arg(long, env = "BENCH_RESULTS", default_value = DEFAULT_RESULTS, global = true)]
    pub results: PathBuf,

    /// Chart destination; `.svg` writes SVG, anything else PNG.
    #[arg(long, env = "BENCH_CHART", default_value = DEFAULT_CHART, global = true)]
    pub chart: PathBuf,

    /// Report document whose placeholders are rewritten in place.
    #[arg(long, env = "BENCH_REPORT", default_value = DEFAULT_REPORT, global = true)]
    pub report: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Self {
            results: PathBuf::from(DEFAULT_RESULTS),
            chart: PathBuf::from(DEFAULT_CHART),
            report: PathBuf::from(DEFAULT_REPORT),
        }
    }
}

/// Throughput report generator.
#[derive(Parser, Debug)]
#[command(name = "throughput-report")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Artifact locations.
    #[command(flatten)]
    pub paths: Paths,

    /// Log debug details.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Render the throughput comparison chart.
    Plot,
    /// Fill the report placeholders with the benchmark figures.
    Readme,
    /// Run both; a failure in one does not stop the other.
    All,
}

impl Command {
    /// Pipelines this command runs, in order.
    #[must_use]
    pub fn pipelines(self) -> &'static [Pipeline] {
        match self {
            Command::Plot => &[Pipeline::Chart],
            Command::Readme => &[Pipeline::Report],
            Command::All => &[Pipeline::Chart, Pipeline::Report],
        }
    }
}
