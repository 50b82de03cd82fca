//! Turn a benchmark run's throughput record into a comparison chart and an
//! updated README.
//!
//! The benchmark run writes a single JSON record (see [`BenchmarkResult`]).
//! Two independent pipelines consume it:
//!
//! - **chart**: derive sequences/µs from bases/µs and draw two stacked bar
//!   charts ([`plots::generate_chart`]);
//! - **report**: replace the `[PLACEHOLDER]` tokens of a README with the
//!   record's figures ([`template::update_readme`]).
//!
//! ```no_run
//! use std::path::Path;
//! use throughput_report::{plots, template};
//!
//! let results = Path::new("benches/benchmark_results.json");
//! plots::generate_chart(results, Path::new("benches/benchmark_plot.png"))?;
//! template::update_readme(results, Path::new("benches/README.md"))?;
//! # Ok::<(), throughput_report::Error>(())
//! ```

pub mod config;
pub mod data;
pub mod errors;
pub mod fsutil;
pub mod metrics;
pub mod plots;
pub mod template;

pub use config::Paths;
pub use data::BenchmarkResult;
pub use errors::{Error, ErrorKind, Result};
pub use metrics::{AlgorithmThroughput, ThroughputSeries};

/// One of the two independent output pipelines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pipeline {
    /// Results → chart image.
    Chart,
    /// Results → README placeholders.
    Report,
}

impl Pipeline {
    /// Run this pipeline against `paths`.
    ///
    /// # Errors
    ///
    /// The first error of the pipeline; nothing else is attempted after it.
    pub fn run(self, paths: &Paths) -> Result<()> {
        match self {
            Pipeline::Chart => {
                plots::generate_chart(&paths.results, &paths.chart)?;
            }
            Pipeline::Report => {
                template::update_readme(&paths.results, &paths.report)?;
            }
        }
        Ok(())
    }
}

impl std::fmt::Display for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Pipeline::Chart => "chart",
            Pipeline::Report => "report",
        })
    }
}
