#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

//! Load driver for the outcome-web demo server
//!
//! Ramps each configured endpoint through a series of concurrency levels,
//! records per-request wall-clock latency and renders a markdown report
//! comparing the classic and `Outcome` routes side by side.

pub mod cli;
pub mod config;
pub mod error;
pub mod metrics;
pub mod report;
pub mod runner;

pub use cli::Cli;
pub use config::{Endpoint, LoadTestConfig};
pub use error::{LoadTestError, Result};
pub use metrics::{LatencyStats, LevelMeasurement, MeasurementLog};
pub use report::MarkdownReport;
pub use runner::{LoadRunner, LoadTestSummary};
