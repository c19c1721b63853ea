//! CLI argument definitions using clap.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

use crate::config::{Endpoint, LoadTestConfig};
use crate::error::Result;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Outcome load driver
#[derive(Parser, Debug)]
#[command(name = "outcome-loadtest")]
#[command(version)]
#[command(about = "Compare throughput and latency of the classic and Outcome demo routes")]
#[command(
    long_about = "Ramps each endpoint through the given concurrency levels against a running outcome-web server and writes a markdown report."
)]
pub struct Cli {
    /// Server root URL
    #[arg(short, long, default_value = "http://127.0.0.1:3000")]
    pub base_url: String,

    /// Endpoint to drive as NAME=/path (repeatable; defaults to the two demo routes)
    #[arg(short, long = "endpoint")]
    pub endpoints: Vec<Endpoint>,

    /// Concurrency levels, comma separated
    #[arg(short, long, value_delimiter = ',', default_values_t = [1, 10, 50, 100])]
    pub concurrency: Vec<usize>,

    /// Requests per endpoint per level
    #[arg(short, long, default_value_t = 1000)]
    pub requests: usize,

    /// Per-request timeout in milliseconds
    #[arg(long, default_value_t = 5000)]
    pub timeout_ms: u64,

    /// Markdown report path
    #[arg(short, long, default_value = "load-test-report.md")]
    pub output: PathBuf,

    /// Also append each level measurement to this JSON lines file
    #[arg(long)]
    pub measurements: Option<PathBuf>,
}

impl Cli {
    /// Build a validated configuration from the parsed arguments
    ///
    /// # Errors
    ///
    /// Returns error if configuration validation fails
    pub fn into_config(self) -> Result<LoadTestConfig> {
        let endpoints = if self.endpoints.is_empty() {
            LoadTestConfig::demo_endpoints()?
        } else {
            self.endpoints
        };

        let config = LoadTestConfig::new(
            self.base_url,
            endpoints,
            self.concurrency,
            self.requests,
            Duration::from_millis(self.timeout_ms),
            self.output,
        )?;

        Ok(match self.measurements {
            Some(path) => config.with_measurement_log(path),
            None => config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadTestError;

    fn parse(args: &[&str]) -> Option<Cli> {
        Cli::try_parse_from(std::iter::once("outcome-loadtest").chain(args.iter().copied())).ok()
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]).map(Cli::into_config);
        assert!(matches!(config, Some(Ok(_))));
        if let Some(Ok(config)) = config {
            assert_eq!(config.concurrency_levels(), &[1, 10, 50, 100]);
            assert_eq!(config.requests_per_level(), 1000);
            assert_eq!(config.endpoints().len(), 2);
            assert_eq!(config.request_timeout(), Duration::from_secs(5));
            assert!(config.measurement_log().is_none());
        }
    }

    #[test]
    fn test_custom_arguments() {
        let cli = parse(&[
            "--base-url",
            "http://localhost:8080",
            "-e",
            "batch=/outcome/users/1",
            "-c",
            "2,4",
            "-r",
            "8",
            "--measurements",
            "levels.jsonl",
        ]);
        let config = cli.map(Cli::into_config);
        assert!(matches!(config, Some(Ok(_))));
        if let Some(Ok(config)) = config {
            assert_eq!(config.base_url(), "http://localhost:8080");
            assert_eq!(config.concurrency_levels(), &[2, 4]);
            assert_eq!(config.endpoints().len(), 1);
            assert!(config.measurement_log().is_some());
        }
    }

    #[test]
    fn test_bad_endpoint_rejected_by_parser() {
        assert!(parse(&["-e", "missing-path"]).is_none());
    }

    #[test]
    fn test_validation_errors_surface() {
        let config = parse(&["-c", "10", "-r", "5"]).map(Cli::into_config);
        assert_eq!(
            config,
            Some(Err(LoadTestError::TooFewRequests {
                requests: 5,
                concurrency: 10
            }))
        );
    }
}
