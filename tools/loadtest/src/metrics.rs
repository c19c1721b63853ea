#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

//! Latency statistics and per-level measurements

use crate::error::{LoadTestError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Latency distribution of one level, in microseconds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatencyStats {
    min_us: u64,
    mean_us: u64,
    max_us: u64,
    p50_us: u64,
    p90_us: u64,
    p99_us: u64,
}

impl LatencyStats {
    /// Summarize a set of request latencies
    ///
    /// Percentiles use the nearest-rank method. An empty sample yields all zeros.
    #[must_use]
    pub fn from_samples(samples: &[Duration]) -> Self {
        let mut micros: Vec<u64> = samples
            .iter()
            .map(|d| u64::try_from(d.as_micros()).unwrap_or(u64::MAX))
            .collect();
        micros.sort_unstable();

        let (Some(&min_us), Some(&max_us)) = (micros.first(), micros.last()) else {
            return Self::default();
        };

        let total = micros.iter().fold(0u64, |acc, v| acc.saturating_add(*v));
        let count = u64::try_from(micros.len()).unwrap_or(u64::MAX);

        Self {
            min_us,
            mean_us: total.checked_div(count).unwrap_or(0),
            max_us,
            p50_us: nearest_rank(&micros, 50),
            p90_us: nearest_rank(&micros, 90),
            p99_us: nearest_rank(&micros, 99),
        }
    }

    /// Fastest request
    #[must_use]
    pub const fn min(&self) -> Duration {
        Duration::from_micros(self.min_us)
    }

    /// Arithmetic mean
    #[must_use]
    pub const fn mean(&self) -> Duration {
        Duration::from_micros(self.mean_us)
    }

    /// Slowest request
    #[must_use]
    pub const fn max(&self) -> Duration {
        Duration::from_micros(self.max_us)
    }

    /// Median
    #[must_use]
    pub const fn p50(&self) -> Duration {
        Duration::from_micros(self.p50_us)
    }

    #[must_use]
    pub const fn p90(&self) -> Duration {
        Duration::from_micros(self.p90_us)
    }

    #[must_use]
    pub const fn p99(&self) -> Duration {
        Duration::from_micros(self.p99_us)
    }
}

/// Value at `percentile` of a sorted, non-empty sample
fn nearest_rank(sorted: &[u64], percentile: usize) -> u64 {
    let rank = percentile
        .saturating_mul(sorted.len())
        .saturating_add(99)
        .checked_div(100)
        .unwrap_or(0)
        .max(1);

    sorted
        .get(rank.saturating_sub(1))
        .or_else(|| sorted.last())
        .copied()
        .unwrap_or(0)
}

/// Result of driving one endpoint at one concurrency level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelMeasurement {
    /// When the level finished
    timestamp: DateTime<Utc>,

    /// Endpoint label
    endpoint: String,

    /// Concurrent workers
    concurrency: usize,

    /// Requests attempted
    requests: usize,

    /// Requests that received an HTTP response (any status)
    completed: usize,

    /// Requests that failed at the transport level
    errors: usize,

    /// Wall-clock time for the whole level
    elapsed: Duration,

    /// Latency of completed requests
    latency: LatencyStats,
}

impl LevelMeasurement {
    /// Create a new measurement
    #[must_use]
    pub fn new(
        endpoint: impl Into<String>,
        concurrency: usize,
        completed: usize,
        errors: usize,
        elapsed: Duration,
        latency: LatencyStats,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            endpoint: endpoint.into(),
            concurrency,
            requests: completed.saturating_add(errors),
            completed,
            errors,
            elapsed,
            latency,
        }
    }

    #[must_use]
    pub const fn timestamp(&self) -> &DateTime<Utc> {
        &self.timestamp
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    #[must_use]
    pub const fn concurrency(&self) -> usize {
        self.concurrency
    }

    #[must_use]
    pub const fn requests(&self) -> usize {
        self.requests
    }

    #[must_use]
    pub const fn completed(&self) -> usize {
        self.completed
    }

    #[must_use]
    pub const fn errors(&self) -> usize {
        self.errors
    }

    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    #[must_use]
    pub const fn latency(&self) -> &LatencyStats {
        &self.latency
    }

    /// Completed requests per second over the level's wall-clock time
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Acceptable precision loss for display purposes
    pub fn throughput(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.completed as f64 / secs
        } else {
            0.0
        }
    }
}

/// Log of level measurements (JSON lines format)
pub struct MeasurementLog {
    output_path: PathBuf,
}

impl MeasurementLog {
    /// Create a new measurement log
    #[must_use]
    pub const fn new(output_path: PathBuf) -> Self {
        Self { output_path }
    }

    /// Append a measurement to the log file
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be written or JSON serialization fails
    pub fn append(&self, measurement: &LevelMeasurement) -> Result<()> {
        use std::io::Write;

        let json = serde_json::to_string(measurement)?;
        let target = self.output_path.display().to_string();

        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.output_path)
            .map_err(|e| LoadTestError::WriteFailed(target.clone(), e.to_string()))?;

        writeln!(file, "{json}").map_err(|e| LoadTestError::WriteFailed(target, e.to_string()))?;

        Ok(())
    }

    /// Read all measurements from the log file
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or JSON parsing fails
    pub fn read_all(&self) -> Result<Vec<LevelMeasurement>> {
        if !Path::new(&self.output_path).exists() {
            return Ok(Vec::new());
        }

        let reader = BufReader::new(File::open(&self.output_path)?);

        reader
            .lines()
            .map(|line_result| {
                let line = line_result?;
                serde_json::from_str(&line).map_err(Into::into)
            })
            .collect()
    }
}
