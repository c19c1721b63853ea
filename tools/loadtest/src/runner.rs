#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

//! Load runner ramping each endpoint through the configured concurrency levels

use crate::config::{Endpoint, LoadTestConfig};
use crate::error::{LoadTestError, Result};
use crate::metrics::{LatencyStats, LevelMeasurement, MeasurementLog};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// What one worker observed
#[derive(Debug, Default)]
struct WorkerTally {
    latencies: Vec<Duration>,
    errors: usize,
}

/// Drives HTTP load against a running server
pub struct LoadRunner {
    config: LoadTestConfig,
    client: reqwest::Client,
}

impl LoadRunner {
    /// Create a new load runner with a shared HTTP client
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built
    pub fn new(config: LoadTestConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| LoadTestError::ClientBuildFailed(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// Configuration this runner was built with
    #[must_use]
    pub const fn config(&self) -> &LoadTestConfig {
        &self.config
    }

    /// Run every endpoint at every concurrency level
    ///
    /// Endpoints run one after another, each ramping through the levels in
    /// order, so the measurements never compete for the server.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - A worker task panics or is cancelled
    /// - The measurement log cannot be written
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use outcome_loadtest::{LoadRunner, LoadTestConfig};
    /// # async fn demo() -> outcome_loadtest::Result<()> {
    /// let config = LoadTestConfig::demo_default("http://127.0.0.1:3000".to_string())?;
    /// let summary = LoadRunner::new(config)?.run().await?;
    /// println!("{} measurements", summary.measurements().len());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run(&self) -> Result<LoadTestSummary> {
        let started = Utc::now();
        let log = self.config.measurement_log().cloned().map(MeasurementLog::new);
        let mut measurements = Vec::new();

        for endpoint in self.config.endpoints() {
            info!(endpoint = endpoint.name(), path = endpoint.path(), "Ramping endpoint");

            for &concurrency in self.config.concurrency_levels() {
                let measurement = self.measure_level(endpoint, concurrency).await?;

                if let Some(log) = &log {
                    log.append(&measurement)?;
                }

                measurements.push(measurement);
            }
        }

        Ok(LoadTestSummary {
            started,
            finished: Utc::now(),
            measurements,
        })
    }

    /// Issue `requests_per_level` requests with `concurrency` workers
    ///
    /// # Errors
    ///
    /// Returns error if a worker task fails to join
    pub async fn measure_level(
        &self,
        endpoint: &Endpoint,
        concurrency: usize,
    ) -> Result<LevelMeasurement> {
        let url = Arc::new(self.config.url_for(endpoint));
        let remaining = Arc::new(AtomicUsize::new(self.config.requests_per_level()));

        debug!(url = %url, concurrency, "Starting level");

        let started = Instant::now();
        let mut workers = JoinSet::new();
        for _ in 0..concurrency {
            workers.spawn(worker(
                self.client.clone(),
                Arc::clone(&url),
                Arc::clone(&remaining),
            ));
        }

        let mut latencies = Vec::with_capacity(self.config.requests_per_level());
        let mut errors = 0_usize;
        while let Some(joined) = workers.join_next().await {
            let tally = joined.map_err(|e| LoadTestError::WorkerFailed(e.to_string()))?;
            latencies.extend(tally.latencies);
            errors = errors.saturating_add(tally.errors);
        }
        let elapsed = started.elapsed();

        if errors > 0 {
            warn!(endpoint = endpoint.name(), concurrency, errors, "Requests failed");
        }

        let measurement = LevelMeasurement::new(
            endpoint.name(),
            concurrency,
            latencies.len(),
            errors,
            elapsed,
            LatencyStats::from_samples(&latencies),
        );

        info!(
            endpoint = endpoint.name(),
            concurrency,
            throughput = measurement.throughput(),
            p99 = ?measurement.latency().p99(),
            "Level complete"
        );

        Ok(measurement)
    }
}

/// Claim requests from the shared budget until it is exhausted
async fn worker(
    client: reqwest::Client,
    url: Arc<String>,
    remaining: Arc<AtomicUsize>,
) -> WorkerTally {
    let mut tally = WorkerTally::default();

    while remaining
        .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1))
        .is_ok()
    {
        let sent = Instant::now();
        let outcome = match client.get(url.as_str()).send().await {
            Ok(response) => response.bytes().await.map(|_| ()),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(()) => tally.latencies.push(sent.elapsed()),
            Err(e) => {
                debug!(error = %e, "Request failed");
                tally.errors = tally.errors.saturating_add(1);
            }
        }
    }

    tally
}

/// Summary of a complete load test run
#[derive(Debug, Clone)]
pub struct LoadTestSummary {
    started: DateTime<Utc>,
    finished: DateTime<Utc>,
    measurements: Vec<LevelMeasurement>,
}

impl LoadTestSummary {
    /// Create a summary from already collected measurements
    #[must_use]
    pub const fn new(
        started: DateTime<Utc>,
        finished: DateTime<Utc>,
        measurements: Vec<LevelMeasurement>,
    ) -> Self {
        Self {
            started,
            finished,
            measurements,
        }
    }

    #[must_use]
    pub const fn started(&self) -> &DateTime<Utc> {
        &self.started
    }

    #[must_use]
    pub const fn finished(&self) -> &DateTime<Utc> {
        &self.finished
    }

    /// Measurements in run order (endpoint, then level)
    #[must_use]
    pub fn measurements(&self) -> &[LevelMeasurement] {
        &self.measurements
    }

    /// Measurements for one endpoint, in level order
    pub fn for_endpoint<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a LevelMeasurement> + 'a {
        self.measurements.iter().filter(move |m| m.endpoint() == name)
    }

    /// Total transport errors across all levels
    #[must_use]
    pub fn total_errors(&self) -> usize {
        self.measurements
            .iter()
            .fold(0, |acc, m| acc.saturating_add(m.errors()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn measurement(endpoint: &str, concurrency: usize, errors: usize) -> LevelMeasurement {
        LevelMeasurement::new(
            endpoint,
            concurrency,
            10,
            errors,
            Duration::from_millis(100),
            LatencyStats::default(),
        )
    }

    #[test]
    fn test_summary_filters_by_endpoint() {
        let now = Utc::now();
        let summary = LoadTestSummary::new(
            now,
            now,
            vec![
                measurement("classic", 1, 0),
                measurement("classic", 4, 2),
                measurement("outcome", 1, 1),
            ],
        );

        let levels: Vec<usize> = summary
            .for_endpoint("classic")
            .map(LevelMeasurement::concurrency)
            .collect();
        assert_eq!(levels, vec![1, 4]);
        assert_eq!(summary.total_errors(), 3);
    }

    #[tokio::test]
    async fn test_unreachable_server_counts_errors() {
        // Port 9 (discard) on localhost is expected to refuse connections
        let config = LoadTestConfig::new(
            "http://127.0.0.1:9".to_string(),
            LoadTestConfig::demo_endpoints().unwrap_or_default(),
            vec![2],
            4,
            Duration::from_millis(500),
            PathBuf::from("unused.md"),
        );
        let Ok(config) = config else {
            return;
        };
        let Ok(runner) = LoadRunner::new(config) else {
            return;
        };

        let summary = runner.run().await;
        assert!(summary.is_ok());
        if let Ok(summary) = summary {
            assert_eq!(summary.measurements().len(), 2);
            assert!(
                summary
                    .measurements()
                    .iter()
                    .all(|m| m.requests() == 4 && m.completed() == 0 && m.errors() == 4)
            );
        }
    }
}
