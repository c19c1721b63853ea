#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

//! Configuration for load test runs

use crate::error::{LoadTestError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Maximum concurrent workers per level (safety limit)
const MAX_CONCURRENCY: usize = 1024;

/// Maximum requests issued per endpoint per level
const MAX_REQUESTS_PER_LEVEL: usize = 1_000_000;

/// Maximum per-request timeout
const MAX_REQUEST_TIMEOUT_SECS: u64 = 60;

/// A named route to drive, relative to the base URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    name: String,
    path: String,
}

impl Endpoint {
    /// Create a new endpoint
    ///
    /// # Errors
    ///
    /// Returns error if the name is empty or the path does not start with `/`
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let path = path.into();

        if name.trim().is_empty() || !path.starts_with('/') {
            return Err(LoadTestError::InvalidEndpoint(format!("{name}={path}")));
        }

        Ok(Self { name, path })
    }

    /// Label used in logs and the report
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path appended to the base URL
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Parses `name=/path`
impl FromStr for Endpoint {
    type Err = LoadTestError;

    fn from_str(s: &str) -> Result<Self> {
        s.split_once('=')
            .ok_or_else(|| LoadTestError::InvalidEndpoint(s.to_string()))
            .and_then(|(name, path)| Self::new(name.trim(), path.trim()))
    }
}

/// Configuration for a load test run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadTestConfig {
    /// Server root, e.g. `http://127.0.0.1:3000`
    base_url: String,

    /// Routes to compare, in report order
    endpoints: Vec<Endpoint>,

    /// Concurrent workers for each step of the ramp
    concurrency_levels: Vec<usize>,

    /// Requests issued per endpoint at each level
    requests_per_level: usize,

    /// Per-request timeout
    request_timeout: Duration,

    /// Where the markdown report is written
    output_path: PathBuf,

    /// Optional JSON lines log of every level measurement
    measurement_log: Option<PathBuf>,
}

impl LoadTestConfig {
    /// Create a new load test configuration with validation
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The base URL is not `http://` or `https://`
    /// - No endpoints or no concurrency levels are given
    /// - A concurrency level is zero or above the maximum (1024)
    /// - `requests_per_level` is zero, above the maximum, or below the
    ///   highest concurrency level
    /// - The timeout is zero or above 60s
    /// - The output path is empty
    ///
    /// # Examples
    ///
    /// ```
    /// # use outcome_loadtest::{Endpoint, LoadTestConfig};
    /// # use std::time::Duration;
    /// # use std::path::PathBuf;
    /// let config = LoadTestConfig::new(
    ///     "http://127.0.0.1:3000".to_string(),
    ///     vec![Endpoint::new("outcome", "/outcome/users/1").unwrap()],
    ///     vec![1, 10],
    ///     100,
    ///     Duration::from_secs(5),
    ///     PathBuf::from("report.md"),
    /// );
    /// assert!(config.is_ok());
    /// ```
    pub fn new(
        base_url: String,
        endpoints: Vec<Endpoint>,
        concurrency_levels: Vec<usize>,
        requests_per_level: usize,
        request_timeout: Duration,
        output_path: PathBuf,
    ) -> Result<Self> {
        Self::validate_base_url(&base_url)?;
        Self::validate_endpoints(&endpoints)?;
        Self::validate_levels(&concurrency_levels, requests_per_level)?;
        Self::validate_timeout(request_timeout)?;
        Self::validate_output_path(&output_path)?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            endpoints,
            concurrency_levels,
            requests_per_level,
            request_timeout,
            output_path,
            measurement_log: None,
        })
    }

    /// Default comparison of the two demo routes
    ///
    /// Uses:
    /// - Endpoints: `/classic/users/1` and `/outcome/users/1`
    /// - Concurrency levels: 1, 10, 50, 100
    /// - Requests per level: 1000
    /// - Timeout: 5s
    /// - Output: "./load-test-report.md"
    ///
    /// # Errors
    ///
    /// Returns error if configuration validation fails
    pub fn demo_default(base_url: String) -> Result<Self> {
        Self::new(
            base_url,
            Self::demo_endpoints()?,
            vec![1, 10, 50, 100],
            1000,
            Duration::from_secs(5),
            PathBuf::from("load-test-report.md"),
        )
    }

    /// The classic and Outcome user routes
    ///
    /// # Errors
    ///
    /// Returns error if a built-in endpoint fails validation
    pub fn demo_endpoints() -> Result<Vec<Endpoint>> {
        Ok(vec![
            Endpoint::new("classic", "/classic/users/1")?,
            Endpoint::new("outcome", "/outcome/users/1")?,
        ])
    }

    /// Also append every level measurement to a JSON lines file
    #[must_use]
    pub fn with_measurement_log(mut self, path: PathBuf) -> Self {
        self.measurement_log = Some(path);
        self
    }

    /// Get the base URL (no trailing slash)
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the endpoints
    #[must_use]
    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    /// Get the concurrency levels
    #[must_use]
    pub fn concurrency_levels(&self) -> &[usize] {
        &self.concurrency_levels
    }

    /// Get the requests per level
    #[must_use]
    pub const fn requests_per_level(&self) -> usize {
        self.requests_per_level
    }

    /// Get the per-request timeout
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Get the report path
    #[must_use]
    pub const fn output_path(&self) -> &PathBuf {
        &self.output_path
    }

    /// Get the measurement log path (if set)
    #[must_use]
    pub const fn measurement_log(&self) -> Option<&PathBuf> {
        self.measurement_log.as_ref()
    }

    /// Full URL for an endpoint
    #[must_use]
    pub fn url_for(&self, endpoint: &Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    fn validate_base_url(base_url: &str) -> Result<()> {
        if base_url.starts_with("http://") || base_url.starts_with("https://") {
            Ok(())
        } else {
            Err(LoadTestError::InvalidConfig(format!(
                "base url must start with http:// or https://, got '{base_url}'"
            )))
        }
    }

    fn validate_endpoints(endpoints: &[Endpoint]) -> Result<()> {
        if endpoints.is_empty() {
            Err(LoadTestError::InvalidConfig(
                "at least one endpoint is required".to_string(),
            ))
        } else {
            Ok(())
        }
    }

    /// Validate concurrency ramp (each level must fit within the request budget)
    fn validate_levels(levels: &[usize], requests_per_level: usize) -> Result<()> {
        if levels.is_empty() {
            return Err(LoadTestError::InvalidConfig(
                "at least one concurrency level is required".to_string(),
            ));
        }

        if requests_per_level == 0 || requests_per_level > MAX_REQUESTS_PER_LEVEL {
            return Err(LoadTestError::InvalidConfig(format!(
                "requests per level must be between 1 and {MAX_REQUESTS_PER_LEVEL}"
            )));
        }

        levels.iter().try_for_each(|&level| {
            if level == 0 {
                Err(LoadTestError::InvalidConfig(
                    "concurrency level must be greater than 0".to_string(),
                ))
            } else if level > MAX_CONCURRENCY {
                Err(LoadTestError::ConcurrencyTooHigh(level, MAX_CONCURRENCY))
            } else if requests_per_level < level {
                Err(LoadTestError::TooFewRequests {
                    requests: requests_per_level,
                    concurrency: level,
                })
            } else {
                Ok(())
            }
        })
    }

    fn validate_timeout(timeout: Duration) -> Result<()> {
        if timeout.is_zero() || timeout.as_secs() > MAX_REQUEST_TIMEOUT_SECS {
            Err(LoadTestError::InvalidConfig(format!(
                "request timeout must be between 1ms and {MAX_REQUEST_TIMEOUT_SECS}s"
            )))
        } else {
            Ok(())
        }
    }

    fn validate_output_path(path: &PathBuf) -> Result<()> {
        if path.as_os_str().is_empty() {
            Err(LoadTestError::InvalidConfig(
                "output path cannot be empty".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoints() -> Vec<Endpoint> {
        LoadTestConfig::demo_endpoints().unwrap_or_default()
    }

    fn build(levels: Vec<usize>, requests: usize) -> Result<LoadTestConfig> {
        LoadTestConfig::new(
            "http://localhost:3000".to_string(),
            endpoints(),
            levels,
            requests,
            Duration::from_secs(5),
            PathBuf::from("report.md"),
        )
    }

    #[test]
    fn test_valid_config() {
        assert!(build(vec![1, 10], 100).is_ok());
    }

    #[test]
    fn test_demo_default() {
        let config = LoadTestConfig::demo_default("http://127.0.0.1:3000/".to_string());
        assert!(config.is_ok());
        if let Ok(c) = config {
            assert_eq!(c.base_url(), "http://127.0.0.1:3000");
            assert_eq!(c.concurrency_levels(), &[1, 10, 50, 100]);
            assert_eq!(c.endpoints().len(), 2);
            assert_eq!(
                c.endpoints().first().map(|e| c.url_for(e)),
                Some("http://127.0.0.1:3000/classic/users/1".to_string())
            );
        }
    }

    #[test]
    fn test_concurrency_too_high() {
        assert!(matches!(
            build(vec![2048], 5000),
            Err(LoadTestError::ConcurrencyTooHigh(2048, _))
        ));
    }

    #[test]
    fn test_zero_concurrency() {
        assert!(matches!(
            build(vec![0], 10),
            Err(LoadTestError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_too_few_requests() {
        assert_eq!(
            build(vec![1, 50], 20),
            Err(LoadTestError::TooFewRequests {
                requests: 20,
                concurrency: 50
            })
        );
    }

    #[test]
    fn test_empty_levels_and_endpoints() {
        assert!(build(vec![], 10).is_err());

        let config = LoadTestConfig::new(
            "http://localhost".to_string(),
            vec![],
            vec![1],
            1,
            Duration::from_secs(1),
            PathBuf::from("r.md"),
        );
        assert!(config.is_err());
    }

    #[test]
    fn test_invalid_base_url() {
        let config = LoadTestConfig::new(
            "localhost:3000".to_string(),
            endpoints(),
            vec![1],
            1,
            Duration::from_secs(1),
            PathBuf::from("r.md"),
        );
        assert!(matches!(config, Err(LoadTestError::InvalidConfig(_))));
    }

    #[test]
    fn test_timeout_bounds() {
        let config = LoadTestConfig::new(
            "http://localhost".to_string(),
            endpoints(),
            vec![1],
            1,
            Duration::from_secs(120),
            PathBuf::from("r.md"),
        );
        assert!(config.is_err());
    }

    #[test]
    fn test_endpoint_from_str() {
        let endpoint: Result<Endpoint> = "outcome=/outcome/users/2".parse();
        assert_eq!(
            endpoint.as_ref().map(Endpoint::path),
            Ok("/outcome/users/2")
        );

        assert!("no-separator".parse::<Endpoint>().is_err());
        assert!("name=relative/path".parse::<Endpoint>().is_err());
        assert!("=/path".parse::<Endpoint>().is_err());
    }

    #[test]
    fn test_with_measurement_log() {
        let config = build(vec![1], 1).map(|c| c.with_measurement_log(PathBuf::from("m.jsonl")));
        assert!(config.as_ref().ok().and_then(|c| c.measurement_log()).is_some());
    }
}
