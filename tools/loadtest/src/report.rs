#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

//! Markdown rendering of a load test run

use crate::config::LoadTestConfig;
use crate::error::{LoadTestError, Result};
use crate::metrics::LevelMeasurement;
use crate::runner::LoadTestSummary;
use chrono::{DateTime, Utc};
use std::path::Path;
use std::time::Duration;

const TABLE_HEADER: &str =
    "| Concurrency | Requests | Errors | Throughput (req/s) | p50 (ms) | p90 (ms) | p99 (ms) | Max (ms) |";
const TABLE_RULE: &str = "|---:|---:|---:|---:|---:|---:|---:|---:|";

/// Markdown report for one run
pub struct MarkdownReport<'a> {
    config: &'a LoadTestConfig,
    summary: &'a LoadTestSummary,
    generated_at: DateTime<Utc>,
}

impl<'a> MarkdownReport<'a> {
    /// Create a report stamped with the current time
    #[must_use]
    pub fn new(config: &'a LoadTestConfig, summary: &'a LoadTestSummary) -> Self {
        Self {
            config,
            summary,
            generated_at: Utc::now(),
        }
    }

    /// Render the full document
    #[must_use]
    pub fn render(&self) -> String {
        let mut lines = vec![
            "# Outcome vs classic error handling: load test".to_string(),
            String::new(),
            format!("Generated: {}", self.generated_at.to_rfc3339()),
            String::new(),
        ];

        lines.extend(self.configuration_section());

        for endpoint in self.config.endpoints() {
            lines.push(format!("## {} (`{}`)", endpoint.name(), endpoint.path()));
            lines.push(String::new());
            lines.push(TABLE_HEADER.to_string());
            lines.push(TABLE_RULE.to_string());
            lines.extend(self.summary.for_endpoint(endpoint.name()).map(table_row));
            lines.push(String::new());
        }

        lines.extend(self.comparison_section());

        lines.join("\n")
    }

    /// Render and write the report to `path`
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be written
    pub fn write_to(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.render())
            .map_err(|e| LoadTestError::WriteFailed(path.display().to_string(), e.to_string()))
    }

    fn configuration_section(&self) -> Vec<String> {
        let levels = self
            .config
            .concurrency_levels()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");

        vec![
            "## Configuration".to_string(),
            String::new(),
            format!("- Base URL: {}", self.config.base_url()),
            format!("- Concurrency levels: {levels}"),
            format!("- Requests per level: {}", self.config.requests_per_level()),
            format!(
                "- Request timeout: {} ms",
                self.config.request_timeout().as_millis()
            ),
            format!(
                "- Run window: {} to {}",
                self.summary.started().to_rfc3339(),
                self.summary.finished().to_rfc3339()
            ),
            format!("- Transport errors: {}", self.summary.total_errors()),
            String::new(),
        ]
    }

    /// Throughput of the second endpoint relative to the first, per level
    fn comparison_section(&self) -> Vec<String> {
        let (Some(first), Some(second)) =
            (self.config.endpoints().first(), self.config.endpoints().get(1))
        else {
            return Vec::new();
        };

        let mut lines = vec![
            "## Comparison".to_string(),
            String::new(),
            format!(
                "| Concurrency | {a} (req/s) | {b} (req/s) | Ratio ({b}/{a}) |",
                a = first.name(),
                b = second.name()
            ),
            "|---:|---:|---:|---:|".to_string(),
        ];

        for &level in self.config.concurrency_levels() {
            let baseline = self.throughput_at(first.name(), level);
            let candidate = self.throughput_at(second.name(), level);

            let ratio = match (baseline, candidate) {
                (Some(b), Some(c)) if b > 0.0 => format!("{:.2}", c / b),
                _ => "n/a".to_string(),
            };

            lines.push(format!(
                "| {level} | {} | {} | {ratio} |",
                baseline.map_or_else(|| "n/a".to_string(), |t| format!("{t:.1}")),
                candidate.map_or_else(|| "n/a".to_string(), |t| format!("{t:.1}")),
            ));
        }

        lines.push(String::new());
        lines
    }

    fn throughput_at(&self, endpoint: &str, concurrency: usize) -> Option<f64> {
        self.summary
            .for_endpoint(endpoint)
            .find(|m| m.concurrency() == concurrency)
            .map(LevelMeasurement::throughput)
    }
}

fn table_row(m: &LevelMeasurement) -> String {
    let latency = m.latency();
    format!(
        "| {} | {} | {} | {:.1} | {} | {} | {} | {} |",
        m.concurrency(),
        m.requests(),
        m.errors(),
        m.throughput(),
        ms(latency.p50()),
        ms(latency.p90()),
        ms(latency.p99()),
        ms(latency.max()),
    )
}

#[allow(clippy::cast_precision_loss)] // Acceptable precision loss for display purposes
fn ms(d: Duration) -> String {
    format!("{:.2}", d.as_micros() as f64 / 1000.0)
}
