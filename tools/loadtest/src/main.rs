#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]

//! CLI for the Outcome load driver

use clap::Parser;
use outcome_loadtest::{Cli, LoadRunner, MarkdownReport};
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,outcome_loadtest=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let result = run(Cli::parse());

    match result {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

fn run(cli: Cli) -> outcome_loadtest::Result<()> {
    let config = cli.into_config()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    println!("=== Outcome Load Test ===");
    println!("Target: {}", config.base_url());
    for endpoint in config.endpoints() {
        println!("Endpoint: {} -> {}", endpoint.name(), config.url_for(endpoint));
    }
    println!("Requests per level: {}", config.requests_per_level());
    println!();

    let runner = LoadRunner::new(config.clone())?;
    let summary = runtime.block_on(runner.run())?;

    MarkdownReport::new(&config, &summary).write_to(config.output_path())?;

    println!();
    println!("=== Load Test Complete ===");
    for m in summary.measurements() {
        println!(
            "{:<10} c={:<4} {:>10.1} req/s  p99 {:>8.2} ms  errors {}",
            m.endpoint(),
            m.concurrency(),
            m.throughput(),
            m.latency().p99().as_secs_f64() * 1000.0,
            m.errors()
        );
    }
    println!();
    println!("Report saved to: {}", config.output_path().display());

    if summary.total_errors() > 0 {
        println!(
            "Warning: {} requests failed at the transport level",
            summary.total_errors()
        );
    }

    Ok(())
}
