//! Outcome demo server binary
//!
//! Standalone binary serving the classic and Outcome user routes.

use outcome_web::ServerConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,outcome_web=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();

    tracing::info!("Starting Outcome demo server");
    tracing::info!("Classic: http://{}/classic/users/1", config.bind_address);
    tracing::info!("Outcome: http://{}/outcome/users/1", config.bind_address);

    outcome_web::server::run_server(config).await?;

    Ok(())
}
