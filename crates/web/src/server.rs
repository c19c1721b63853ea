//! Server setup: bind a listener and serve the router

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing::info;

use crate::{Error, ServerConfig, create_router};

/// Bind `config.bind_address` and serve until the process is stopped.
///
/// # Errors
///
/// Returns an error if the address is invalid, the port cannot be bound, or
/// the router cannot be built.
pub async fn run_server(config: ServerConfig) -> Result<(), Error> {
    let addr: SocketAddr = config.bind_address.parse()?;
    let listener = TcpListener::bind(addr).await?;
    serve(listener, &config).await
}

/// Serve the router on an already bound listener.
///
/// # Errors
///
/// Returns an error if the router cannot be built or the listener fails.
pub async fn serve(listener: TcpListener, config: &ServerConfig) -> Result<(), Error> {
    let app = create_router(config)?;

    info!("Outcome demo server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
