//! HTTP server lifecycle.

use anyhow::{Context, Result};
use std::net::SocketAddr;

use crate::api::routes::app_router;
use crate::application::services::ShortlinkService;
use crate::domain::repositories::ShortLinkRepository;
use crate::domain::resolver::HostResolver;
use crate::state::AppState;

/// Serves the shortlink routes on `listen_addr` until the process exits.
///
/// # Errors
///
/// Returns an error if the address is invalid, the bind fails, or the
/// server stops with an I/O error.
pub async fn run<L, R>(listen_addr: &str, service: ShortlinkService<L, R>) -> Result<()>
where
    L: ShortLinkRepository + 'static,
    R: HostResolver + 'static,
{
    let addr: SocketAddr = listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{listen_addr}'"))?;

    let app = app_router(AppState::new(service));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
