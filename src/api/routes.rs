//! Route table for the shortlink endpoints.
//!
//! # Endpoints
//!
//! - `POST /api/encode`        - Create a shortlink
//! - `GET  /api/decode/{slug}` - Look a slug up
//! - `GET  /{slug}`            - `302 Found` to the destination

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::api::handlers::{decode_handler, encode_handler, redirect_handler};
use crate::domain::repositories::ShortLinkRepository;
use crate::domain::resolver::HostResolver;
use crate::state::AppState;

/// Shortlink routes, still waiting for their state.
pub fn shortlink_routes<L, R>() -> Router<AppState<L, R>>
where
    L: ShortLinkRepository + 'static,
    R: HostResolver + 'static,
{
    Router::new()
        .route("/api/encode", post(encode_handler::<L, R>))
        .route("/api/decode/{slug}", get(decode_handler::<L, R>))
        .route("/{slug}", get(redirect_handler::<L, R>))
}

/// Complete application router with request tracing.
pub fn app_router<L, R>(state: AppState<L, R>) -> Router
where
    L: ShortLinkRepository + 'static,
    R: HostResolver + 'static,
{
    shortlink_routes::<L, R>()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
