//! HTTP request handlers.
//!
//! Each handler takes [`crate::state::AppState`] through axum's `State`
//! extractor and is mounted by [`crate::api::routes`].

pub mod shortlink;

pub use shortlink::{decode_handler, encode_handler, redirect_handler};
