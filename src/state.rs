//! Shared state for the HTTP handlers.

use std::sync::Arc;

use crate::application::services::ShortlinkService;
use crate::domain::repositories::ShortLinkRepository;
use crate::domain::resolver::HostResolver;

/// Handed to every handler through axum's `State` extractor.
pub struct AppState<L: ShortLinkRepository, R: HostResolver> {
    pub service: Arc<ShortlinkService<L, R>>,
}

impl<L: ShortLinkRepository, R: HostResolver> AppState<L, R> {
    pub fn new(service: ShortlinkService<L, R>) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

// `L` and `R` need not be `Clone`.
impl<L: ShortLinkRepository, R: HostResolver> Clone for AppState<L, R> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}
