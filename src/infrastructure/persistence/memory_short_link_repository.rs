//! In-process short link repository.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::ShortLinkRepository;
use crate::error::AppError;

#[derive(Default)]
struct Store {
    links: Vec<ShortLink>,
    /// Lowercased slug to index in `links`.
    by_slug: HashMap<String, usize>,
    last_id: i64,
}

/// A repository that keeps links in memory.
///
/// The uniqueness check and the insert happen under one lock, which gives
/// the same case-insensitive guarantee as the database index.
///
/// # Use Cases
///
/// - Integration tests without PostgreSQL
/// - CLI dry runs (`--memory`)
#[derive(Default)]
pub struct MemoryShortLinkRepository {
    store: Mutex<Store>,
}

impl MemoryShortLinkRepository {
    pub fn new() -> Self {
        debug!("Using in-memory short link store");
        Self::default()
    }

    /// Number of stored links.
    pub fn len(&self) -> usize {
        self.lock().map(|store| store.links.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, Store>, AppError> {
        self.store
            .lock()
            .map_err(|_| AppError::Storage("in-memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl ShortLinkRepository for MemoryShortLinkRepository {
    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, AppError> {
        let mut store = self.lock()?;
        let key = new_link.slug.to_lowercase();

        if store.by_slug.contains_key(&key) {
            return Err(AppError::SlugTaken(new_link.slug));
        }

        store.last_id += 1;
        let link = ShortLink::new(
            store.last_id,
            new_link.slug,
            new_link.destination,
            new_link.custom,
            Utc::now(),
        );

        let index = store.links.len();
        store.links.push(link.clone());
        store.by_slug.insert(key, index);

        Ok(link)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<ShortLink>, AppError> {
        let store = self.lock()?;

        Ok(store
            .by_slug
            .get(&slug.to_lowercase())
            .map(|&index| store.links[index].clone()))
    }

    async fn max_assigned_id(&self) -> Result<i64, AppError> {
        Ok(self.lock()?.last_id)
    }

    async fn recent(&self, limit: i64) -> Result<Vec<ShortLink>, AppError> {
        let store = self.lock()?;
        let limit = usize::try_from(limit).unwrap_or(0);

        // Insertion order matches creation order
        Ok(store.links.iter().rev().take(limit).cloned().collect())
    }
}
