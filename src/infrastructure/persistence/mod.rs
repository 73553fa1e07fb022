//! Short link repository implementations.
//!
//! # Repositories
//!
//! - [`PgShortLinkRepository`] - PostgreSQL storage
//! - [`MemoryShortLinkRepository`] - in-process storage for tests and dry runs

pub mod memory_short_link_repository;
pub mod pg_short_link_repository;

pub use memory_short_link_repository::MemoryShortLinkRepository;
pub use pg_short_link_repository::{PgShortLinkRepository, run_migrations};
