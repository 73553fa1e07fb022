//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`dns`] - Host resolution (system DNS and static tables)
//! - [`persistence`] - Short link storage (PostgreSQL and in-memory)

pub mod dns;
pub mod persistence;
