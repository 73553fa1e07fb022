//! Domain layer containing entities and collaborator contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Storage trait definitions
//! - [`resolver`] - DNS resolution trait
//!
//! The domain layer has no dependencies on infrastructure. Services in
//! [`crate::application::services`] consume these traits and concrete
//! implementations live in [`crate::infrastructure`].

pub mod entities;
pub mod repositories;
pub mod resolver;
