//! Data Transfer Objects for the web-facing contract.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation.

pub mod shortlink;
