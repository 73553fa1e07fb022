//! HTTP surface: DTOs, axum handlers and the route table.
//!
//! # Modules
//!
//! - [`dto`] - Data Transfer Objects for request/response serialization
//! - [`handlers`] - Axum handlers for encode, decode and redirect
//! - [`routes`] - Router wiring the handlers to their paths

pub mod dto;
pub mod handlers;
pub mod routes;
