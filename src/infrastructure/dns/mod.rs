//! Host resolver implementations.
//!
//! - [`SystemResolver`] - hickory with the system DNS configuration
//! - [`StaticResolver`] - fixed host table for tests and offline use

pub mod static_resolver;
pub mod system_resolver;

pub use static_resolver::StaticResolver;
pub use system_resolver::SystemResolver;
