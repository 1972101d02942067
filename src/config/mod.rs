//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! mockwire.toml
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ServerConfig (validated, immutable)
//!
//! endpoints.json
//!     → loader.rs (parse route objects)
//!     → MockServer::load_endpoints (validate all, swap registry)
//!
//! On endpoint file change:
//!     watcher.rs detects change
//!     → loader.rs re-reads the file
//!     → channel → MockServer::load_endpoints
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - A broken endpoint file never clears the live routes

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use schema::ControlConfig;
pub use schema::EndpointsConfig;
pub use schema::ListenerConfig;
pub use schema::ServerConfig;
