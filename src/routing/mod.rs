//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration:
//!     JSON route object → declarative.rs ─┐
//!     server.get(path)... → fluent.rs ────┼→ builder.rs (validate)
//!                                         │     → RouteDefinition
//!                                         └→ registry.rs (insert / replace)
//!
//! Incoming Request (method, path?query)
//!     → definition.rs (normalize to RouteKey, drop query)
//!     → registry.rs (exact lookup)
//!     → Return: matched RouteDefinition or none
//! ```
//!
//! # Design Decisions
//! - Exact `(method, path)` keys; no patterns, no precedence rules
//! - One validating builder behind both construction surfaces
//! - Definitions are immutable; updates replace the whole entry

pub mod builder;
pub mod declarative;
pub mod definition;
pub mod fluent;
pub mod registry;

pub use builder::{DefinitionError, RouteBuilder};
pub use declarative::RouteSpec;
pub use definition::{ResponseTemplate, RouteDefinition, RouteKey};
pub use fluent::FluentRoute;
pub use registry::RouteRegistry;
