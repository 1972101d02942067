//! Route lifecycle engine.
//!
//! # Data Flow
//! ```text
//! InboundRequest
//!     → dispatcher.rs (normalize, registry lookup)
//!         miss → 404
//!         hit  → http::response::render (status, headers, JSONP)
//!              → activation.rs (register nested routes)
//!     → RenderedResponse
//! ```
//!
//! `instance.rs` holds `MockServer`, which owns the registry, the dispatcher,
//! and the optional listening task.

pub mod activation;
pub mod dispatcher;
pub mod instance;

pub use activation::{activate, ActivationReport};
pub use dispatcher::Dispatcher;
pub use instance::{MockServer, ServerError};
