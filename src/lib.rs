//! Declarative HTTP mock server.
//!
//! Describe endpoints that do not have a backend yet, serve canned JSON
//! responses for them, and let one response register further endpoints.

pub mod config;
pub mod control;
pub mod engine;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod routing;

pub use config::schema::ServerConfig;
pub use engine::{MockServer, ServerError};
pub use http::{InboundRequest, RenderedResponse};
pub use routing::{DefinitionError, RouteBuilder, RouteSpec};
