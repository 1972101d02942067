//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, control API)
//!     → request.rs (request ID, reduce to InboundRequest)
//!     → engine::dispatcher (lookup → render → activate)
//!     → response.rs (RenderedResponse, JSONP)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{InboundRequest, X_REQUEST_ID};
pub use response::RenderedResponse;
pub use server::HttpServer;
