//! Network layer.
//!
//! Socket binding only; connection handling and HTTP parsing are axum's.

pub mod listener;

pub use listener::{bind, ListenerError};
