//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Init logging/metrics → Load endpoints → Listen
//!
//! Shutdown (shutdown.rs):
//!     trigger() → serve loop stops accepting → in-flight requests drain
//!     → MockServer::stop resets the registry
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → trigger()
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
