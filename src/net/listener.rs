//! TCP listener binding.
//!
//! # Responsibilities
//! - Parse and bind the configured address
//! - Report the actual bound address (port 0 picks a free port)

use std::net::SocketAddr;
use tokio::net::TcpListener;

/// Error type for listener operations.
#[derive(Debug)]
pub enum ListenerError {
    /// The address string did not parse.
    Address(String),
    /// Failed to bind to address.
    Bind(std::io::Error),
}

impl std::fmt::Display for ListenerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListenerError::Address(addr) => write!(f, "Invalid listen address: {}", addr),
            ListenerError::Bind(e) => write!(f, "Failed to bind: {}", e),
        }
    }
}

impl std::error::Error for ListenerError {}

/// Bind a TCP listener on `address` and return it with its local address.
pub async fn bind(address: &str) -> Result<(TcpListener, SocketAddr), ListenerError> {
    let addr: SocketAddr = address
        .parse()
        .map_err(|_| ListenerError::Address(address.to_string()))?;

    let listener = TcpListener::bind(addr).await.map_err(ListenerError::Bind)?;
    let local_addr = listener.local_addr().map_err(ListenerError::Bind)?;

    tracing::info!(address = %local_addr, "Listener bound");
    Ok((listener, local_addr))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bind_ephemeral_port() {
        let (_listener, addr) = bind("127.0.0.1:0").await.unwrap();
        assert_ne!(addr.port(), 0);
    }

    #[tokio::test]
    async fn test_bad_address() {
        assert!(matches!(bind("localhost").await, Err(ListenerError::Address(_))));
    }

    #[tokio::test]
    async fn test_port_in_use() {
        let (_held, addr) = bind("127.0.0.1:0").await.unwrap();
        assert!(matches!(bind(&addr.to_string()).await, Err(ListenerError::Bind(_))));
    }
}
