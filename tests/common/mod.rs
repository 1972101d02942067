//! Shared utilities for integration tests.

use mockwire::{MockServer, ServerConfig};

/// Start `server` on an ephemeral port and return its base URL.
pub async fn listen(server: &mut MockServer) -> String {
    let addr = server.listen("127.0.0.1:0").await.expect("bind mock server");
    format!("http://{}", addr)
}

/// A fresh server with default settings, already listening.
#[allow(dead_code)]
pub async fn start_default() -> (MockServer, String) {
    let mut server = MockServer::with_config(ServerConfig::default());
    let base = listen(&mut server).await;
    (server, base)
}

/// Client that ignores system proxies and does not pool connections.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .expect("build client")
}
