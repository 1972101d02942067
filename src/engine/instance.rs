//! The mock server context object.
//!
//! Each `MockServer` owns one registry and at most one listening socket, so
//! independent instances never share routes.
//!
//! ```no_run
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! use mockwire::MockServer;
//! use serde_json::json;
//!
//! let mut server = MockServer::new();
//! let _ = server.get("/fluent").status(300).body(json!({ "fluency": "isgreat" }));
//! let addr = server.listen("127.0.0.1:0").await?;
//! // ... point a client at `addr` ...
//! server.stop().await?;
//! # Ok(())
//! # }
//! ```

use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;

use crate::config::validation::{validate_config, ValidationError};
use crate::config::ServerConfig;
use crate::engine::dispatcher::Dispatcher;
use crate::http::request::InboundRequest;
use crate::http::response::RenderedResponse;
use crate::http::server::HttpServer;
use crate::lifecycle::Shutdown;
use crate::net::{self, ListenerError};
use crate::routing::builder::{DefinitionError, RouteBuilder};
use crate::routing::declarative::RouteSpec;
use crate::routing::fluent::FluentRoute;
use crate::routing::registry::RouteRegistry;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("already listening on {0}")]
    AlreadyListening(SocketAddr),

    #[error("invalid configuration: {0:?}")]
    Config(Vec<ValidationError>),

    #[error(transparent)]
    Listener(#[from] ListenerError),

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),

    #[error("server task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

struct Running {
    addr: SocketAddr,
    shutdown: Shutdown,
    task: JoinHandle<Result<(), std::io::Error>>,
}

pub struct MockServer {
    config: ServerConfig,
    registry: Arc<RouteRegistry>,
    dispatcher: Dispatcher,
    running: Option<Running>,
}

impl MockServer {
    pub fn new() -> Self {
        Self::with_config(ServerConfig::default())
    }

    pub fn with_config(config: ServerConfig) -> Self {
        let registry = Arc::new(RouteRegistry::new());
        let dispatcher = Dispatcher::new(registry.clone());
        Self {
            config,
            registry,
            dispatcher,
            running: None,
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn registry(&self) -> &Arc<RouteRegistry> {
        &self.registry
    }

    /// Register a declarative route object.
    pub fn create_route(&self, spec: RouteSpec) -> Result<(), DefinitionError> {
        self.register(spec.into_builder())
    }

    /// Register a route object given as JSON text.
    pub fn create_route_json(&self, json: &str) -> Result<(), DefinitionError> {
        self.create_route(RouteSpec::from_json(json)?)
    }

    /// Validate and register a built-up route.
    pub fn register(&self, builder: RouteBuilder) -> Result<(), DefinitionError> {
        self.registry.register(builder.build()?);
        Ok(())
    }

    /// Validate every route, then swap them in as the complete route set.
    /// On error nothing changes.
    pub fn load_endpoints(&self, specs: Vec<RouteSpec>) -> Result<usize, DefinitionError> {
        load_routes(&self.registry, specs)
    }

    pub fn route(&self, method: &str, path: &str) -> FluentRoute {
        FluentRoute::start(self.registry.clone(), method, path)
    }

    pub fn get(&self, path: &str) -> FluentRoute {
        self.route("GET", path)
    }

    pub fn post(&self, path: &str) -> FluentRoute {
        self.route("POST", path)
    }

    pub fn put(&self, path: &str) -> FluentRoute {
        self.route("PUT", path)
    }

    pub fn patch(&self, path: &str) -> FluentRoute {
        self.route("PATCH", path)
    }

    pub fn delete(&self, path: &str) -> FluentRoute {
        self.route("DELETE", path)
    }

    /// Serve one request without going through a socket.
    pub fn dispatch(&self, request: &InboundRequest) -> RenderedResponse {
        self.dispatcher.dispatch(request)
    }

    /// Bind `address` and serve in a background task.
    /// Returns the bound address; use port 0 for an ephemeral port.
    pub async fn listen(&mut self, address: &str) -> Result<SocketAddr, ServerError> {
        if let Some(running) = &self.running {
            return Err(ServerError::AlreadyListening(running.addr));
        }
        validate_config(&self.config).map_err(ServerError::Config)?;

        let (listener, addr) = net::bind(address).await?;
        let shutdown = Shutdown::new();
        let server = HttpServer::new(&self.config, self.dispatcher.clone());
        let task = tokio::spawn(server.run(listener, shutdown.clone()));

        self.running = Some(Running { addr, shutdown, task });
        Ok(addr)
    }

    /// Bind the configured listener address.
    pub async fn listen_configured(&mut self) -> Result<SocketAddr, ServerError> {
        let address = self.config.listener.bind_address.clone();
        self.listen(&address).await
    }

    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.running.as_ref().map(|r| r.addr)
    }

    /// Handle that stops this server when triggered.
    pub fn shutdown_handle(&self) -> Option<Shutdown> {
        self.running.as_ref().map(|r| r.shutdown.clone())
    }

    /// Stop listening, wait for in-flight requests, and clear every route.
    pub async fn stop(&mut self) -> Result<(), ServerError> {
        let outcome = match self.running.take() {
            Some(running) => {
                running.shutdown.trigger();
                let result = running.task.await;
                tracing::info!(address = %running.addr, "Mock server stopped");
                match result {
                    Ok(served) => served.map_err(ServerError::from),
                    Err(e) => Err(ServerError::from(e)),
                }
            }
            None => Ok(()),
        };
        self.reset();
        outcome
    }

    /// Wait until the shutdown handle is triggered elsewhere, then `stop`.
    pub async fn wait_for_shutdown(&mut self) -> Result<(), ServerError> {
        if let Some(shutdown) = self.shutdown_handle() {
            shutdown.signalled().await;
        }
        self.stop().await
    }

    /// Clear every route. The listener, if any, keeps running.
    pub fn reset(&self) {
        self.registry.reset();
    }
}

impl Default for MockServer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        if let Some(running) = &self.running {
            running.shutdown.trigger();
        }
    }
}

/// Validate `specs` and replace the registry contents with them.
pub fn load_routes(registry: &RouteRegistry, specs: Vec<RouteSpec>) -> Result<usize, DefinitionError> {
    let definitions = specs
        .into_iter()
        .map(|spec| spec.into_builder().build())
        .collect::<Result<Vec<_>, _>>()?;
    let count = definitions.len();
    registry.replace_all(definitions);
    Ok(count)
}
