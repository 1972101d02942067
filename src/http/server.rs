//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router: control API plus a catch-all dispatch handler
//! - Wire up middleware (tracing, timeout, body limit, request ID)
//! - Serve on a bound listener until the shutdown flag is raised

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use std::time::Duration;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ServerConfig;
use crate::control::setup_control_router;
use crate::engine::dispatcher::Dispatcher;
use crate::http::request::{propagate_request_id_layer, request_id, set_request_id_layer, InboundRequest};
use crate::lifecycle::Shutdown;

/// Application state injected into the dispatch handler.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Dispatcher,
    pub max_body_size: usize,
}

/// HTTP transport for a mock server.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    pub fn new(config: &ServerConfig, dispatcher: Dispatcher) -> Self {
        let router = Self::build_router(config, dispatcher);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServerConfig, dispatcher: Dispatcher) -> Router {
        let registry = dispatcher.registry().clone();
        let state = AppState {
            dispatcher,
            max_body_size: config.limits.max_body_size,
        };

        let mut router = Router::new().fallback(dispatch_handler).with_state(state);
        if config.control.enabled {
            router = router.merge(setup_control_router(&config.control, registry));
        }

        router.layer(
            ServiceBuilder::new()
                .layer(set_request_id_layer())
                .layer(TraceLayer::new_for_http())
                .layer(propagate_request_id_layer())
                .layer(RequestBodyLimitLayer::new(config.limits.max_body_size))
                .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs))),
        )
    }

    /// Run the server on `listener` until `shutdown` is triggered.
    pub async fn run(self, listener: TcpListener, shutdown: Shutdown) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown.signalled())
            .await?;

        tracing::info!(address = %addr, "HTTP server stopped");
        Ok(())
    }
}

/// Catch-all handler: every request not claimed by the control API.
async fn dispatch_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let request_id = request_id(&request);
    let (parts, body) = request.into_parts();

    let body = match axum::body::to_bytes(body, state.max_body_size).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(request_id = %request_id, error = %e, "Failed to read request body");
            return (StatusCode::BAD_REQUEST, "Failed to read request body").into_response();
        }
    };

    let inbound = InboundRequest::from_parts(&parts.method, &parts.uri, body);
    tracing::debug!(
        request_id = %request_id,
        method = %inbound.method,
        path = %inbound.path,
        "Dispatching request"
    );

    state.dispatcher.dispatch(&inbound).into_response()
}
