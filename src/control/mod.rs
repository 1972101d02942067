//! Runtime control API.
//!
//! ```text
//! POST   <path>   route object → 201 {"method","path"} | 400 {"error"}
//! GET    <path>   → 200 [{"method","path","code","activations"}]
//! DELETE <path>   → 204, registry cleared
//! ```

pub mod auth;
pub mod handlers;

use axum::{middleware, routing::post, Router};
use std::sync::Arc;

use self::auth::control_auth_middleware;
use self::handlers::*;
use crate::config::ControlConfig;
use crate::routing::registry::RouteRegistry;

#[derive(Clone)]
pub struct ControlState {
    pub registry: Arc<RouteRegistry>,
    pub api_key: Option<String>,
}

pub fn setup_control_router(config: &ControlConfig, registry: Arc<RouteRegistry>) -> Router {
    let state = ControlState {
        registry,
        api_key: config.api_key.clone(),
    };

    Router::new()
        .route(
            &config.path,
            post(create_route).get(list_routes).delete(reset_routes),
        )
        .layer(middleware::from_fn_with_state(state.clone(), control_auth_middleware))
        .with_state(state)
}
