use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;

use crate::control::ControlState;
use crate::routing::declarative::RouteSpec;
use crate::routing::definition::RouteDefinition;

#[derive(Debug, Serialize)]
pub struct CreatedRoute {
    pub method: String,
    pub path: String,
}

#[derive(Debug, Serialize)]
pub struct RouteSummary {
    pub method: String,
    pub path: String,
    pub code: u16,
    pub activations: usize,
}

impl From<&RouteDefinition> for RouteSummary {
    fn from(def: &RouteDefinition) -> Self {
        Self {
            method: def.method().to_string(),
            path: def.path().to_string(),
            code: def.response.status.as_u16(),
            activations: def.activation.len(),
        }
    }
}

/// Register a route from a JSON route object.
pub async fn create_route(State(state): State<ControlState>, body: Bytes) -> Response {
    let parsed = std::str::from_utf8(&body)
        .map_err(|e| e.to_string())
        .and_then(|text| RouteSpec::from_json(text).map_err(|e| e.to_string()))
        .and_then(|spec| spec.into_builder().build().map_err(|e| e.to_string()));

    match parsed {
        Ok(definition) => {
            let created = CreatedRoute {
                method: definition.method().to_string(),
                path: definition.path().to_string(),
            };
            tracing::info!(method = %created.method, path = %created.path, "Route created via control API");
            state.registry.register(definition);
            (StatusCode::CREATED, Json(created)).into_response()
        }
        Err(error) => {
            tracing::warn!(error = %error, "Rejected route from control API");
            (StatusCode::BAD_REQUEST, Json(json!({ "error": error }))).into_response()
        }
    }
}

pub async fn list_routes(State(state): State<ControlState>) -> Json<Vec<RouteSummary>> {
    let routes = state.registry.snapshot();
    Json(routes.iter().map(|def| RouteSummary::from(def.as_ref())).collect())
}

pub async fn reset_routes(State(state): State<ControlState>) -> StatusCode {
    state.registry.reset();
    tracing::info!("Routes reset via control API");
    StatusCode::NO_CONTENT
}
