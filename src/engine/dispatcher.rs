//! Per-request orchestration: lookup, render, then activate.
//!
//! Dispatch never fails. A miss is a plain 404 with an empty body.
//! Activation runs after the response is fully rendered and before
//! `dispatch` returns, so the next request already sees the new routes.

use std::sync::Arc;
use std::time::Instant;

use crate::engine::activation::activate;
use crate::http::request::InboundRequest;
use crate::http::response::{render, RenderedResponse};
use crate::observability::metrics;
use crate::routing::definition::RouteKey;
use crate::routing::registry::RouteRegistry;

#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<RouteRegistry>,
}

impl Dispatcher {
    pub fn new(registry: Arc<RouteRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<RouteRegistry> {
        &self.registry
    }

    pub fn dispatch(&self, request: &InboundRequest) -> RenderedResponse {
        let start_time = Instant::now();

        let matched = RouteKey::for_request(&request.method, &request.path)
            .and_then(|key| self.registry.lookup(&key));

        let Some(definition) = matched else {
            tracing::info!(method = %request.method, path = %request.path, "No route matched");
            metrics::record_request(&request.method.to_ascii_uppercase(), 404, false, start_time);
            return RenderedResponse::not_found();
        };

        let response = render(&definition, &request.query);
        tracing::debug!(
            route = %definition.key,
            status = response.status.as_u16(),
            jsonp = request.query.contains_key(crate::http::response::CALLBACK_PARAM),
            "Route matched"
        );

        if !definition.is_static() {
            activate(&self.registry, &definition);
        }

        metrics::record_request(definition.method().as_str(), response.status.as_u16(), true, start_time);
        response
    }
}
