//! Request handling.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) and echo it on the response
//! - Reduce an HTTP request to what the dispatcher needs: method, path,
//!   decoded query parameters, raw body
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Query parsing is lenient: repeated keys keep the first value

use axum::body::Bytes;
use axum::http::{HeaderName, Method, Request, Uri};
use std::collections::HashMap;
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use uuid::Uuid;

use crate::routing::definition::strip_query;

/// Header carrying the per-request correlation ID.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Issues a fresh UUID v4 for requests that arrive without an ID.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        Uuid::new_v4().to_string().parse().ok().map(RequestId::new)
    }
}

/// Layer that assigns request IDs.
pub fn set_request_id_layer() -> SetRequestIdLayer<UuidRequestId> {
    SetRequestIdLayer::new(X_REQUEST_ID, UuidRequestId)
}

/// Layer that copies the request ID onto the response.
pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::new(X_REQUEST_ID)
}

/// Read the request ID from a request, if one was assigned.
pub fn request_id<B>(request: &Request<B>) -> String {
    request
        .headers()
        .get(&X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}

/// What the transport hands to the dispatcher for each request.
#[derive(Debug, Clone, Default)]
pub struct InboundRequest {
    /// Method as received; normalized by the dispatcher.
    pub method: String,
    /// Path component only.
    pub path: String,
    pub query: HashMap<String, String>,
    pub body: Bytes,
}

impl InboundRequest {
    /// Build from a method and a request target (`/path?query`).
    pub fn new(method: impl Into<String>, target: &str) -> Self {
        let (path, query) = match target.split_once('?') {
            Some((_, raw)) => (strip_query(target), parse_query(raw)),
            None => (strip_query(target), HashMap::new()),
        };
        Self {
            method: method.into(),
            path: path.to_string(),
            query,
            body: Bytes::new(),
        }
    }

    pub fn from_parts(method: &Method, uri: &Uri, body: Bytes) -> Self {
        let target = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or_else(|| uri.path());
        Self::new(method.as_str(), target).with_body(body)
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }
}

/// Decode `a=1&b=two` into a map.
pub fn parse_query(raw: &str) -> HashMap<String, String> {
    let raw = raw.split('#').next().unwrap_or_default();
    let mut params = HashMap::new();
    for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
        params.entry(key.into_owned()).or_insert_with(|| value.into_owned());
    }
    params
}
