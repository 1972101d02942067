//! Response rendering.
//!
//! # Responsibilities
//! - Turn a matched route's template into status, headers, and body bytes
//! - Wrap the body as JSONP when a `callback` query parameter is present
//! - Merge route headers over the defaults
//!
//! # Design Decisions
//! - Pure computation; writing to the socket is the transport's job
//! - JSONP is decided first and always owns `Content-Type`
//! - Callback names are reduced to `[A-Za-z0-9_$.\[\]]`; nothing left means plain JSON

use axum::body::{Body, Bytes};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use std::collections::HashMap;

use crate::routing::definition::RouteDefinition;

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";
pub const JSONP_CONTENT_TYPE: &str = "text/javascript; charset=utf-8";

/// Query parameter that requests JSONP.
pub const CALLBACK_PARAM: &str = "callback";

/// Fully determined response, ready for the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RenderedResponse {
    pub fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            headers: HeaderMap::new(),
            body: Bytes::new(),
        }
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers.get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok())
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

impl IntoResponse for RenderedResponse {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}

/// Render `definition` for a request with the given query parameters.
pub fn render(definition: &RouteDefinition, query: &HashMap<String, String>) -> RenderedResponse {
    let template = &definition.response;
    let json = template.body.to_string();
    let callback = query.get(CALLBACK_PARAM).and_then(|raw| sanitize_callback(raw));

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
    for (name, value) in &template.headers {
        headers.insert(name.clone(), value.clone());
    }

    let body = match callback {
        Some(cb) => {
            headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(JSONP_CONTENT_TYPE));
            headers.insert(header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
            let payload = json.replace('\u{2028}', "\\u2028").replace('\u{2029}', "\\u2029");
            format!("{}({});", cb, payload)
        }
        None => json,
    };

    RenderedResponse {
        status: template.status,
        headers,
        body: Bytes::from(body),
    }
}

/// Keep only characters that are safe in a JavaScript callee expression.
pub fn sanitize_callback(raw: &str) -> Option<String> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '.' | '[' | ']'))
        .collect();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}
