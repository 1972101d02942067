//! The single construction path for route definitions.
//!
//! Both the declarative JSON surface and the fluent surface accumulate into a
//! `RouteBuilder`; `build()` is the only place validation happens.

use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use serde_json::Value;
use thiserror::Error;

use crate::routing::definition::{ResponseTemplate, RouteDefinition, RouteKey};

/// Reasons a route cannot be registered.
#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("route is missing request.method")]
    MissingMethod,

    #[error("route is missing request.url")]
    MissingPath,

    #[error("route is missing response.code")]
    MissingStatus,

    #[error("invalid HTTP method: {0:?}")]
    InvalidMethod(String),

    /// Paths must start with `/` and carry no query or fragment.
    #[error("invalid route path: {0:?}")]
    InvalidPath(String),

    #[error("invalid status code: {0}")]
    InvalidStatus(u16),

    #[error("invalid response header: {0}")]
    InvalidHeader(String),

    #[error("malformed route JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Accumulates the pieces of a route. Nothing is checked until `build`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteBuilder {
    method: Option<String>,
    path: Option<String>,
    status: Option<u16>,
    body: Option<Value>,
    headers: Vec<(String, String)>,
    activation: Vec<RouteBuilder>,
}

impl RouteBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a builder for `method path`.
    pub fn route(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new().method(method).path(path)
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::route("GET", path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::route("POST", path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::route("PUT", path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::route("PATCH", path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::route("DELETE", path)
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn status(mut self, code: u16) -> Self {
        self.status = Some(code);
        self
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Add a response header. A later header with the same name replaces it.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(&name));
        self.headers.push((name, value.into()));
        self
    }

    /// Register `child` every time this route is served.
    pub fn creates(mut self, child: RouteBuilder) -> Self {
        self.activation.push(child);
        self
    }

    /// Human-readable target for log lines, valid or not.
    pub fn describe(&self) -> String {
        format!(
            "{} {}",
            self.method.as_deref().unwrap_or("<no method>"),
            self.path.as_deref().unwrap_or("<no path>")
        )
    }

    /// Validate and produce an immutable definition.
    pub fn build(&self) -> Result<RouteDefinition, DefinitionError> {
        let method = self.method.as_deref().ok_or(DefinitionError::MissingMethod)?;
        let path = self.path.as_deref().ok_or(DefinitionError::MissingPath)?;
        let key = RouteKey::parse(method, path)?;

        let code = self.status.ok_or(DefinitionError::MissingStatus)?;
        // Informational codes cannot carry a final response.
        let status = StatusCode::from_u16(code)
            .ok()
            .filter(|status| !status.is_informational())
            .ok_or(DefinitionError::InvalidStatus(code))?;

        let mut headers = HeaderMap::new();
        for (name, value) in &self.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| DefinitionError::InvalidHeader(name.clone()))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|_| DefinitionError::InvalidHeader(format!("{}: {}", name, value)))?;
            headers.insert(header_name, header_value);
        }

        Ok(RouteDefinition {
            key,
            response: ResponseTemplate {
                status,
                body: self.body.clone().unwrap_or(Value::Null),
                headers,
            },
            activation: self.activation.clone(),
        })
    }
}
