//! Route definitions and their registry key.
//!
//! A `RouteDefinition` is immutable once built. The registry hands out
//! `Arc<RouteDefinition>` so readers never hold a mutable alias; changing a
//! route means registering a new definition under the same key.

use axum::http::{HeaderMap, Method, StatusCode};
use serde_json::Value;
use std::fmt;

use crate::routing::builder::{DefinitionError, RouteBuilder};

/// Registry key: normalized method plus literal path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteKey {
    pub method: Method,
    pub path: String,
}

impl RouteKey {
    /// Build a key from raw caller input, normalizing both parts.
    pub fn parse(method: &str, path: &str) -> Result<Self, DefinitionError> {
        Ok(Self {
            method: normalize_method(method)?,
            path: normalize_definition_path(path)?,
        })
    }

    /// Build a key for an inbound request target. The query string is dropped.
    ///
    /// Returns `None` when the method is not a valid HTTP token, which simply
    /// means nothing can match.
    pub fn for_request(method: &str, target: &str) -> Option<Self> {
        let method = normalize_method(method).ok()?;
        Some(Self {
            method,
            path: strip_query(target).to_string(),
        })
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

/// Canned response served for a matched route.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseTemplate {
    pub status: StatusCode,
    pub body: Value,
    pub headers: HeaderMap,
}

/// A validated route: match key, response template, and the routes to
/// activate once the response has been rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteDefinition {
    pub key: RouteKey,
    pub response: ResponseTemplate,
    /// Nested routes, kept unvalidated until activation so that one broken
    /// entry cannot block the others.
    pub activation: Vec<RouteBuilder>,
}

impl RouteDefinition {
    pub fn method(&self) -> &Method {
        &self.key.method
    }

    pub fn path(&self) -> &str {
        &self.key.path
    }

    /// True when serving this route registers nothing.
    pub fn is_static(&self) -> bool {
        self.activation.is_empty()
    }
}

/// Uppercase and validate an HTTP method token.
pub fn normalize_method(method: &str) -> Result<Method, DefinitionError> {
    let trimmed = method.trim();
    if trimmed.is_empty() {
        return Err(DefinitionError::MissingMethod);
    }
    Method::from_bytes(trimmed.to_ascii_uppercase().as_bytes())
        .map_err(|_| DefinitionError::InvalidMethod(method.to_string()))
}

fn normalize_definition_path(path: &str) -> Result<String, DefinitionError> {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return Err(DefinitionError::MissingPath);
    }
    if !trimmed.starts_with('/') || trimmed.contains(['?', '#']) {
        return Err(DefinitionError::InvalidPath(path.to_string()));
    }
    Ok(trimmed.to_string())
}

/// Path component of a request target, case preserved.
pub fn strip_query(target: &str) -> &str {
    let end = target.find(['?', '#']).unwrap_or(target.len());
    &target[..end]
}
