//! JSON route objects.
//!
//! ```json
//! {
//!   "request":  { "url": "/dynamic", "method": "post" },
//!   "response": { "code": 201, "body": {}, "headers": { "X-Id": "1" } },
//!   "afterResponse": { "endpoints": [ { "request": ..., "response": ... } ] }
//! }
//! ```
//!
//! Every field is optional at the serde level; missing pieces are reported by
//! `RouteBuilder::build`, so both surfaces share one set of checks.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::routing::builder::{DefinitionError, RouteBuilder};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RouteSpec {
    #[serde(default)]
    pub request: RequestSpec,

    #[serde(default)]
    pub response: ResponseSpec,

    #[serde(
        default,
        rename = "afterResponse",
        alias = "after_response",
        skip_serializing_if = "Option::is_none"
    )]
    pub after_response: Option<AfterResponseSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RequestSpec {
    #[serde(default, alias = "path")]
    pub url: Option<String>,

    #[serde(default)]
    pub method: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ResponseSpec {
    #[serde(default, alias = "status")]
    pub code: Option<u16>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AfterResponseSpec {
    #[serde(default)]
    pub endpoints: Vec<RouteSpec>,
}

impl RouteSpec {
    pub fn from_json(text: &str) -> Result<Self, DefinitionError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_value(value: Value) -> Result<Self, DefinitionError> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn into_builder(self) -> RouteBuilder {
        RouteBuilder::from(self)
    }
}

impl From<RouteSpec> for RouteBuilder {
    fn from(spec: RouteSpec) -> Self {
        let mut builder = RouteBuilder::new();
        if let Some(method) = spec.request.method {
            builder = builder.method(method);
        }
        if let Some(url) = spec.request.url {
            builder = builder.path(url);
        }
        if let Some(code) = spec.response.code {
            builder = builder.status(code);
        }
        if let Some(body) = spec.response.body {
            builder = builder.body(body);
        }
        for (name, value) in spec.response.headers {
            builder = builder.header(name, value);
        }
        for child in spec.after_response.into_iter().flat_map(|a| a.endpoints) {
            builder = builder.creates(child.into());
        }
        builder
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EndpointDocument {
    Many(Vec<RouteSpec>),
    One(Box<RouteSpec>),
}

/// Parse an endpoint file: either a JSON array of route objects or a single one.
pub fn parse_endpoint_document(text: &str) -> Result<Vec<RouteSpec>, DefinitionError> {
    match serde_json::from_str::<EndpointDocument>(text)? {
        EndpointDocument::Many(specs) => Ok(specs),
        EndpointDocument::One(spec) => Ok(vec![*spec]),
    }
}
