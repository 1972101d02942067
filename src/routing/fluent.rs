//! Chained route construction bound to a live registry.
//!
//! `server.get("/fluent").status(300).body(json!({..}))` registers the route
//! immediately and re-registers it after every call, so there is no terminal
//! method to forget. Each re-registration is a full replace of the key.

use serde_json::{json, Value};
use std::sync::Arc;

use crate::routing::builder::{DefinitionError, RouteBuilder};
use crate::routing::registry::RouteRegistry;

#[must_use = "chain further calls or call `finish` to surface validation errors"]
pub struct FluentRoute {
    registry: Arc<RouteRegistry>,
    builder: RouteBuilder,
}

impl FluentRoute {
    /// New fluent routes answer `200` with `{}` until told otherwise.
    pub(crate) fn start(registry: Arc<RouteRegistry>, method: &str, path: &str) -> Self {
        let builder = RouteBuilder::route(method, path).status(200).body(json!({}));
        let route = Self { registry, builder };
        route.commit();
        route
    }

    pub fn status(self, code: u16) -> Self {
        self.update(|b| b.status(code))
    }

    pub fn body(self, body: Value) -> Self {
        self.update(|b| b.body(body))
    }

    pub fn header(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.update(|b| b.header(name, value))
    }

    /// Register `child` each time this route is served.
    pub fn creates(self, child: RouteBuilder) -> Self {
        self.update(|b| b.creates(child))
    }

    /// The accumulated, unvalidated route.
    pub fn builder(&self) -> &RouteBuilder {
        &self.builder
    }

    /// Validate the final state, reporting what intermediate commits only logged.
    pub fn finish(self) -> Result<(), DefinitionError> {
        let definition = self.builder.build()?;
        self.registry.register(definition);
        Ok(())
    }

    fn update(mut self, f: impl FnOnce(RouteBuilder) -> RouteBuilder) -> Self {
        self.builder = f(self.builder);
        self.commit();
        self
    }

    fn commit(&self) {
        match self.builder.build() {
            Ok(definition) => self.registry.register(definition),
            Err(e) => {
                tracing::error!(
                    route = %self.builder.describe(),
                    error = %e,
                    "Fluent route rejected, keeping previous state"
                );
            }
        }
    }
}
