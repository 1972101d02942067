//! After-response activation.
//!
//! Serving a route that carries an activation list registers each nested
//! route, in declaration order. It runs on every hit; re-registering the same
//! key is a replace, so repeated hits are harmless. A nested route that fails
//! validation is skipped and the rest still register.

use crate::observability::metrics;
use crate::routing::definition::RouteDefinition;
use crate::routing::registry::RouteRegistry;

/// Outcome counts for one activation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActivationReport {
    pub registered: usize,
    pub skipped: usize,
}

pub fn activate(registry: &RouteRegistry, definition: &RouteDefinition) -> ActivationReport {
    let mut report = ActivationReport::default();

    for pending in &definition.activation {
        match pending.build() {
            Ok(child) => {
                tracing::info!(trigger = %definition.key, route = %child.key, "Activating route");
                registry.register(child);
                report.registered += 1;
            }
            Err(e) => {
                tracing::warn!(
                    trigger = %definition.key,
                    route = %pending.describe(),
                    error = %e,
                    "Skipping malformed activation"
                );
                report.skipped += 1;
            }
        }
    }

    if report.registered > 0 {
        metrics::record_activations("registered", report.registered);
    }
    if report.skipped > 0 {
        metrics::record_activations("skipped", report.skipped);
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::builder::RouteBuilder;
    use crate::routing::definition::RouteKey;

    #[test]
    fn test_static_route_activates_nothing() {
        let registry = RouteRegistry::new();
        let def = RouteBuilder::get("/static").status(200).build().unwrap();
        assert_eq!(activate(&registry, &def), ActivationReport::default());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_malformed_child_is_skipped() {
        let registry = RouteRegistry::new();
        let def = RouteBuilder::post("/parent")
            .status(201)
            .creates(RouteBuilder::get("/no-status"))
            .creates(RouteBuilder::get("/ok").status(200))
            .creates(RouteBuilder::route("GET", "missing-slash").status(200))
            .build()
            .unwrap();

        let report = activate(&registry, &def);
        assert_eq!(report, ActivationReport { registered: 1, skipped: 2 });
        assert!(registry.lookup(&RouteKey::parse("GET", "/ok").unwrap()).is_some());
    }

    #[test]
    fn test_later_child_overwrites_earlier() {
        let registry = RouteRegistry::new();
        let def = RouteBuilder::post("/parent")
            .status(201)
            .creates(RouteBuilder::get("/child").status(200))
            .creates(RouteBuilder::get("/child").status(202))
            .build()
            .unwrap();

        activate(&registry, &def);
        let child = registry.lookup(&RouteKey::parse("GET", "/child").unwrap()).unwrap();
        assert_eq!(child.response.status.as_u16(), 202);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_activated_route_keeps_its_own_activations() {
        let registry = RouteRegistry::new();
        let def = RouteBuilder::post("/a")
            .status(201)
            .creates(RouteBuilder::get("/b").status(200).creates(RouteBuilder::get("/c").status(200)))
            .build()
            .unwrap();

        activate(&registry, &def);
        let b = registry.lookup(&RouteKey::parse("GET", "/b").unwrap()).unwrap();
        assert!(!b.is_static());
        assert!(registry.lookup(&RouteKey::parse("GET", "/c").unwrap()).is_none());

        activate(&registry, &b);
        assert!(registry.lookup(&RouteKey::parse("GET", "/c").unwrap()).is_some());
    }
}
