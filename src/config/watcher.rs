//! Endpoint file watcher for hot reload.

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;

use crate::config::loader::load_endpoints;
use crate::routing::declarative::RouteSpec;

/// Monitors the endpoint file and emits freshly parsed route sets.
pub struct EndpointWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<Vec<RouteSpec>>,
}

impl EndpointWatcher {
    /// Create a new watcher.
    ///
    /// Returns the watcher and a receiver for parsed endpoint updates.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<Vec<RouteSpec>>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching. The returned handle must be kept alive.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.update_tx.clone();
        let path = self.path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() {
                        tracing::info!(path = ?path, "Endpoint file change detected, reloading");
                        match load_endpoints(&path) {
                            Ok(specs) => {
                                let _ = tx.send(specs);
                            }
                            Err(e) => {
                                tracing::error!(error = %e, "Failed to reload endpoints, keeping current routes");
                            }
                        }
                    }
                }
                Err(e) => tracing::error!(error = ?e, "Watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Endpoint watcher started");
        Ok(watcher)
    }
}
