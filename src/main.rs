//! mockwire server binary.
//!
//! ```text
//! mockwire --file endpoints.json --port 3000 --watch
//! ```

use clap::Parser;
use std::path::PathBuf;

use mockwire::config::loader::{load_config, load_endpoints};
use mockwire::config::validation::validate_config;
use mockwire::config::watcher::EndpointWatcher;
use mockwire::engine::instance::load_routes;
use mockwire::lifecycle::signals::spawn_signal_handler;
use mockwire::observability::{logging, metrics};
use mockwire::{MockServer, ServerConfig};

#[derive(Parser)]
#[command(name = "mockwire")]
#[command(about = "Serve canned HTTP responses from declarative route definitions", long_about = None)]
struct Args {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on (overrides listener.bind_address's port).
    #[arg(short, long)]
    port: Option<u16>,

    /// JSON file of route definitions to load at startup.
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Reload routes when the endpoint file changes.
    #[arg(short, long)]
    watch: bool,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };
    apply_overrides(&mut config, &args)?;

    logging::init(&config.observability.log_level);
    tracing::info!("mockwire v{} starting", env!("CARGO_PKG_VERSION"));

    if let Err(errors) = validate_config(&config) {
        for error in &errors {
            tracing::error!(error = %error, "Invalid configuration");
        }
        return Err(format!("{} configuration error(s)", errors.len()).into());
    }

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        }
    }

    let mut server = MockServer::with_config(config.clone());

    let endpoint_file = config.endpoints.file.as_ref().map(PathBuf::from);
    if let Some(path) = &endpoint_file {
        let count = server.load_endpoints(load_endpoints(path)?)?;
        tracing::info!(path = ?path, routes = count, "Endpoints loaded");
    }

    let addr = server.listen_configured().await?;
    tracing::info!(address = %addr, control = config.control.enabled, "Mock server ready");

    if let Some(shutdown) = server.shutdown_handle() {
        spawn_signal_handler(shutdown);
    }

    // The watcher handle must outlive the serve loop.
    let _watcher = match (&endpoint_file, config.endpoints.watch) {
        (Some(path), true) => {
            let (watcher, mut updates) = EndpointWatcher::new(path);
            let handle = watcher.run()?;
            let registry = server.registry().clone();
            tokio::spawn(async move {
                while let Some(specs) = updates.recv().await {
                    match load_routes(&registry, specs) {
                        Ok(count) => tracing::info!(routes = count, "Endpoints reloaded"),
                        Err(e) => tracing::error!(error = %e, "Rejected endpoint reload, keeping current routes"),
                    }
                }
            });
            Some(handle)
        }
        _ => None,
    };

    server.wait_for_shutdown().await?;
    tracing::info!("Shutdown complete");
    Ok(())
}

fn apply_overrides(config: &mut ServerConfig, args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(port) = args.port {
        let mut addr: std::net::SocketAddr = config.listener.bind_address.parse()?;
        addr.set_port(port);
        config.listener.bind_address = addr.to_string();
    }
    if let Some(file) = &args.file {
        config.endpoints.file = Some(file.display().to_string());
    }
    if args.watch {
        config.endpoints.watch = true;
    }
    if let Some(level) = &args.log_level {
        config.observability.log_level = level.clone();
    }
    Ok(())
}
