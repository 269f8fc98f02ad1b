//! geoplaces - a places listing and recommendation service.
//!
//! This binary starts the HTTP server and wires all components together
//! exactly once: configuration → store client → token authority → router.

use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use geoplaces::{
    auth::TokenAuthority,
    config::Config,
    server::{create_router, RouterConfig},
    store::ElasticStore,
};

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    // Initialize logging
    init_logging(config.verbose);

    // Validate configuration
    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    info!("geoplaces v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration:");
    info!("  Search index: {}", config.elastic_url);
    info!("  Index name: {}", config.index);

    // Create the store client and test connectivity before serving
    let store = ElasticStore::new(&config.elastic_url, &config.index);

    info!("");
    info!("Connecting to the search store...");
    match store.ping().await {
        Ok(()) => {
            info!("  Connected successfully");
        }
        Err(e) => {
            error!("  Failed to reach the search store: {}", e);
            error!("");
            error!("  Please check:");
            error!("    - The store is running at '{}'", config.elastic_url);
            error!("    - The URL is correct (set --elastic-url or GEOPLACES_ELASTIC_URL)");
            return ExitCode::FAILURE;
        }
    }

    // Token authority over the shared secret
    let auth = TokenAuthority::new(config.secret_or_empty());

    // Build the router
    let router_config = build_router_config(&config);
    let router = create_router(store, auth, router_config);

    // Bind and serve
    let addr = config.bind_address();

    info!("");
    info!("────────────────────────────────────────────────────────────────");
    info!("  Server listening on: http://{}", addr);
    info!("");
    info!("  Try these endpoints:");
    info!("    curl http://{}/health", addr);
    info!("    curl http://{}/api/places?page=1", addr);
    info!("    curl http://{}/api/get_token", addr);
    info!("────────────────────────────────────────────────────────────────");
    info!("");

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = axum::serve(listener, router).await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "geoplaces=debug,tower_http=debug"
    } else {
        "geoplaces=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build RouterConfig from the application Config.
fn build_router_config(config: &Config) -> RouterConfig {
    let mut router_config = RouterConfig::new().with_tracing(!config.no_tracing);

    if let Some(ref origins) = config.cors_origins {
        router_config = router_config.with_cors_origins(origins.clone());
    }

    router_config
}
