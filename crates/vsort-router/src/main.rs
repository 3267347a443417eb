//! Classification router worker binary.

use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use vsort_router::{metrics, ClassificationRouter, RouterConfig, SourcePoller};
use vsort_storage::BlobClient;
use vsort_vision::VisionClient;

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for TLS/HTTPS)
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env()
        .add_directive("vsort=info".parse().unwrap())
        .add_directive("aws_config=warn".parse().unwrap())
        .add_directive("hyper=warn".parse().unwrap());

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    info!("Starting vsort-router");

    // Optional Prometheus scrape endpoint
    if let Ok(addr) = std::env::var("METRICS_ADDR") {
        match addr.parse() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    error!("Failed to install metrics exporter: {}", e);
                    std::process::exit(1);
                }
                info!("Metrics exporter listening on {}", addr);
            }
            Err(e) => {
                error!("Invalid METRICS_ADDR '{}': {}", addr, e);
                std::process::exit(1);
            }
        }
    }

    // Load configuration
    let config = RouterConfig::from_env();
    info!("Router config: {:?}", config);

    // Create vision client
    let vision = match VisionClient::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to create vision client: {}", e);
            std::process::exit(1);
        }
    };

    // Create storage client and verify the bucket is reachable
    let store = match BlobClient::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to create storage client: {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = store.check_connectivity().await {
        error!("Storage connectivity check failed: {}", e);
        std::process::exit(1);
    }

    // Wire the handler and trigger adapter
    let router = ClassificationRouter::new(vision, store.clone(), config.clone());
    let poller = SourcePoller::new(router, store, config);

    // Setup shutdown signal
    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("Received shutdown signal");
        shutdown_tx.send(true).ok();
    });

    // Run the poller
    if let Err(e) = poller.run(shutdown_rx).await {
        error!("Poller error: {}", e);
        std::process::exit(1);
    }

    info!("Router shutdown complete");
}
