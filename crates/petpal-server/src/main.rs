//! # PetPal Server
//!
//! Main entry point for the PetPal backend.

use petpal_config::{ConfigLoader, ObservabilityConfig};
use petpal_core::PetpalResult;
use petpal_server::{logging::init_logging, startup, AppBuilder};
use tokio::signal;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    let loader = match ConfigLoader::from_default_location() {
        Ok(loader) => loader,
        Err(e) => {
            init_logging(&ObservabilityConfig::default());
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&loader.get().observability);

    info!("Starting PetPal Server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(&loader).await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run(loader: &ConfigLoader) -> PetpalResult<()> {
    let config = loader.get().clone();

    info!("Environment: {}", config.app.environment);
    info!("Configuration directory: {}", loader.config_dir());

    startup::print_banner();
    startup::print_startup_info(&config);

    AppBuilder::new()
        .with_config(config)
        .build()?
        .run(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
