//! Application builder.

use axum::Router;
use petpal_config::{format_validation_errors, AppConfig, ConfigValidator};
use petpal_core::{PetpalError, PetpalResult};
use petpal_rest::{create_router, AppState};
use petpal_service::{
    CacheSweeper, ForumOptions, ForumService, ForumServiceImpl, PostCache, RedditFetcher,
};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

/// Application builder for constructing the server.
pub struct AppBuilder {
    config: Option<AppConfig>,
}

impl AppBuilder {
    /// Creates a new application builder.
    #[must_use]
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Sets the configuration.
    #[must_use]
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Validates the configuration, then wires the fetcher, cache, forum
    /// service, sweeper and router.
    pub fn build(self) -> PetpalResult<Application> {
        let config = self.config.unwrap_or_default();
        ConfigValidator::validate(&config)
            .map_err(|errors| PetpalError::Configuration(format_validation_errors(&errors)))?;

        let fetcher = Arc::new(RedditFetcher::new(&config.reddit)?);
        let cache = Arc::new(PostCache::new());
        let forum_service: Arc<dyn ForumService> = Arc::new(ForumServiceImpl::new(
            fetcher,
            cache,
            ForumOptions::from_config(&config.cache, &config.reddit),
        ));

        let sweeper = Arc::new(CacheSweeper::new(
            forum_service.clone(),
            config.cache.sweep_interval(),
        ));
        let router = create_router(AppState::new(forum_service), &config.server);

        Ok(Application {
            config,
            router,
            sweeper,
        })
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A fully wired application, ready to serve.
pub struct Application {
    config: AppConfig,
    router: Router,
    sweeper: Arc<CacheSweeper>,
}

impl Application {
    /// The configuration the application was built with.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Binds the configured address and serves until `shutdown` resolves.
    pub async fn run<F>(self, shutdown: F) -> PetpalResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.config.server.addr();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| PetpalError::Internal(format!("Failed to bind {addr}: {e}")))?;
        self.serve(listener, shutdown).await
    }

    /// Serves on an already bound listener until `shutdown` resolves.
    ///
    /// The cache sweeper runs alongside the server and is stopped once the
    /// server has drained.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> PetpalResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let sweeper_task = tokio::spawn({
            let sweeper = self.sweeper.clone();
            async move {
                if let Err(e) = sweeper.start().await {
                    error!("Cache sweeper error: {}", e);
                }
            }
        });

        if let Ok(addr) = listener.local_addr() {
            info!("Starting REST server on http://{}", addr);
        }

        let result = axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| PetpalError::Internal(format!("REST server error: {e}")));

        self.sweeper.shutdown();
        if let Err(e) = sweeper_task.await {
            error!("Cache sweeper task failed: {}", e);
        }

        info!("Server shutdown complete");
        result
    }

    /// Whether the background cache sweeper is running.
    #[must_use]
    pub fn sweeper_running(&self) -> bool {
        self.sweeper.is_running()
    }
}
