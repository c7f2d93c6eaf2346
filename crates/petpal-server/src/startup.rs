//! Server startup utilities.

use petpal_config::AppConfig;
use tracing::info;

/// Prints the startup banner.
pub fn print_banner() {
    info!(r"
    ____       __  ____        __
   / __ \___  / /_/ __ \____ _/ /
  / /_/ / _ \/ __/ /_/ / __ `/ /
 / ____/  __/ /_/ ____/ /_/ / /
/_/    \___/\__/_/    \__,_/_/
    ");
}

/// Prints server startup information.
pub fn print_startup_info(config: &AppConfig) {
    let separator = "=".repeat(60);
    let addr = config.server.addr();
    info!("{}", separator);
    info!("REST API:  http://{}/api/forum/reddit/posts", addr);
    info!("Health:    http://{}/health", addr);
    info!("API Docs:  http://{}/swagger-ui", addr);
    info!("Upstream:  {}", config.reddit.base_url);
    info!(
        "Cache:     ttl={}s sweep={}s coalesce={}",
        config.cache.ttl_secs, config.cache.sweep_interval_secs, config.cache.coalesce_misses
    );
    info!("{}", separator);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_banner_does_not_panic() {
        let _ = tracing_subscriber::fmt::try_init();
        print_banner();
    }

    #[test]
    fn test_print_startup_info_does_not_panic() {
        let _ = tracing_subscriber::fmt::try_init();
        print_startup_info(&AppConfig::default());
    }
}
