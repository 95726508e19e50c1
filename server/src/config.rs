use std::time::Duration;

use clap::Parser;
use scraper_core::{DEFAULT_ENDPOINT, DEFAULT_TARGET_SITE};

/// Placeholder credential used when neither the request nor the environment
/// supplies one. The real provider rejects it.
pub const PLACEHOLDER_API_KEY: &str = "your_default_api_key";

/// Startup configuration, parsed once in `main` and passed into the server.
#[derive(Debug, Clone, Parser)]
#[command(name = "product-proxy")]
#[command(about = "HTTP façade for product lookups through a scraping provider")]
pub struct ServerConfig {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    #[arg(long, env = "SCRAPER_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub scraper_endpoint: String,

    #[arg(long, env = "TARGET_SITE", default_value = DEFAULT_TARGET_SITE)]
    pub target_site: String,

    /// Credential used when a request carries no `api_key` query parameter.
    #[arg(long, env = "SCRAPER_API_KEY", default_value = PLACEHOLDER_API_KEY)]
    pub default_api_key: String,

    #[arg(long, env = "UPSTREAM_TIMEOUT_SECS", default_value_t = 60)]
    pub upstream_timeout_secs: u64,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }

    pub fn uses_placeholder_key(&self) -> bool {
        self.default_api_key == PLACEHOLDER_API_KEY
    }
}
