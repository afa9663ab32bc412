use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub store_url: String,
    pub consumer_key: String,
    pub consumer_secret: String,
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// URL of the aggregated zones endpoint consumed by the zone repository.
    /// When unset the server derives it from its own bind address.
    pub zones_url: Option<String>,
    pub cache_dir: PathBuf,
    pub http_timeout_secs: u64,
    pub zones_ttl_secs: u64,
    pub woo_max_retries: u32,
    pub woo_retry_backoff_base_ms: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("store_url", &self.store_url)
            .field("consumer_key", &"[redacted]")
            .field("consumer_secret", &"[redacted]")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("zones_url", &self.zones_url)
            .field("cache_dir", &self.cache_dir)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("zones_ttl_secs", &self.zones_ttl_secs)
            .field("woo_max_retries", &self.woo_max_retries)
            .field("woo_retry_backoff_base_ms", &self.woo_retry_backoff_base_ms)
            .finish()
    }
}
