use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let store_url = require("WOOCOMMERCE_STORE_URL")?;
    let consumer_key = require("WOOCOMMERCE_CONSUMER_KEY")?;
    let consumer_secret = require("WOOCOMMERCE_CONSUMER_SECRET")?;

    let env = parse_environment(&or_default("DZSHOP_ENV", "development"));

    let bind_addr = parse_addr("DZSHOP_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("DZSHOP_LOG_LEVEL", "info");
    let zones_url = lookup("DZSHOP_ZONES_URL").ok();
    let cache_dir = PathBuf::from(or_default("DZSHOP_CACHE_DIR", "./cache"));

    let http_timeout_secs = parse_u64("DZSHOP_HTTP_TIMEOUT_SECS", "30")?;
    let zones_ttl_secs = parse_u64("DZSHOP_ZONES_TTL_SECS", "300")?;
    let woo_max_retries = parse_u32("DZSHOP_WOO_MAX_RETRIES", "3")?;
    let woo_retry_backoff_base_ms = parse_u64("DZSHOP_WOO_RETRY_BACKOFF_BASE_MS", "1000")?;

    Ok(AppConfig {
        store_url,
        consumer_key,
        consumer_secret,
        env,
        bind_addr,
        log_level,
        zones_url,
        cache_dir,
        http_timeout_secs,
        zones_ttl_secs,
        woo_max_retries,
        woo_retry_backoff_base_ms,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    /// Returns a map with all required env vars populated with valid defaults.
    fn full_env<'a>() -> HashMap<&'a str, &'a str> {
        let mut m = HashMap::new();
        m.insert("WOOCOMMERCE_STORE_URL", "https://boutique.example.dz");
        m.insert("WOOCOMMERCE_CONSUMER_KEY", "ck_test");
        m.insert("WOOCOMMERCE_CONSUMER_SECRET", "cs_test");
        m
    }

    #[test]
    fn parse_environment_production() {
        assert_eq!(parse_environment("production"), Environment::Production);
    }

    #[test]
    fn parse_environment_unknown_defaults_to_development() {
        assert_eq!(parse_environment("staging"), Environment::Development);
    }

    #[test]
    fn build_app_config_fails_without_store_url() {
        let map: HashMap<&str, &str> = HashMap::new();
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "WOOCOMMERCE_STORE_URL"),
            "expected MissingEnvVar(WOOCOMMERCE_STORE_URL), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_fails_without_consumer_secret() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("WOOCOMMERCE_STORE_URL", "https://boutique.example.dz");
        map.insert("WOOCOMMERCE_CONSUMER_KEY", "ck_test");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "WOOCOMMERCE_CONSUMER_SECRET"),
            "expected MissingEnvVar(WOOCOMMERCE_CONSUMER_SECRET), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_fails_with_invalid_bind_addr() {
        let mut map = full_env();
        map.insert("DZSHOP_BIND_ADDR", "not-a-socket-addr");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "DZSHOP_BIND_ADDR"),
            "expected InvalidEnvVar(DZSHOP_BIND_ADDR), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_succeeds_with_all_required_vars() {
        let map = full_env();
        let result = build_app_config(lookup_from_map(&map));
        assert!(result.is_ok(), "expected Ok, got: {result:?}");
        let cfg = result.unwrap();
        assert_eq!(cfg.env, Environment::Development);
        assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
        assert_eq!(cfg.log_level, "info");
        assert!(cfg.zones_url.is_none());
        assert_eq!(cfg.cache_dir.to_string_lossy(), "./cache");
        assert_eq!(cfg.http_timeout_secs, 30);
        assert_eq!(cfg.zones_ttl_secs, 300);
        assert_eq!(cfg.woo_max_retries, 3);
        assert_eq!(cfg.woo_retry_backoff_base_ms, 1000);
    }

    #[test]
    fn build_app_config_zones_ttl_override() {
        let mut map = full_env();
        map.insert("DZSHOP_ZONES_TTL_SECS", "60");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.zones_ttl_secs, 60);
    }

    #[test]
    fn build_app_config_zones_ttl_invalid() {
        let mut map = full_env();
        map.insert("DZSHOP_ZONES_TTL_SECS", "five minutes");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "DZSHOP_ZONES_TTL_SECS"),
            "expected InvalidEnvVar(DZSHOP_ZONES_TTL_SECS), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_zones_url_override() {
        let mut map = full_env();
        map.insert("DZSHOP_ZONES_URL", "https://shop.example.dz/api/shipping");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(
            cfg.zones_url.as_deref(),
            Some("https://shop.example.dz/api/shipping")
        );
    }

    #[test]
    fn debug_redacts_credentials() {
        let map = full_env();
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("ck_test"), "consumer key leaked: {rendered}");
        assert!(!rendered.contains("cs_test"), "consumer secret leaked: {rendered}");
    }
}
