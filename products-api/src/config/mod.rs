//! Environment configuration for the products API.
//!
//! Every setting has a default, so the service starts with no environment at
//! all against a local OpenSearch on port 9200.

mod dependencies;

pub use dependencies::Dependencies;

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use products_repository::opensearch::INDEX_NAME;
use tracing::warn;

const DEFAULT_OPENSEARCH_HOST: &str = "localhost";
const DEFAULT_OPENSEARCH_PORT: u16 = 9200;
const DEFAULT_CONNECT_ATTEMPTS: u32 = 30;
const DEFAULT_RETRY_INTERVAL_SECS: u64 = 2;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_REQUEST_RETRIES: u32 = 0;
const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 8082;

/// Connection mode for OpenSearch at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionMode {
    /// Fail on the first unsuccessful ping.
    FailFast,
    /// Ping up to the configured number of attempts before giving up.
    Retry,
}

impl ConnectionMode {
    /// Parse a connection mode.
    ///
    /// Valid values: "fail-fast" or "retry" (case-insensitive).
    /// Defaults to "retry" if invalid.
    pub fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "fail-fast" | "failfast" | "fail_fast" => Self::FailFast,
            "retry" => Self::Retry,
            _ => {
                warn!(value, "Invalid OPENSEARCH_CONNECTION_MODE, defaulting to 'retry'");
                Self::Retry
            }
        }
    }
}

/// Runtime configuration of the service.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Base URL of the search engine.
    pub opensearch_url: String,
    /// Name of the product index.
    pub index_name: String,
    pub connection_mode: ConnectionMode,
    /// Startup ping attempts in retry mode.
    pub connect_attempts: u32,
    /// Delay between startup ping attempts.
    pub retry_interval: Duration,
    /// Per-request transport timeout.
    pub request_timeout: Duration,
    /// Transport-failure retries per engine request.
    pub request_retries: u32,
    /// Seed sample products when the index is created.
    pub seed_sample_data: bool,
    pub host: IpAddr,
    pub port: u16,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::from_vars(|_| None)
    }
}

impl ServiceConfig {
    /// Load the configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OPENSEARCH_HOST` / `OPENSEARCH_PORT`: Engine address (default: localhost:9200)
    /// - `OPENSEARCH_URL`: Full engine URL, overrides host and port
    /// - `PRODUCTS_INDEX`: Index name (default: "products")
    /// - `OPENSEARCH_CONNECTION_MODE`: "fail-fast" or "retry" (default: retry)
    /// - `OPENSEARCH_CONNECT_ATTEMPTS`: Startup ping attempts (default: 30)
    /// - `OPENSEARCH_RETRY_INTERVAL_SECS`: Delay between attempts (default: 2)
    /// - `OPENSEARCH_REQUEST_TIMEOUT_SECS`: Per-request timeout (default: 10)
    /// - `OPENSEARCH_REQUEST_RETRIES`: Transport retries per request (default: 0)
    /// - `SEED_SAMPLE_DATA`: Seed a freshly created index (default: true)
    /// - `HOST` / `PORT`: Listen address (default: 0.0.0.0:8082)
    ///
    /// `LOG_FORMAT` is read by `telemetry::LogFormat::from_env` before tracing starts.
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let opensearch_url = lookup("OPENSEARCH_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| {
                let host = lookup("OPENSEARCH_HOST")
                    .unwrap_or_else(|| DEFAULT_OPENSEARCH_HOST.to_string());
                let port = parse_or(&lookup, "OPENSEARCH_PORT", DEFAULT_OPENSEARCH_PORT);
                format!("http://{}:{}", host, port)
            });

        let connection_mode = lookup("OPENSEARCH_CONNECTION_MODE")
            .map(|v| ConnectionMode::parse(&v))
            .unwrap_or(ConnectionMode::Retry);

        Self {
            opensearch_url,
            index_name: lookup("PRODUCTS_INDEX").unwrap_or_else(|| INDEX_NAME.to_string()),
            connection_mode,
            connect_attempts: parse_or(&lookup, "OPENSEARCH_CONNECT_ATTEMPTS", DEFAULT_CONNECT_ATTEMPTS)
                .max(1),
            retry_interval: Duration::from_secs(parse_or(
                &lookup,
                "OPENSEARCH_RETRY_INTERVAL_SECS",
                DEFAULT_RETRY_INTERVAL_SECS,
            )),
            request_timeout: Duration::from_secs(parse_or(
                &lookup,
                "OPENSEARCH_REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )),
            request_retries: parse_or(&lookup, "OPENSEARCH_REQUEST_RETRIES", DEFAULT_REQUEST_RETRIES),
            seed_sample_data: parse_bool_or(&lookup, "SEED_SAMPLE_DATA", true),
            host: parse_or(&lookup, "HOST", DEFAULT_HOST),
            port: parse_or(&lookup, "PORT", DEFAULT_PORT),
        }
    }

    /// The socket address the HTTP server binds to.
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, "Invalid value, using default");
            default
        }),
        None => default,
    }
}

fn parse_bool_or<F>(lookup: &F, key: &str, default: bool) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).map(|v| v.trim().to_lowercase()) {
        Some(v) if matches!(v.as_str(), "true" | "1" | "yes" | "on") => true,
        Some(v) if matches!(v.as_str(), "false" | "0" | "no" | "off") => false,
        Some(v) => {
            warn!(key, value = %v, "Invalid boolean, using default");
            default
        }
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> ServiceConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServiceConfig::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::default();

        assert_eq!(config.opensearch_url, "http://localhost:9200");
        assert_eq!(config.index_name, "products");
        assert_eq!(config.connection_mode, ConnectionMode::Retry);
        assert_eq!(config.connect_attempts, 30);
        assert_eq!(config.retry_interval, Duration::from_secs(2));
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.request_retries, 0);
        assert!(config.seed_sample_data);
        assert_eq!(config.listen_addr().to_string(), "0.0.0.0:8082");
    }

    #[test]
    fn test_host_and_port_build_url() {
        let config = config_from(&[("OPENSEARCH_HOST", "search"), ("OPENSEARCH_PORT", "9300")]);
        assert_eq!(config.opensearch_url, "http://search:9300");
    }

    #[test]
    fn test_url_overrides_host_and_port() {
        let config = config_from(&[
            ("OPENSEARCH_URL", "https://engine.internal:443"),
            ("OPENSEARCH_HOST", "ignored"),
        ]);
        assert_eq!(config.opensearch_url, "https://engine.internal:443");
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PRODUCTS_INDEX", "catalog"),
            ("OPENSEARCH_CONNECTION_MODE", "fail-fast"),
            ("OPENSEARCH_CONNECT_ATTEMPTS", "5"),
            ("OPENSEARCH_RETRY_INTERVAL_SECS", "1"),
            ("OPENSEARCH_REQUEST_TIMEOUT_SECS", "3"),
            ("OPENSEARCH_REQUEST_RETRIES", "2"),
            ("SEED_SAMPLE_DATA", "false"),
            ("HOST", "127.0.0.1"),
            ("PORT", "9000"),
        ]);

        assert_eq!(config.index_name, "catalog");
        assert_eq!(config.connection_mode, ConnectionMode::FailFast);
        assert_eq!(config.connect_attempts, 5);
        assert_eq!(config.retry_interval, Duration::from_secs(1));
        assert_eq!(config.request_timeout, Duration::from_secs(3));
        assert_eq!(config.request_retries, 2);
        assert!(!config.seed_sample_data);
        assert_eq!(config.listen_addr().to_string(), "127.0.0.1:9000");
    }

    #[test]
    fn test_invalid_numbers_fall_back_to_defaults() {
        let config = config_from(&[
            ("OPENSEARCH_PORT", "not-a-port"),
            ("OPENSEARCH_CONNECT_ATTEMPTS", "-3"),
            ("PORT", "99999"),
            ("HOST", "nowhere"),
            ("SEED_SAMPLE_DATA", "maybe"),
        ]);

        assert_eq!(config.opensearch_url, "http://localhost:9200");
        assert_eq!(config.connect_attempts, 30);
        assert_eq!(config.port, 8082);
        assert_eq!(config.host, DEFAULT_HOST);
        assert!(config.seed_sample_data);
    }

    #[test]
    fn test_zero_attempts_means_one() {
        let config = config_from(&[("OPENSEARCH_CONNECT_ATTEMPTS", "0")]);
        assert_eq!(config.connect_attempts, 1);
    }

    #[test]
    fn test_connection_mode_parse() {
        assert_eq!(ConnectionMode::parse("FAIL_FAST"), ConnectionMode::FailFast);
        assert_eq!(ConnectionMode::parse("failfast"), ConnectionMode::FailFast);
        assert_eq!(ConnectionMode::parse("retry"), ConnectionMode::Retry);
        assert_eq!(ConnectionMode::parse("sometimes"), ConnectionMode::Retry);
    }
}
