//! Caller-supplied connection configuration.
//!
//! The application's configuration loader owns how these values are sourced
//! (files, environment, flags); this crate only reads the struct during
//! channel construction.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Connection settings for one OTLP exporter channel.
///
/// Immutable for the lifetime of a construction call. Missing fields fall
/// back to the [`Default`] values when deserialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExporterConfig {
    /// Collector endpoint URI, e.g. `http://localhost:4317`.
    pub endpoint: String,

    /// Encrypt the channel with TLS. Also controls whether the per-call
    /// auth metadata declares transport security as required.
    pub tls_enabled: bool,

    /// Additional trusted CA roots as a PEM bundle. The system trust store
    /// is always used; this extends it for private collectors.
    pub tls_ca_pem: Option<String>,

    /// Expected TLS server name, when it differs from the endpoint host.
    pub tls_domain: Option<String>,

    /// Inactivity window after which the transport may close the
    /// connection; the next call reconnects transparently.
    pub idle_timeout: Duration,

    /// Interval between HTTP/2 keepalive pings.
    pub keepalive_interval: Duration,

    /// How long to wait for a keepalive ack before the connection is
    /// considered dead.
    pub keepalive_timeout: Duration,

    /// Per-call auth headers as `key=value,key=value`.
    pub headers: String,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:4317".into(),
            tls_enabled: false,
            tls_ca_pem: None,
            tls_domain: None,
            idle_timeout: Duration::from_secs(300),
            keepalive_interval: Duration::from_secs(30),
            keepalive_timeout: Duration::from_secs(5),
            headers: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ExporterConfig::default();
        assert_eq!(config.endpoint, "http://localhost:4317");
        assert!(!config.tls_enabled);
        assert_eq!(config.idle_timeout, Duration::from_secs(300));
        assert_eq!(config.keepalive_interval, Duration::from_secs(30));
        assert_eq!(config.keepalive_timeout, Duration::from_secs(5));
        assert!(config.headers.is_empty());
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let config: ExporterConfig = serde_json::from_str(
            r#"{"endpoint": "https://otlp.example.com:4317", "tls_enabled": true}"#,
        )
        .expect("partial config should deserialize");

        assert_eq!(config.endpoint, "https://otlp.example.com:4317");
        assert!(config.tls_enabled);
        assert_eq!(config.idle_timeout, Duration::from_secs(300));
        assert!(config.headers.is_empty());
    }
}
