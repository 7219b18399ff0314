//! Transport credential selection.
//!
//! Decides whether the exporter channel is encrypted and builds the matching
//! credential object. Only two shapes exist, so this is a closed enum rather
//! than a trait.

use tonic::transport::{Certificate, ClientTlsConfig};

use crate::config::ExporterConfig;

/// Transport-level credentials for the exporter channel.
#[derive(Debug, Clone)]
pub enum TransportCredentials {
    /// Plaintext transport, no encryption.
    Insecure,
    /// TLS with the system trust store, optional extra roots, and an
    /// optional server-name override.
    Tls(TlsCredentials),
}

/// TLS credential material presented to the transport at first dial.
#[derive(Debug, Clone)]
pub struct TlsCredentials {
    root_bundle: Option<Certificate>,
    domain_override: Option<String>,
}

impl TransportCredentials {
    /// Select credentials for the given configuration.
    ///
    /// Pure construction: no network I/O, cannot fail. PEM validity is
    /// checked by the transport, not here.
    pub fn select(config: &ExporterConfig) -> Self {
        if !config.tls_enabled {
            return Self::Insecure;
        }

        Self::Tls(TlsCredentials {
            root_bundle: config.tls_ca_pem.as_deref().map(Certificate::from_pem),
            domain_override: config.tls_domain.clone(),
        })
    }

    /// Whether this credential object encrypts the transport.
    pub fn is_tls(&self) -> bool {
        matches!(self, Self::Tls(_))
    }
}

impl TlsCredentials {
    /// Caller-supplied extra trust roots, if any.
    pub fn root_bundle(&self) -> Option<&Certificate> {
        self.root_bundle.as_ref()
    }

    /// Server-name override, if any.
    pub fn domain_override(&self) -> Option<&str> {
        self.domain_override.as_deref()
    }

    /// Build the tonic TLS configuration: system roots always, then the
    /// caller's bundle, then the server-name override.
    pub(crate) fn client_tls_config(&self) -> ClientTlsConfig {
        let mut tls = ClientTlsConfig::new().with_native_roots();

        if let Some(bundle) = &self.root_bundle {
            tls = tls.ca_certificate(bundle.clone());
        }
        if let Some(domain) = &self.domain_override {
            tls = tls.domain_name(domain.as_str());
        }

        tls
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insecure_when_tls_disabled() {
        let config = ExporterConfig::default();
        let credentials = TransportCredentials::select(&config);
        assert!(matches!(credentials, TransportCredentials::Insecure));
        assert!(!credentials.is_tls());
    }

    #[test]
    fn test_tls_when_enabled() {
        let config = ExporterConfig {
            tls_enabled: true,
            ..ExporterConfig::default()
        };

        let credentials = TransportCredentials::select(&config);
        assert!(credentials.is_tls());

        let TransportCredentials::Tls(tls) = credentials else {
            panic!("expected TLS credentials");
        };
        assert!(tls.root_bundle().is_none());
        assert!(tls.domain_override().is_none());
    }

    #[test]
    fn test_tls_carries_custom_roots_and_override() {
        let config = ExporterConfig {
            tls_enabled: true,
            tls_ca_pem: Some("-----BEGIN CERTIFICATE-----\n".into()),
            tls_domain: Some("collector.internal".into()),
            ..ExporterConfig::default()
        };

        let TransportCredentials::Tls(tls) = TransportCredentials::select(&config) else {
            panic!("expected TLS credentials");
        };
        assert!(tls.root_bundle().is_some());
        assert_eq!(tls.domain_override(), Some("collector.internal"));
    }
}
