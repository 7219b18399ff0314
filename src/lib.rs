//! Preconfigured gRPC channels for OpenTelemetry OTLP exporters.
//!
//! Builds the single long-lived channel a telemetry exporter ships traces,
//! metrics, and logs over. Construction decides three things:
//!
//! - **Transport credentials**: plaintext, or TLS with a trust store seeded
//!   from the system roots plus optional caller-supplied roots
//! - **Per-call auth metadata**: headers parsed from a `key=value,key=value`
//!   string and attached to every outbound call
//! - **Resilience parameters**: idle timeout, HTTP/2 keepalive, and a fixed
//!   exponential reconnect backoff curve
//!
//! The transport owns everything after construction: dialing, retries, and
//! keepalive probing. No network I/O happens here.
//!
//! # Modules
//!
//! - [`auth`]: per-call authentication metadata
//! - [`channel`]: channel assembly and resilience parameters
//! - [`config`]: caller-supplied connection configuration
//! - [`credentials`]: transport credential selection
//! - [`error`]: construction error
//!
//! # Example
//!
//! ```no_run
//! use otlp_channel::{ExporterChannel, ExporterConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), otlp_channel::ChannelError> {
//! let config = ExporterConfig {
//!     endpoint: "https://collector.example.com:4317".into(),
//!     tls_enabled: true,
//!     headers: "api-key=secret".into(),
//!     ..ExporterConfig::default()
//! };
//!
//! let channel = ExporterChannel::build(&config)?;
//! // Plugs directly into tonic-generated service clients.
//! let _service = channel.into_service();
//! # Ok(())
//! # }
//! ```

// Lint configuration
#![warn(clippy::all)]
#![allow(
    clippy::module_name_repetitions, // channel::ChannelConfig is fine
    clippy::must_use_candidate       // Not all functions need #[must_use]
)]

pub mod auth;
pub mod channel;
pub mod config;
pub mod credentials;
pub mod error;

pub use auth::CallAuthenticator;
pub use channel::{BackoffPolicy, ChannelConfig, ExporterChannel, KeepaliveParams};
pub use config::ExporterConfig;
pub use credentials::{TlsCredentials, TransportCredentials};
pub use error::ChannelError;
