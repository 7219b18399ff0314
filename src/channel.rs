//! Channel assembly for OTLP exporters.
//!
//! Combines transport credentials, per-call auth metadata, and resilience
//! parameters into one configuration bundle and hands it to the tonic
//! channel constructor exactly once. The channel is opened lazily: the
//! first dial, keepalive pings, and reconnection are owned by the
//! transport.

use std::time::Duration;

use tonic::service::interceptor::InterceptedService;
use tonic::transport::{Channel, Endpoint};
use tracing::debug;

use crate::auth::CallAuthenticator;
use crate::config::ExporterConfig;
use crate::credentials::TransportCredentials;
use crate::error::ChannelError;

/// Delay schedule between successive reconnect attempts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackoffPolicy {
    /// Delay before the first retry.
    pub base_delay: Duration,
    /// Growth factor applied after each failed attempt.
    pub multiplier: f64,
    /// Upper bound on the delay between attempts.
    pub max_delay: Duration,
    /// Floor on the time allowed for a single connect attempt; zero means
    /// no artificial floor.
    pub min_connect_timeout: Duration,
}

impl BackoffPolicy {
    /// Fixed curve for exporter channels, shared by every instance and not
    /// caller-configurable: bounds reconnect pressure during a collector
    /// outage while keeping first-retry latency low.
    pub const EXPORTER: Self = Self {
        base_delay: Duration::from_secs(1),
        multiplier: 1.6,
        max_delay: Duration::from_secs(15),
        min_connect_timeout: Duration::ZERO,
    };
}

/// HTTP/2 keepalive parameters, passed through from caller configuration
/// unmodified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeepaliveParams {
    /// Interval between pings on an established connection.
    pub interval: Duration,
    /// How long to wait for a ping ack before the connection is considered
    /// dead.
    pub timeout: Duration,
}

/// The assembled argument set for the channel constructor.
///
/// [`ChannelConfig::assemble`] is pure; [`ExporterChannel::build`] consumes
/// the bundle. Keeping the two apart keeps the parameter policy testable
/// without opening a transport.
#[derive(Debug, Clone)]
pub struct ChannelConfig {
    /// Collector endpoint URI.
    pub endpoint: String,
    /// Transport credentials chosen for the endpoint.
    pub credentials: TransportCredentials,
    /// Inactivity window after which the transport may close the
    /// connection.
    pub idle_timeout: Duration,
    /// Keepalive probe parameters.
    pub keepalive: KeepaliveParams,
    /// Reconnect delay schedule.
    pub backoff: BackoffPolicy,
}

impl ChannelConfig {
    /// Assemble the constructor argument set from caller configuration.
    ///
    /// Idle and keepalive settings pass through unmodified; the backoff
    /// curve is always [`BackoffPolicy::EXPORTER`].
    pub fn assemble(config: &ExporterConfig) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
            credentials: TransportCredentials::select(config),
            idle_timeout: config.idle_timeout,
            keepalive: KeepaliveParams {
                interval: config.keepalive_interval,
                timeout: config.keepalive_timeout,
            },
            backoff: BackoffPolicy::EXPORTER,
        }
    }

    /// Hand the bundle to the tonic constructor.
    ///
    /// Maps the knobs the transport exposes: TLS credentials, keepalive
    /// interval and timeout, and a connect timeout when the backoff policy
    /// sets a non-zero floor. Reconnect pacing after handoff belongs to the
    /// transport.
    fn open(&self) -> Result<Channel, ChannelError> {
        let mut endpoint = Endpoint::from_shared(self.endpoint.clone())?;

        if let TransportCredentials::Tls(tls) = &self.credentials {
            endpoint = endpoint.tls_config(tls.client_tls_config())?;
        }

        endpoint = endpoint
            .http2_keep_alive_interval(self.keepalive.interval)
            .keep_alive_timeout(self.keepalive.timeout);

        if !self.backoff.min_connect_timeout.is_zero() {
            endpoint = endpoint.connect_timeout(self.backoff.min_connect_timeout);
        }

        Ok(endpoint.connect_lazy())
    }
}

/// A ready-to-use exporter channel: the lazy transport channel plus the
/// per-call authenticator that rides on it.
///
/// Cheap to clone; one channel serves many concurrent calls.
#[derive(Debug, Clone)]
pub struct ExporterChannel {
    channel: Channel,
    auth: CallAuthenticator,
}

impl ExporterChannel {
    /// Build a channel for exporting telemetry to an OTLP collector.
    ///
    /// Construction is synchronous and performs no network I/O: the channel
    /// connects on first use and the transport owns all subsequent
    /// connect/retry behavior. Must be called from within a Tokio runtime,
    /// which the channel's background machinery runs on.
    ///
    /// The authenticator's transport-security answer is captured from the
    /// same TLS flag that selected the credentials, so the two cannot
    /// diverge.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::Construction`] if the transport rejects the
    /// assembled configuration, e.g. a malformed endpoint.
    pub fn build(config: &ExporterConfig) -> Result<Self, ChannelError> {
        let assembled = ChannelConfig::assemble(config);
        let auth = CallAuthenticator::new(&config.headers, config.tls_enabled);

        debug!(
            endpoint = %assembled.endpoint,
            tls = config.tls_enabled,
            headers = auth.request_metadata().len(),
            "assembling OTLP exporter channel"
        );

        let channel = assembled.open()?;
        Ok(Self { channel, auth })
    }

    /// The underlying transport channel.
    pub fn channel(&self) -> &Channel {
        &self.channel
    }

    /// The per-call authenticator attached to this channel.
    pub fn authenticator(&self) -> &CallAuthenticator {
        &self.auth
    }

    /// Wrap the channel so every outbound call carries the auth metadata.
    ///
    /// The result plugs directly into tonic-generated service clients.
    pub fn into_service(self) -> InterceptedService<Channel, CallAuthenticator> {
        InterceptedService::new(self.channel, self.auth)
    }

    /// Split into the raw channel and authenticator, for callers that wire
    /// the metadata through an exporter builder instead of an interceptor.
    pub fn into_parts(self) -> (Channel, CallAuthenticator) {
        (self.channel, self.auth)
    }
}
