//! Error types for exporter channel construction.

use thiserror::Error;

/// Error raised when the transport rejects the assembled channel
/// configuration.
///
/// Construction is the only fallible operation in this crate; header parsing
/// and credential selection are total. The error is returned to the caller
/// unchanged: no retry, no fallback credentials, no partial construction.
#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("failed to create exporter channel: {0}")]
    Construction(#[from] tonic::transport::Error),
}
