//! Per-call authentication metadata.
//!
//! Parses the delimited header configuration into a fixed metadata map and
//! attaches it to every outbound call on the channel.

use std::collections::HashMap;

use tonic::metadata::{AsciiMetadataKey, AsciiMetadataValue, KeyAndValueRef, MetadataMap};
use tonic::service::Interceptor;
use tonic::{Request, Status};
use tracing::warn;

/// Attaches a fixed set of auth headers to every outbound call.
///
/// The header string uses the `key=value,key=value` grammar: the first `=`
/// splits an entry, whitespace around key and value is trimmed, and a later
/// duplicate key replaces an earlier one. Entries without an `=`, or with an
/// empty key after trimming, are dropped silently rather than rejected, so a
/// typo in the header string loses that header instead of failing startup.
///
/// The parsed map is immutable after construction, so clones can serve any
/// number of concurrent in-flight calls without locking.
#[derive(Debug, Clone)]
pub struct CallAuthenticator {
    headers: HashMap<String, String>,
    metadata: MetadataMap,
    tls_enabled: bool,
}

impl CallAuthenticator {
    /// Parse the raw header string and capture the transport security flag.
    ///
    /// Never fails: an empty or fully malformed input yields an empty map.
    pub fn new(raw_headers: &str, tls_enabled: bool) -> Self {
        let headers = parse_headers(raw_headers);
        let metadata = to_metadata(&headers);

        Self {
            headers,
            metadata,
            tls_enabled,
        }
    }

    /// The parsed header map attached to every call.
    ///
    /// Total and non-blocking, for any call context.
    pub fn request_metadata(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Whether transport security is required for these headers to be
    /// honored.
    ///
    /// Always equals the TLS flag the channel was built with: auth headers
    /// and channel encryption must never diverge.
    pub fn requires_transport_security(&self) -> bool {
        self.tls_enabled
    }
}

impl Interceptor for CallAuthenticator {
    fn call(&mut self, mut request: Request<()>) -> Result<Request<()>, Status> {
        for entry in self.metadata.iter() {
            if let KeyAndValueRef::Ascii(key, value) = entry {
                request.metadata_mut().insert(key.clone(), value.clone());
            }
        }
        Ok(request)
    }
}

/// Split `key=value,key=value` into a map.
///
/// Only the first `=` in an entry splits it; the value may contain further
/// `=` characters. Malformed entries are discarded, last duplicate wins.
fn parse_headers(raw: &str) -> HashMap<String, String> {
    let mut headers = HashMap::new();

    for entry in raw.split(',') {
        let Some((key, value)) = entry.split_once('=') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        headers.insert(key.to_string(), value.trim().to_string());
    }

    headers
}

/// Materialize the parsed map as gRPC metadata.
///
/// Entries that are not valid ASCII metadata cannot be carried on the wire;
/// they stay visible in the parsed map but are dropped here with a warning.
fn to_metadata(headers: &HashMap<String, String>) -> MetadataMap {
    let mut metadata = MetadataMap::with_capacity(headers.len());

    for (key, value) in headers {
        match (
            key.parse::<AsciiMetadataKey>(),
            value.parse::<AsciiMetadataValue>(),
        ) {
            (Ok(key), Ok(value)) => {
                metadata.insert(key, value);
            }
            _ => warn!(header = %key, "header is not valid gRPC metadata, dropping"),
        }
    }

    metadata
}
