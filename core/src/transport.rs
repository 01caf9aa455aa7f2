//! Transport contract for the injected-IO pattern.
//!
//! # Design
//! The client never opens a socket itself. Every request goes through a
//! caller-supplied [`Transport`], which receives the fully built URL string
//! and the client's opaque [`TransportOptions`] and resolves to a
//! [`TransportResponse`]. This keeps the core free of any HTTP stack and
//! lets tests inject an in-memory transport.
//!
//! The response is a tagged union rather than a duck-typed probe: a
//! transport either hands back undecoded JSON text (`Body`, fetch-style) or
//! a body it already decoded itself (`Data`, in the style of HTTP libraries
//! that deserialize for you). The normalizer pattern-matches on the variant,
//! so a response of "neither shape" cannot exist.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::TransportError;

/// Opaque per-client options handed unmodified to every transport call.
///
/// The client never inspects this; interpretation is entirely up to the
/// transport implementation.
#[derive(Debug, Clone, Default)]
pub struct TransportOptions {
    /// Header name/value pairs the transport should attach to each request.
    pub headers: Vec<(String, String)>,
    /// Free-form settings for transport implementations with knobs the
    /// header list cannot express.
    pub extensions: serde_json::Map<String, Value>,
}

/// The two response shapes a transport may produce.
#[derive(Debug, Clone)]
pub enum TransportResponse {
    /// Undecoded JSON text; the client runs the decode step.
    Body(String),
    /// A body the transport already decoded.
    Data(Value),
}

/// An HTTP GET mechanism injected into the client.
///
/// Implementations own everything the client deliberately does not:
/// connection handling, timeouts, retries, authentication. A non-2xx status
/// may be reported either as `Err(TransportError::Status { .. })` or as a
/// successful response carrying the error body, whichever matches the
/// upstream API's conventions.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute a GET request against `url` and resolve to a response.
    async fn send(
        &self,
        url: &str,
        options: &TransportOptions,
    ) -> Result<TransportResponse, TransportError>;
}
