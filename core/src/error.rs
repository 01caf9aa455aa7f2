//! Error types for the content API client.
//!
//! # Design
//! Transport failures get their own nested type because they are the only
//! errors the client's error hook ever observes: URL construction and body
//! decoding fail before or after the transport boundary and propagate
//! directly to the caller.

use thiserror::Error;

/// Errors returned by `ContentClient` operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The builder was finalized without a required field.
    #[error("client configuration is missing {0}")]
    Config(&'static str),

    /// The configured base URL could not be parsed. Surfaces at call time,
    /// not at construction, and is never routed through the error hook.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The injected transport failed. The error hook is invoked exactly once
    /// with this error before it is returned.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A `Body` transport response did not contain valid JSON.
    #[error("malformed response body: {0}")]
    MalformedBody(#[from] serde_json::Error),
}

/// Errors produced by a [`Transport`](crate::Transport) implementation.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request never produced a response (DNS, refused connection,
    /// timeout enforced by the transport itself).
    #[error("connection failed: {0}")]
    Connection(String),

    /// The server answered with a status the transport treats as an error.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
}
