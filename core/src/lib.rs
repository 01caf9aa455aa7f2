//! Client for a headless content-delivery JSON API.
//!
//! # Overview
//! Wraps HTTP GET calls to a content API serving pages, navigation trees,
//! content snippets, and search. The client composes the request URL from
//! configurable parts (base URL, optional locale segment, optional base
//! path, resource path, query string), dispatches it through an injected
//! [`Transport`], and normalizes the JSON response (optional `_embedded`
//! envelope unwrapping plus a caller-supplied response hook).
//!
//! # Design
//! - `ContentClient` holds configuration only; every call is stateless
//!   given the current fields, which the owner may swap between calls.
//! - The transport is injected and mandatory — the core never opens a
//!   socket, making it deterministic under an in-memory transport.
//! - Transport responses are a tagged union (`Body` text the client
//!   decodes, or an already-decoded `Data` value), so shape detection is a
//!   match, not a probe.
//! - Caching, retries, cancellation, and authentication are deliberately
//!   left to the transport or the caller.

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::{ContentClient, ContentClientBuilder, ErrorHook, ResponseHook, UrlOptions};
pub use error::{ClientError, TransportError};
pub use transport::{Transport, TransportOptions, TransportResponse};
pub use types::{NavigationParams, Params, SnippetAreaParams};
