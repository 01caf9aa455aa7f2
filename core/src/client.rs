//! URL construction, request execution, and response normalization for the
//! content API.
//!
//! # Design
//! `ContentClient` owns the per-instance configuration (base URL, base path,
//! locale, transport, hooks) and stays otherwise stateless: every call
//! builds a fresh URL, dispatches it through the injected transport, and
//! normalizes the JSON that comes back. Configuration fields may be swapped
//! by the owner between calls through the `set_*` methods; mutating a shared
//! instance from several tasks at once is unsupported and unsynchronized.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::ClientError;
use crate::transport::{Transport, TransportOptions, TransportResponse};
use crate::types::{NavigationParams, Params, SnippetAreaParams};

/// Hook observing transport failures before they propagate to the caller.
pub type ErrorHook = Arc<dyn Fn(&ClientError) + Send + Sync>;

/// Hook mapping every normalized body; its return value is what callers
/// receive.
pub type ResponseHook = Arc<dyn Fn(Value) -> Value + Send + Sync>;

/// Per-call options for [`ContentClient::build_url`].
#[derive(Debug, Clone)]
pub struct UrlOptions {
    /// Query-string pairs, appended in order. `None` and an empty vec both
    /// produce a URL without any `?` component.
    pub params: Option<Params>,
    /// Prepend the configured base path (when it is non-empty).
    pub with_base_path: bool,
    /// Prepend the configured locale segment (when it is non-empty).
    pub with_locale: bool,
}

impl Default for UrlOptions {
    fn default() -> Self {
        Self {
            params: None,
            with_base_path: true,
            with_locale: true,
        }
    }
}

/// Client for a headless content-delivery JSON API.
///
/// Construct through [`ContentClient::builder`]; a base URL and a transport
/// are required, everything else has defaults.
#[derive(Clone)]
pub struct ContentClient {
    base_url: String,
    base_path: String,
    locale: String,
    transport: Arc<dyn Transport>,
    transport_options: TransportOptions,
    on_error: Option<ErrorHook>,
    on_response: Option<ResponseHook>,
    remove_embedded: bool,
}

impl fmt::Debug for ContentClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentClient")
            .field("base_url", &self.base_url)
            .field("base_path", &self.base_path)
            .field("locale", &self.locale)
            .field("remove_embedded", &self.remove_embedded)
            .finish_non_exhaustive()
    }
}

/// Fail-fast builder for [`ContentClient`].
#[derive(Default)]
pub struct ContentClientBuilder {
    base_url: Option<String>,
    base_path: Option<String>,
    locale: Option<String>,
    transport: Option<Arc<dyn Transport>>,
    transport_options: TransportOptions,
    on_error: Option<ErrorHook>,
    on_response: Option<ResponseHook>,
    remove_embedded: bool,
}

impl ContentClientBuilder {
    /// Absolute scheme+authority root every request resolves against.
    /// Required; parsed lazily at call time, so a malformed value surfaces
    /// as [`ClientError::Url`] from the first operation.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Path prefix identifying the API surface on the server.
    /// Defaults to `/api`; an empty string disables the prefix.
    pub fn base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = Some(base_path.into());
        self
    }

    /// Locale segment prepended ahead of the base path. Defaults to none.
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// The HTTP mechanism performing the actual network calls. Required.
    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Opaque options handed unmodified to every transport call.
    pub fn transport_options(mut self, options: TransportOptions) -> Self {
        self.transport_options = options;
        self
    }

    /// Observe transport failures (logging, telemetry). The error still
    /// propagates to the caller afterwards.
    pub fn on_error(mut self, hook: impl Fn(&ClientError) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Arc::new(hook));
        self
    }

    /// Map every normalized body before it reaches the caller.
    pub fn on_response(mut self, hook: impl Fn(Value) -> Value + Send + Sync + 'static) -> Self {
        self.on_response = Some(Arc::new(hook));
        self
    }

    /// Unwrap a top-level `_embedded` envelope from decoded bodies.
    pub fn remove_embedded(mut self, remove: bool) -> Self {
        self.remove_embedded = remove;
        self
    }

    /// Finalize the builder.
    ///
    /// # Errors
    /// [`ClientError::Config`] when the base URL or the transport is missing.
    pub fn build(self) -> Result<ContentClient, ClientError> {
        let base_url = self.base_url.ok_or(ClientError::Config("base_url"))?;
        let transport = self.transport.ok_or(ClientError::Config("transport"))?;
        Ok(ContentClient {
            base_url,
            base_path: self.base_path.unwrap_or_else(|| "/api".to_string()),
            locale: self.locale.unwrap_or_default(),
            transport,
            transport_options: self.transport_options,
            on_error: self.on_error,
            on_response: self.on_response,
            remove_embedded: self.remove_embedded,
        })
    }
}

impl ContentClient {
    pub fn builder() -> ContentClientBuilder {
        ContentClientBuilder::default()
    }

    /// Build the absolute URL for `path` under the current configuration.
    ///
    /// The path part is assembled from `[locale?, base_path?, path]` joined
    /// with a single separator; doubled separators are collapsed, so neither
    /// a trailing slash on the base path nor a missing leading slash on
    /// `path` produces a malformed target. Query pairs are appended in input
    /// order, and only when `params` is present and non-empty.
    ///
    /// # Errors
    /// [`ClientError::Url`] when the configured base URL does not parse.
    pub fn build_url(&self, path: &str, options: &UrlOptions) -> Result<Url, ClientError> {
        let mut segments: Vec<&str> = Vec::with_capacity(3);
        if options.with_locale && !self.locale.is_empty() {
            segments.push(&self.locale);
        }
        if options.with_base_path && !self.base_path.is_empty() {
            segments.push(&self.base_path);
        }
        segments.push(path);

        let joined = collapse_separators(&format!("/{}", segments.join("/")));
        let mut url = Url::parse(&self.base_url)?;
        url.set_path(&joined);

        if let Some(params) = &options.params {
            if !params.is_empty() {
                url.query_pairs_mut()
                    .extend_pairs(params.iter().map(|(k, v)| (k.as_str(), v.as_str())));
            }
        }
        Ok(url)
    }

    /// Build a URL from `path` and `params` with default options, then
    /// execute it. See [`ContentClient::request_url`].
    pub async fn request(&self, path: &str, params: Option<Params>) -> Result<Value, ClientError> {
        let url = self.build_url(
            path,
            &UrlOptions {
                params,
                ..UrlOptions::default()
            },
        )?;
        self.request_url(url).await
    }

    /// Execute a pre-built URL through the configured transport and
    /// normalize the response.
    ///
    /// On transport failure the error hook is invoked exactly once,
    /// synchronously, and the same error is then returned; the hook never
    /// suppresses propagation.
    pub async fn request_url(&self, url: Url) -> Result<Value, ClientError> {
        debug!(url = %url, "dispatching request");
        let response = match self.transport.send(url.as_str(), &self.transport_options).await {
            Ok(response) => response,
            Err(e) => {
                let err = ClientError::Transport(e);
                if let Some(hook) = &self.on_error {
                    hook(&err);
                }
                return Err(err);
            }
        };
        self.handle_response(response)
    }

    /// Normalize a transport response into the payload callers receive.
    ///
    /// `Body` responses are decoded as JSON; `Data` responses are used
    /// as-is. When envelope removal is enabled and the body is an object
    /// with a top-level `_embedded` key, the body is replaced by that key's
    /// value (a body without the key passes through unchanged). The response
    /// hook, when set, maps the result.
    ///
    /// # Errors
    /// [`ClientError::MalformedBody`] when a `Body` response is not valid
    /// JSON.
    pub fn handle_response(&self, response: TransportResponse) -> Result<Value, ClientError> {
        let mut body = match response {
            TransportResponse::Body(text) => serde_json::from_str(&text)?,
            TransportResponse::Data(value) => value,
        };
        if self.remove_embedded {
            if let Value::Object(map) = &mut body {
                if let Some(inner) = map.remove("_embedded") {
                    body = inner;
                }
            }
        }
        Ok(match &self.on_response {
            Some(hook) => hook(body),
            None => body,
        })
    }

    /// Fetch a page by its site path.
    ///
    /// Pages are addressed by absolute site path, not API-relative path, so
    /// both the locale segment and the base path are suppressed: the target
    /// is `{base_url}{path}.json`.
    pub async fn get_page_by_path(&self, path: &str) -> Result<Value, ClientError> {
        let url = self.build_url(
            &format!("{path}.json"),
            &UrlOptions {
                params: None,
                with_base_path: false,
                with_locale: false,
            },
        )?;
        self.request_url(url).await
    }

    /// Fetch the navigation tree registered under `key`.
    pub async fn get_navigation_by_key(
        &self,
        key: &str,
        params: Option<NavigationParams>,
    ) -> Result<Value, ClientError> {
        self.request(&format!("/navigations/{key}"), params.map(Params::from))
            .await
    }

    /// Fetch the snippets assigned to `area`.
    pub async fn get_snippet_by_area(
        &self,
        area: &str,
        params: Option<SnippetAreaParams>,
    ) -> Result<Value, ClientError> {
        self.request(&format!("/snippet-areas/{area}"), params.map(Params::from))
            .await
    }

    /// Run a full-text search for `query`.
    pub async fn search(&self, query: &str) -> Result<Value, ClientError> {
        let params = vec![("q".to_string(), query.to_string())];
        self.request("/search", Some(params)).await
    }

    pub fn set_locale(&mut self, locale: impl Into<String>) {
        self.locale = locale.into();
    }

    pub fn set_base_path(&mut self, base_path: impl Into<String>) {
        self.base_path = base_path.into();
    }

    pub fn set_transport(&mut self, transport: impl Transport + 'static) {
        self.transport = Arc::new(transport);
    }

    pub fn set_transport_options(&mut self, options: TransportOptions) {
        self.transport_options = options;
    }

    pub fn set_remove_embedded(&mut self, remove: bool) {
        self.remove_embedded = remove;
    }

    pub fn set_on_error(&mut self, hook: impl Fn(&ClientError) + Send + Sync + 'static) {
        self.on_error = Some(Arc::new(hook));
    }

    pub fn set_on_response(&mut self, hook: impl Fn(Value) -> Value + Send + Sync + 'static) {
        self.on_response = Some(Arc::new(hook));
    }
}

/// Collapse runs of `/` into a single separator.
fn collapse_separators(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut prev_was_separator = false;
    for c in path.chars() {
        if c == '/' {
            if prev_was_separator {
                continue;
            }
            prev_was_separator = true;
        } else {
            prev_was_separator = false;
        }
        out.push(c);
    }
    out
}
