//! Verify URL construction against JSON test vectors stored in
//! `test-vectors/`.
//!
//! Each case describes a client configuration, a resource path, per-call
//! options, and the expected absolute URL. Vectors double as a
//! language-neutral record of the URL-building contract.

use async_trait::async_trait;
use content_core::{
    ContentClient, Params, Transport, TransportError, TransportOptions, TransportResponse, UrlOptions,
};
use serde_json::Value;

/// The vector suite never dispatches a request; this transport exists only
/// to satisfy the builder.
struct NullTransport;

#[async_trait]
impl Transport for NullTransport {
    async fn send(
        &self,
        _url: &str,
        _options: &TransportOptions,
    ) -> Result<TransportResponse, TransportError> {
        Ok(TransportResponse::Data(Value::Null))
    }
}

fn client_for(config: &Value) -> ContentClient {
    let mut builder = ContentClient::builder()
        .base_url(config["base_url"].as_str().unwrap())
        .transport(NullTransport);
    if let Some(base_path) = config.get("base_path").and_then(Value::as_str) {
        builder = builder.base_path(base_path);
    }
    if let Some(locale) = config.get("locale").and_then(Value::as_str) {
        builder = builder.locale(locale);
    }
    builder.build().unwrap()
}

fn options_for(options: &Value) -> UrlOptions {
    let params = options.get("params").and_then(Value::as_array).map(|pairs| {
        pairs
            .iter()
            .map(|pair| {
                let pair = pair.as_array().unwrap();
                (
                    pair[0].as_str().unwrap().to_string(),
                    pair[1].as_str().unwrap().to_string(),
                )
            })
            .collect::<Params>()
    });
    UrlOptions {
        params,
        with_base_path: options
            .get("with_base_path")
            .and_then(Value::as_bool)
            .unwrap_or(true),
        with_locale: options
            .get("with_locale")
            .and_then(Value::as_bool)
            .unwrap_or(true),
    }
}

#[test]
fn build_url_test_vectors() {
    let raw = include_str!("../../test-vectors/build_url.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let client = client_for(&case["config"]);
        let options = options_for(&case["options"]);

        let url = client
            .build_url(case["path"].as_str().unwrap(), &options)
            .unwrap();
        assert_eq!(
            url.as_str(),
            case["expected_url"].as_str().unwrap(),
            "{name}"
        );
    }
}
