use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;
use vane_types::{ProviderSpec, VaneError};

use crate::normalize::decode_payload;

/// Descriptor for one outbound GET request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    url: Url,
    headers: Vec<(String, String)>,
}

impl HttpRequest {
    /// A GET request for `url` with no headers.
    #[must_use]
    pub const fn get(url: Url) -> Self {
        Self {
            url,
            headers: Vec::new(),
        }
    }

    /// A GET request for `spec`'s base URL joined with `path`, carrying the spec's headers.
    ///
    /// # Errors
    /// Returns `InvalidArg` when the joined URL does not parse.
    pub fn for_spec(spec: &ProviderSpec, path: &str) -> Result<Self, VaneError> {
        let raw = format!("{}{}", spec.base_url(), path);
        let url = Url::parse(&raw)
            .map_err(|e| VaneError::InvalidArg(format!("bad URL for {}: {raw}: {e}", spec.key())))?;
        Ok(Self {
            url,
            headers: spec.headers().to_vec(),
        })
    }

    /// Add a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Mutable access to the URL for adding path segments or query pairs.
    pub fn url_mut(&mut self) -> &mut Url {
        &mut self.url
    }

    /// Target URL.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Headers in insertion order.
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }
}

/// Bytes and status returned by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// `Content-Type` header value, if any.
    pub content_type: Option<String>,
    /// Undecoded body.
    pub body: Vec<u8>,
}

impl RawResponse {
    /// True for 2xx statuses.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// `charset` parameter of the content type, if declared.
    #[must_use]
    pub fn charset(&self) -> Option<&str> {
        let ct = self.content_type.as_deref()?;
        ct.split(';')
            .skip(1)
            .filter_map(|p| p.trim().split_once('='))
            .find(|(k, _)| k.trim().eq_ignore_ascii_case("charset"))
            .map(|(_, v)| v.trim().trim_matches('"'))
    }

    /// Decode the body as text using `charset`, or the declared charset, or UTF-8.
    ///
    /// # Errors
    /// Returns `Parse` tagged with `connector` for unknown charset labels.
    pub fn text(&self, connector: &str, charset: Option<&str>) -> Result<String, VaneError> {
        let label = charset.or_else(|| self.charset()).unwrap_or("utf-8");
        decode_payload(&self.body, label).map_err(|e| e.into_vane(connector))
    }

    /// Deserialize the body as JSON.
    ///
    /// # Errors
    /// Returns `Parse` tagged with `connector` when the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self, connector: &str) -> Result<T, VaneError> {
        serde_json::from_slice(&self.body).map_err(|e| VaneError::parse(connector, e.to_string()))
    }
}

/// Transport-level failure (DNS, TLS, connection, body read).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Sends one request and returns the raw response.
///
/// Implementations must not apply their own retries; deadlines are enforced
/// by [`fetch_with_timeout`], which drops the returned future on expiry.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Perform the request.
    async fn send(&self, request: &HttpRequest) -> Result<RawResponse, TransportError>;
}

/// Perform one outbound call bounded by `timeout`.
///
/// When the deadline passes first the in-flight transport future is dropped,
/// which cancels it. Non-2xx responses become `Http` errors.
///
/// # Errors
/// `InvalidArg` for a zero timeout, `Timeout`, `Network`, or `Http`.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "vane_core::fetch_with_timeout",
        skip(transport, request),
        fields(
            connector = connector,
            url = %request.url(),
            timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        ),
    )
)]
pub async fn fetch_with_timeout(
    transport: &dyn HttpTransport,
    connector: &str,
    request: &HttpRequest,
    timeout: Duration,
) -> Result<RawResponse, VaneError> {
    if timeout.is_zero() {
        return Err(VaneError::InvalidArg(
            "fetch timeout must be positive".to_string(),
        ));
    }
    let response = match tokio::time::timeout(timeout, transport.send(request)).await {
        Ok(Ok(r)) => r,
        Ok(Err(e)) => return Err(VaneError::network(connector, e.0)),
        Err(_) => {
            #[cfg(feature = "tracing")]
            tracing::warn!(connector, "upstream call timed out");
            return Err(VaneError::timeout(connector, timeout));
        }
    };
    if !response.is_success() {
        return Err(VaneError::http(connector, response.status));
    }
    Ok(response)
}
