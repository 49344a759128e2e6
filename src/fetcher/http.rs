//! HTTP fetcher with rate limiting and charset-aware decoding
//!
//! Features:
//! - Rate limiting with governor
//! - Configurable user agent and timeout
//! - Charset detection from the `Content-Type` header, the XML
//!   declaration or an HTML meta tag
//!
//! Requests are not retried; a failed fetch ends the resolution.

use async_trait::async_trait;
use encoding_rs::{Encoding, UTF_8};
use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use regex::Regex;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_ENCODING, CONTENT_TYPE},
    Client, Response,
};
use std::num::NonZeroU32;
use std::sync::OnceLock;
use url::Url;

use super::PageFetcher;
use crate::config::FetcherConfig;
use crate::utils::error::{ConfigError, FetchError};

/// Accept header covering article pages and RDF exports
const ACCEPT_PAGES: &str =
    "text/html,application/xhtml+xml,application/rdf+xml,application/xml;q=0.9,*/*;q=0.8";

/// reqwest-backed [`PageFetcher`]
pub struct HttpFetcher {
    /// HTTP client with configured timeout and compression
    client: Client,

    /// Optional limiter; `None` when the configured rate is 0
    rate_limiter: Option<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl HttpFetcher {
    /// Create a fetcher from configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Client` if the HTTP client cannot be created
    pub fn new(config: &FetcherConfig) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.request_timeout())
            .gzip(true)
            .build()
            .map_err(|e| ConfigError::Client(e.to_string()))?;

        let rate_limiter = NonZeroU32::new(config.rate_limit)
            .map(|rate| RateLimiter::direct(Quota::per_second(rate)));

        Ok(Self {
            client,
            rate_limiter,
        })
    }

    fn build_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_PAGES));
        headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("gzip"));
        headers
    }

    async fn decode_response(&self, response: Response) -> Result<String, FetchError> {
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string())
            .unwrap_or_default();

        let bytes = response.bytes().await?;

        decode_bytes(&bytes, &content_type)
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{url}: {e}")))?;

        if let Some(limiter) = &self.rate_limiter {
            limiter.until_ready().await;
        }

        tracing::debug!(url = %url, "Fetching");

        let response = self
            .client
            .get(url)
            .headers(Self::build_headers())
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FetchError::Timeout
                } else {
                    FetchError::Http(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(url = %url, status = status.as_u16(), "Fetch failed");
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        self.decode_response(response).await
    }
}

/// Charset label from a `Content-Type` value, e.g. `text/html; charset=utf-8`
fn charset_from_content_type(content_type: &str) -> Option<&str> {
    content_type
        .split(';')
        .map(str::trim)
        .find_map(|param| {
            let (key, value) = param.split_once('=')?;
            key.trim()
                .eq_ignore_ascii_case("charset")
                .then(|| value.trim().trim_matches('"'))
        })
}

/// Charset declared inside the document (XML declaration or HTML meta tag)
fn charset_from_document(bytes: &[u8]) -> Option<&'static Encoding> {
    static DECLARED_RE: OnceLock<Regex> = OnceLock::new();

    let re = DECLARED_RE.get_or_init(|| {
        Regex::new(r#"(?i)(?:encoding|charset)\s*=\s*["']?([A-Za-z0-9_.:-]+)"#)
            .expect("Invalid regex pattern")
    });

    let head = String::from_utf8_lossy(&bytes[..bytes.len().min(1024)]);
    let label = re.captures(&head)?.get(1)?.as_str().to_string();
    Encoding::for_label(label.as_bytes())
}

/// Decode a response body using the declared or sniffed charset
///
/// # Errors
///
/// Returns `FetchError::Decode` if the body contains bytes that are
/// invalid for the chosen encoding.
pub fn decode_bytes(bytes: &[u8], content_type: &str) -> Result<String, FetchError> {
    let encoding = charset_from_content_type(content_type)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .or_else(|| charset_from_document(bytes))
        .unwrap_or(UTF_8);

    let (cow, _encoding, had_errors) = encoding.decode(bytes);

    if had_errors {
        return Err(FetchError::Decode(format!(
            "{} decoding errors",
            encoding.name()
        )));
    }

    Ok(cow.into_owned())
}
