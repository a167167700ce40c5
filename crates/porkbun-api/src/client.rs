// Porkbun API HTTP client
//
// Wraps `reqwest::Client` with endpoint URL construction, the
// credential-in-body request codec, and the per-client response cache.
// Endpoint groups (dns, dnssec, domain, general) live in separate files
// as inherent methods, keeping this module focused on transport mechanics.

use reqwest::header::{CONTENT_TYPE, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use url::Url;

use crate::auth::Credentials;
use crate::cache::ResponseCache;
use crate::codec;
use crate::error::Error;
use crate::transport::{CLIENT_IDENTIFIER, TransportConfig};

/// Production API root. Every endpoint is a `POST` below it.
pub const DEFAULT_BASE_URL: &str = "https://api.porkbun.com/api/json/v3";

/// Caching client for the Porkbun JSON API.
///
/// One instance per credential pair, shared behind an `Arc` by everything
/// that talks to the account. Reads of records, glue, DNSSEC, pricing and
/// the domain listing are served from the cache once fetched; every
/// successful mutation on a domain drops that domain's cached entries.
/// Network calls run in parallel; only the cache touch points serialize.
pub struct PorkbunClient {
    http: reqwest::Client,
    base_url: Url,
    credentials: Credentials,
    cache: ResponseCache,
}

impl PorkbunClient {
    /// Create a client against the production API with default transport.
    pub fn new(credentials: Credentials) -> Result<Self, Error> {
        Self::from_config(credentials, DEFAULT_BASE_URL, &TransportConfig::default())
    }

    /// Create a client from a base URL and transport config.
    pub fn from_config(
        credentials: Credentials,
        base_url: &str,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        let base_url = Url::parse(base_url)?;
        Self::with_client(http, base_url, credentials)
    }

    /// Wrap a pre-built `reqwest::Client`.
    pub fn with_client(
        http: reqwest::Client,
        base_url: Url,
        credentials: Credentials,
    ) -> Result<Self, Error> {
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self {
            http,
            base_url,
            credentials,
            cache: ResponseCache::new(),
        })
    }

    /// The API root this client talks to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The response cache (read-only inspection; the client owns all writes).
    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Append path segments to the base URL, percent-encoding each one.
    ///
    /// `["dns", "retrieve", "example.com"]` -> `{base}/dns/retrieve/example.com`
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// POST and decode the payload shape `T` from the response.
    pub(crate) async fn call<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        body: Option<Value>,
        cancel: &CancellationToken,
    ) -> Result<T, Error> {
        let raw = self.send(segments, body, cancel).await?;
        codec::decode_payload(&raw)
    }

    /// POST for an operation with no payload beyond the envelope.
    pub(crate) async fn call_void(
        &self,
        segments: &[&str],
        body: Option<Value>,
        cancel: &CancellationToken,
    ) -> Result<(), Error> {
        self.send(segments, body, cancel).await.map(drop)
    }

    /// Build, send, and envelope-check one request, returning the raw body.
    async fn send(
        &self,
        segments: &[&str],
        body: Option<Value>,
        cancel: &CancellationToken,
    ) -> Result<Vec<u8>, Error> {
        let url = self.endpoint(segments)?;
        let payload = codec::encode_body(&self.credentials, body)?;

        debug!("POST {url}");

        let request = self
            .http
            .post(url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .header(USER_AGENT, HeaderValue::from_static(CLIENT_IDENTIFIER))
            .body(payload);

        let exchange = async {
            let resp = request.send().await?;
            let status = resp.status();
            let body = if status == reqwest::StatusCode::OK {
                resp.bytes().await?.to_vec()
            } else {
                // Diagnostic only; a failed read just leaves it empty.
                resp.bytes().await.map(|b| b.to_vec()).unwrap_or_default()
            };
            Ok::<_, Error>((status, body))
        };

        let (status, body) = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(Error::Cancelled),
            result = exchange => result?,
        };

        codec::check_envelope(status, &body)?;
        Ok(body)
    }
}
