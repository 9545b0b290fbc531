//! The generic API client: verb dispatch, header assembly, and
//! response/error normalization.
//!
//! Each verb performs at most one round trip per call. The returned futures
//! are inert until awaited and cancelled by dropping, so callers control
//! ordering, backpressure, and cancellation. The client itself holds no
//! mutable state; the notifier is fire-and-forget.

use std::sync::Arc;

use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use slicevote_shared::{ApiConfig, Result, SliceVoteError, Verb};

use crate::notify::{Notification, Notifier, TracingNotifier};
use crate::resolve::{ResourceRef, resolve};

/// User-Agent string for API requests.
const USER_AGENT: &str = concat!("SliceVote/", env!("CARGO_PKG_VERSION"));

/// Auto-dismiss duration for the deletion success notice.
const DELETE_NOTICE_MS: u64 = 5000;

// ---------------------------------------------------------------------------
// Request and response payloads
// ---------------------------------------------------------------------------

/// Outgoing request body.
///
/// [`Body::Json`] is serialized and sent with a JSON content type;
/// [`Body::Text`] is sent raw without one.
#[derive(Debug, Clone)]
pub enum Body {
    Json(serde_json::Value),
    Text(String),
}

impl Body {
    /// Serialize any `Serialize` value into a JSON body.
    pub fn json<T: Serialize>(value: &T) -> Result<Self> {
        let value = serde_json::to_value(value)
            .map_err(|e| SliceVoteError::Serialization(e.to_string()))?;
        Ok(Self::Json(value))
    }
}

/// Normalized success payload of a write verb.
///
/// `NoContent` marks a legitimately empty success body (e.g. 204) and is
/// distinct from a parsed JSON `null`.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload<T> {
    Json(T),
    NoContent,
}

impl<T> Payload<T> {
    /// The parsed body, or `None` for an empty success response.
    pub fn into_json(self) -> Option<T> {
        match self {
            Self::Json(value) => Some(value),
            Self::NoContent => None,
        }
    }

    pub fn is_no_content(&self) -> bool {
        matches!(self, Self::NoContent)
    }
}

/// Structured error body the backend sends alongside non-2xx statuses.
#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    message: String,
    path: String,
}

// ---------------------------------------------------------------------------
// ApiClient
// ---------------------------------------------------------------------------

/// Generic client for the SliceVote backend.
///
/// Resolves resource references against the configured base URL, injects
/// content and bearer-auth headers, and normalizes responses: empty success
/// bodies become [`Payload::NoContent`], failures are surfaced to the user
/// through the injected [`Notifier`] exactly once and then returned to the
/// caller. The client never retries and never swallows a failure.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
    notifier: Arc<dyn Notifier>,
}

impl ApiClient {
    /// Create a client notifying through `tracing`.
    pub fn new(config: ApiConfig) -> Result<Self> {
        Self::with_notifier(config, Arc::new(TracingNotifier))
    }

    /// Create a client with an injected notification sink.
    pub fn with_notifier(config: ApiConfig, notifier: Arc<dyn Notifier>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                SliceVoteError::config(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            http,
            config,
            notifier,
        })
    }

    /// The base URL this client resolves against.
    pub fn base_url(&self) -> &Url {
        &self.config.base_url
    }

    // -- verbs --------------------------------------------------------------

    /// GET a resource and parse its JSON body.
    pub async fn get<T: DeserializeOwned>(
        &self,
        rref: &ResourceRef,
        params: Option<&[(String, String)]>,
        token: Option<&str>,
    ) -> Result<T> {
        let url = resolve(&self.config.base_url, rref)?;
        let mut request = self
            .http
            .get(url.clone())
            .header(CONTENT_TYPE, "application/json");
        if let Some(params) = params {
            request = request.query(params);
        }
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = self.execute(Verb::Get, &url, request).await?;
        let bytes = self.read_body(Verb::Get, response).await?;
        serde_json::from_slice(&bytes)
            .map_err(|e| SliceVoteError::Serialization(format!("GET {url}: {e}")))
    }

    /// POST a body to a resource.
    pub async fn post<T: DeserializeOwned>(
        &self,
        rref: &ResourceRef,
        body: Body,
        token: Option<&str>,
    ) -> Result<Payload<T>> {
        let url = resolve(&self.config.base_url, rref)?;
        let request = self.write_request(self.http.post(url.clone()), body, token);
        let response = self.execute(Verb::Post, &url, request).await?;
        self.read_payload(Verb::Post, &url, response).await
    }

    /// PUT a body to a resource.
    pub async fn put<T: DeserializeOwned>(
        &self,
        rref: &ResourceRef,
        body: Body,
        token: Option<&str>,
    ) -> Result<Payload<T>> {
        let url = resolve(&self.config.base_url, rref)?;
        let request = self.write_request(self.http.put(url.clone()), body, token);
        let response = self.execute(Verb::Put, &url, request).await?;
        self.read_payload(Verb::Put, &url, response).await
    }

    /// PATCH a resource, optionally with query parameters.
    pub async fn patch<T: DeserializeOwned>(
        &self,
        rref: &ResourceRef,
        body: Body,
        params: Option<&[(String, String)]>,
        token: Option<&str>,
    ) -> Result<Payload<T>> {
        let url = resolve(&self.config.base_url, rref)?;
        let mut request = self.write_request(self.http.patch(url.clone()), body, token);
        if let Some(params) = params {
            request = request.query(params);
        }
        let response = self.execute(Verb::Patch, &url, request).await?;
        self.read_payload(Verb::Patch, &url, response).await
    }

    /// DELETE a resource. Emits a success notification before returning.
    pub async fn delete<T: DeserializeOwned>(
        &self,
        rref: &ResourceRef,
        token: Option<&str>,
    ) -> Result<Payload<T>> {
        let url = resolve(&self.config.base_url, rref)?;
        let mut request = self
            .http
            .delete(url.clone())
            .header(CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = self.execute(Verb::Delete, &url, request).await?;
        self.notifier.notify(Notification::transient(
            "Element deleted successfully.",
            DELETE_NOTICE_MS,
        ));
        self.read_payload(Verb::Delete, &url, response).await
    }

    // -- request assembly ---------------------------------------------------

    /// Attach body and auth to a write-verb request. JSON bodies get a JSON
    /// content type, raw text bodies do not.
    fn write_request(
        &self,
        request: reqwest::RequestBuilder,
        body: Body,
        token: Option<&str>,
    ) -> reqwest::RequestBuilder {
        let request = match body {
            Body::Json(value) => request
                .header(CONTENT_TYPE, "application/json")
                .body(value.to_string()),
            Body::Text(text) => request.body(text),
        };
        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    // -- response normalization ---------------------------------------------

    /// Send the request and normalize any failure. Transport errors and
    /// non-2xx responses are notified exactly once and returned as errors.
    async fn execute(
        &self,
        verb: Verb,
        url: &Url,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response> {
        debug!(%verb, %url, "dispatching request");

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => return Err(self.fail_generic(verb, e.to_string())),
        };

        if response.status().is_success() {
            return Ok(response);
        }
        Err(self.fail_status(verb, response).await)
    }

    /// Normalize a non-2xx response into an error, notifying the user.
    ///
    /// A parseable `{message, path}` body produces a specific, persistent
    /// notification and a `Backend` error; anything else falls back to the
    /// generic path. Either way the error is returned, never swallowed.
    async fn fail_status(&self, verb: Verb, response: reqwest::Response) -> SliceVoteError {
        let status = response.status().as_u16();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return self.fail_generic(verb, format!("HTTP {status}, unreadable body: {e}")),
        };

        match serde_json::from_str::<ErrorBody>(&body) {
            Ok(parsed) => {
                self.notifier.notify(Notification::sticky(format!(
                    "An error occurred in {verb} {}: {}",
                    parsed.path, parsed.message
                )));
                SliceVoteError::Backend {
                    verb,
                    status,
                    path: parsed.path,
                    message: parsed.message,
                }
            }
            Err(e) => {
                debug!(%verb, status, error = %e, "error body is not structured");
                self.fail_generic(verb, format!("HTTP {status}"))
            }
        }
    }

    /// Notify generically and build a `Transport` error.
    fn fail_generic(&self, verb: Verb, message: String) -> SliceVoteError {
        self.notifier.notify(Notification::sticky(format!(
            "An error occurred in a {verb} request. The error could not be \
             handled correctly. See the log output for details."
        )));
        SliceVoteError::transport(verb, message)
    }

    /// Read a success body as raw bytes, mapping read failures to the
    /// generic error path.
    async fn read_body(&self, verb: Verb, response: reqwest::Response) -> Result<Vec<u8>> {
        match response.bytes().await {
            Ok(bytes) => Ok(bytes.to_vec()),
            Err(e) => Err(self.fail_generic(verb, format!("unreadable response body: {e}"))),
        }
    }

    /// Parse a write-verb success body, treating an empty body as
    /// [`Payload::NoContent`] instead of a parse failure.
    async fn read_payload<T: DeserializeOwned>(
        &self,
        verb: Verb,
        url: &Url,
        response: reqwest::Response,
    ) -> Result<Payload<T>> {
        let bytes = self.read_body(verb, response).await?;
        if bytes.is_empty() {
            return Ok(Payload::NoContent);
        }
        let value = serde_json::from_slice(&bytes)
            .map_err(|e| SliceVoteError::Serialization(format!("{verb} {url}: {e}")))?;
        Ok(Payload::Json(value))
    }
}
