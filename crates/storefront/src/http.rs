//! HTTP transport.
//!
//! The storefront only ever POSTs: JSON for the OTP endpoints, multipart form
//! data for everything cart-related. [`ReqwestClient`] is the production
//! implementation and works unchanged on native targets and `wasm32`.

use std::future::Future;

use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{Result, UiError};

/// Status and body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range (the fetch API's `ok`).
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Decode the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns `UiError::Decode` if the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// Fail with `UiError::Status` unless the status is 2xx.
    ///
    /// # Errors
    ///
    /// Returns `UiError::Status` for any non-2xx status.
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_ok() {
            Ok(self)
        } else {
            Err(UiError::Status {
                status: self.status,
            })
        }
    }
}

/// Minimal POST-only HTTP client.
///
/// `url` is either absolute or a path relative to the client's base URL.
/// Requests have no timeout and cannot be cancelled once issued.
pub trait HttpClient: 'static {
    fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> impl Future<Output = Result<HttpResponse>>;

    fn post_multipart(
        &self,
        url: &str,
        fields: &[(String, String)],
    ) -> impl Future<Output = Result<HttpResponse>>;
}

/// `reqwest`-backed client.
#[derive(Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
    base_url: Url,
}

impl ReqwestClient {
    /// Create a client that resolves relative endpoints against `base_url`.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client around an existing `reqwest::Client`.
    #[must_use]
    pub const fn with_client(client: reqwest::Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve `url` against the base URL. Absolute URLs pass through.
    ///
    /// # Errors
    ///
    /// Returns `UiError::InvalidUrl` if the result is not a valid URL.
    pub fn resolve(&self, url: &str) -> Result<Url> {
        Ok(self.base_url.join(url)?)
    }

    async fn read(response: reqwest::Response) -> Result<HttpResponse> {
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(HttpResponse { status, body })
    }
}

impl HttpClient for ReqwestClient {
    async fn post_json(&self, url: &str, body: &serde_json::Value) -> Result<HttpResponse> {
        let url = self.resolve(url)?;
        let response = self.client.post(url).json(body).send().await?;
        Self::read(response).await
    }

    async fn post_multipart(
        &self,
        url: &str,
        fields: &[(String, String)],
    ) -> Result<HttpResponse> {
        let url = self.resolve(url)?;
        let form = fields
            .iter()
            .fold(reqwest::multipart::Form::new(), |form, (name, value)| {
                form.text(name.clone(), value.clone())
            });
        let response = self.client.post(url).multipart(form).send().await?;
        Self::read(response).await
    }
}

impl std::fmt::Debug for ReqwestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}
