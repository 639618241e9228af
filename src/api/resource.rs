//! Authenticated access to PagerDuty resources.

use std::time::Duration;

use http::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;
use url::Url;

use super::{ApiError, HttpClient, HttpRequest, HttpResponse};

/// Authenticated client for a single PagerDuty account.
///
/// Wraps an [`HttpClient`] with the account's base URL, the
/// `Authorization: Token token=<key>` header, and a per-call deadline.
/// Calls are sequential; one request is in flight at a time.
///
/// # Type Parameters
///
/// - `H`: The HTTP client implementation
#[derive(Debug)]
pub struct ResourceClient<H> {
    http: H,
    base: Url,
    auth: http::HeaderValue,
    deadline: Duration,
}

impl<H> ResourceClient<H> {
    /// Creates a resource client for the given API base URL.
    ///
    /// `auth` must already be a complete `Authorization` header value
    /// (the config layer builds and validates it before any network I/O).
    #[must_use]
    pub const fn new(http: H, base: Url, auth: http::HeaderValue, deadline: Duration) -> Self {
        Self {
            http,
            base,
            auth,
            deadline,
        }
    }

    /// Returns the API base URL.
    #[must_use]
    pub const fn base(&self) -> &Url {
        &self.base
    }

    /// Returns the per-call deadline.
    #[must_use]
    pub const fn deadline(&self) -> &Duration {
        &self.deadline
    }

    /// Resolves a path-and-query string against the base URL.
    fn endpoint_url(&self, path_and_query: &str) -> Result<Url, ApiError> {
        self.base.join(path_and_query).map_err(|e| {
            super::HttpError::InvalidUrl(format!("{path_and_query}: {e}")).into()
        })
    }
}

impl<H: HttpClient> ResourceClient<H> {
    /// Issues an authenticated GET and returns the response body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, deadline expiry, or a
    /// non-2xx status.
    pub async fn fetch(&self, path_and_query: &str) -> Result<Vec<u8>, ApiError> {
        let url = self.endpoint_url(path_and_query)?;
        tracing::debug!("GET {url}");

        let request = HttpRequest::get(url).with_header(AUTHORIZATION, self.auth.clone());
        let response = self.dispatch(request).await?;
        Ok(response.body)
    }

    /// Serializes `payload` as JSON and POSTs it, returning the response body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, deadline expiry, a
    /// non-2xx status, or a payload that fails to serialize.
    pub async fn submit<P: Serialize>(
        &self,
        path_and_query: &str,
        payload: &P,
    ) -> Result<Vec<u8>, ApiError> {
        let url = self.endpoint_url(path_and_query)?;
        tracing::debug!("POST {url}");

        let body = serde_json::to_vec(payload).map_err(|e| ApiError::Malformed {
            url: url.to_string(),
            reason: format!("request payload failed to serialize: {e}"),
        })?;

        let request = HttpRequest::post(url)
            .with_header(AUTHORIZATION, self.auth.clone())
            .with_header(CONTENT_TYPE, http::HeaderValue::from_static("application/json"))
            .with_body(body);

        let response = self.dispatch(request).await?;
        Ok(response.body)
    }

    /// Sends a request under the deadline and checks the status.
    async fn dispatch(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let url = request.url.to_string();

        let response = tokio::time::timeout(self.deadline, self.http.request(request))
            .await
            .map_err(|_| ApiError::Timeout {
                url: url.clone(),
                seconds: self.deadline.as_secs(),
            })??;

        if !response.is_success() {
            return Err(ApiError::Status {
                url,
                status: response.status,
                body: response.body_text().map(ToString::to_string),
            });
        }

        Ok(response)
    }
}
