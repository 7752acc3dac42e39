use reqwest::Url;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde_json::Value;

use crate::api::HttpMethod;
use crate::error::ApiError;

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// HTTP client bound to the admin server's base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidEndpoint`] if `base_url` is not an absolute URL.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// # Errors
    ///
    /// Returns [`ApiError::InvalidEndpoint`] if `base_url` is not an absolute URL.
    pub fn with_client(http: reqwest::Client, base_url: &str) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url).map_err(|e| ApiError::InvalidEndpoint {
            endpoint: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve `endpoint` against the base URL. Absolute endpoints pass through.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidEndpoint`] if the endpoint cannot be joined.
    pub fn resolve(&self, endpoint: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(endpoint)
            .map_err(|e| ApiError::InvalidEndpoint {
                endpoint: endpoint.to_owned(),
                reason: e.to_string(),
            })
    }

    /// Send a request and parse the response body as JSON.
    ///
    /// A payload is sent as a compact JSON body with `Content-Type:
    /// application/json`; without one the request has no body. Non-2xx
    /// responses are parsed and returned like any other.
    ///
    /// # Errors
    ///
    /// - [`ApiError::InvalidEndpoint`] if the endpoint cannot be resolved
    /// - [`ApiError::Transport`] if the request or body read fails
    /// - [`ApiError::Decode`] if the body is not JSON
    pub async fn call(
        &self,
        endpoint: &str,
        method: HttpMethod,
        payload: Option<&Value>,
    ) -> Result<Value, ApiError> {
        let url = self.resolve(endpoint)?;
        let mut request = self.http.request(method.into(), url.clone());

        if let Some(payload) = payload {
            let body = serde_json::to_vec(payload).map_err(ApiError::Encode)?;
            request = request.header(CONTENT_TYPE, JSON_CONTENT_TYPE).body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        tracing::debug!(%method, %url, %status, bytes = body.len(), "api response");

        serde_json::from_slice(&body).map_err(ApiError::Decode)
    }

    /// `GET` without a body.
    ///
    /// # Errors
    ///
    /// Same as [`call`](Self::call).
    pub async fn get(&self, endpoint: &str) -> Result<Value, ApiError> {
        self.call(endpoint, HttpMethod::Get, None).await
    }

    /// Serialize any payload to JSON and send it.
    ///
    /// # Errors
    ///
    /// [`ApiError::Encode`] if the payload cannot be represented as JSON,
    /// otherwise the same as [`call`](Self::call).
    pub async fn send_json<P>(
        &self,
        endpoint: &str,
        method: HttpMethod,
        payload: &P,
    ) -> Result<Value, ApiError>
    where
        P: Serialize + ?Sized,
    {
        let payload = serde_json::to_value(payload).map_err(ApiError::Encode)?;
        self.call(endpoint, method, Some(&payload)).await
    }
}
