use reqwest::Url;
use serde::Serialize;
use serde_json::Value;

use crate::api::{ApiClient, HttpMethod};
use crate::error::ApiError;

#[cfg(test)]
#[path = "admin_test.rs"]
mod admin_test;

pub const RULES_ENDPOINT: &str = "/api/rules";
pub const SETTINGS_ENDPOINT: &str = "/api/settings";
pub const PREVIEW_ENDPOINT: &str = "/api/preview";
pub const TRANSFORM_ENDPOINT: &str = "/api/transform";
pub const VALIDATE_ROUTE: &str = "/api/validate/";
pub const SAMPLE_ROUTE: &str = "/api/sample/";

/// Body of `POST /api/transform`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransformRequest {
    pub input_file: String,
    pub format: String,
    pub compress: bool,
}

impl TransformRequest {
    pub fn new(input_file: impl Into<String>) -> Self {
        Self {
            input_file: input_file.into(),
            format: String::from("openai"),
            compress: true,
        }
    }
}

/// Typed calls for the feed admin server's JSON routes.
#[derive(Debug, Clone)]
pub struct AdminApi {
    client: ApiClient,
}

impl AdminApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub async fn rules(&self) -> Result<Value, ApiError> {
        self.client.get(RULES_ENDPOINT).await
    }

    pub async fn save_rules(&self, rules: &Value) -> Result<Value, ApiError> {
        self.client
            .call(RULES_ENDPOINT, HttpMethod::Post, Some(rules))
            .await
    }

    pub async fn settings(&self) -> Result<Value, ApiError> {
        self.client.get(SETTINGS_ENDPOINT).await
    }

    pub async fn save_settings(&self, settings: &Value) -> Result<Value, ApiError> {
        self.client
            .call(SETTINGS_ENDPOINT, HttpMethod::Post, Some(settings))
            .await
    }

    /// Run the row transformation on a single product without writing a feed.
    pub async fn preview(&self, product: &Value) -> Result<Value, ApiError> {
        self.client
            .call(PREVIEW_ENDPOINT, HttpMethod::Post, Some(product))
            .await
    }

    pub async fn transform(&self, request: &TransformRequest) -> Result<Value, ApiError> {
        self.client
            .send_json(TRANSFORM_ENDPOINT, HttpMethod::Post, request)
            .await
    }

    pub async fn validate(&self, file: &str) -> Result<Value, ApiError> {
        let url = file_endpoint(self.client.base_url(), VALIDATE_ROUTE, file)?;
        self.client.get(url.as_str()).await
    }

    pub async fn sample(&self, file: &str) -> Result<Value, ApiError> {
        let url = file_endpoint(self.client.base_url(), SAMPLE_ROUTE, file)?;
        self.client.get(url.as_str()).await
    }
}

/// `route` + one percent-encoded path segment naming `file`.
fn file_endpoint(base: &Url, route: &str, file: &str) -> Result<Url, ApiError> {
    let invalid = |reason: &str| ApiError::InvalidEndpoint {
        endpoint: format!("{route}{file}"),
        reason: reason.to_owned(),
    };

    if file.is_empty() {
        return Err(invalid("empty file name"));
    }

    let mut url = base.join(route).map_err(|e| invalid(&e.to_string()))?;
    url.path_segments_mut()
        .map_err(|()| invalid("base url cannot have path segments"))?
        .pop_if_empty()
        .push(file);
    Ok(url)
}
