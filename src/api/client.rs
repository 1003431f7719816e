use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{RequestBuilder, StatusCode};
use serde_json::Value;

use super::types::ErrorResponse;
use super::{ConfigApi, ConfigApiError};
use crate::config::ProviderConfig;
use crate::diff::UpdateRequest;

const CONFIG_API_PATH: &str = "/config/v1";

#[derive(Clone)]
pub struct ConfigClient {
    client: reqwest::Client,
    username: String,
    password: String,
    base_url: String,
}

impl ConfigClient {
    pub fn new(config: &ProviderConfig) -> Result<Self, ConfigApiError> {
        let base_url = format!(
            "{}{}",
            config.https_host.trim_end_matches('/'),
            CONFIG_API_PATH
        );
        Self::create_client(
            config.username.clone(),
            config.password.clone(),
            base_url,
            config.insecure_trust_all_tls,
            config.request_timeout,
        )
    }

    /// NOTE: Primarily used for testing with mock servers.
    pub fn with_base_url(
        username: String,
        password: String,
        base_url: String,
    ) -> Result<Self, ConfigApiError> {
        Self::create_client(username, password, base_url, false, Duration::from_secs(30))
    }

    fn create_client(
        username: String,
        password: String,
        base_url: String,
        insecure_trust_all_tls: bool,
        timeout: Duration,
    ) -> Result<Self, ConfigApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if insecure_trust_all_tls {
            tracing::warn!("TLS certificate verification is disabled");
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .danger_accept_invalid_certs(insecure_trust_all_tls)
            .build()
            .map_err(ConfigApiError::Network)?;

        Ok(Self {
            client,
            username,
            password,
            base_url,
        })
    }

    pub fn api_base(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, path: &str, request: RequestBuilder) -> Result<Value, ConfigApiError> {
        let response = request
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await?;
        let status = response.status();

        if status == StatusCode::NO_CONTENT {
            return Ok(Value::Null);
        }

        if status.is_success() {
            let body: Value = response
                .json()
                .await
                .map_err(|e| ConfigApiError::InvalidResponse {
                    path: path.to_string(),
                    message: format!("Failed to parse response: {}", e),
                })?;
            log_body("response", path, &body);
            return Ok(body);
        }

        let text = response.text().await.unwrap_or_default();
        let message = ErrorResponse::message_from(&text);
        tracing::debug!(status = status.as_u16(), path, %message, "configuration API error");

        Err(match status {
            StatusCode::NOT_FOUND => ConfigApiError::NotFound {
                path: path.to_string(),
            },
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ConfigApiError::Auth {
                status: status.as_u16(),
                message,
            },
            _ => ConfigApiError::Api {
                status: status.as_u16(),
                message,
            },
        })
    }
}

#[async_trait]
impl ConfigApi for ConfigClient {
    async fn get(&self, path: &str) -> Result<Value, ConfigApiError> {
        tracing::debug!(path, "GET");
        self.send(path, self.client.get(self.url(path))).await
    }

    async fn create(&self, collection_path: &str, body: &Value) -> Result<Value, ConfigApiError> {
        tracing::debug!(path = collection_path, "POST");
        log_body("request", collection_path, body);
        self.send(
            collection_path,
            self.client.post(self.url(collection_path)).json(body),
        )
        .await
    }

    async fn update(&self, path: &str, request: &UpdateRequest) -> Result<Value, ConfigApiError> {
        tracing::debug!(path, operations = request.operations.len(), "PATCH");
        log_body("request", path, request);
        self.send(path, self.client.patch(self.url(path)).json(request))
            .await
    }

    async fn delete(&self, path: &str) -> Result<(), ConfigApiError> {
        tracing::debug!(path, "DELETE");
        self.send(path, self.client.delete(self.url(path)))
            .await
            .map(|_| ())
    }
}

// NOTE: Best-effort, serialization failures are ignored
fn log_body<T: serde::Serialize + ?Sized>(direction: &str, path: &str, body: &T) {
    if !tracing::enabled!(tracing::Level::DEBUG) {
        return;
    }
    if let Ok(json) = serde_json::to_string(body) {
        tracing::debug!(direction, path, body = %json, "configuration API body");
    }
}

impl std::fmt::Debug for ConfigClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigClient")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
