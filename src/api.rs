mod client;
mod error;
mod types;

pub use client::ConfigClient;
pub use error::ConfigApiError;
pub use types::{ErrorResponse, MESSAGES_URN, Messages, add_request, read_object};

use async_trait::async_trait;
use serde_json::Value;

use crate::diff::UpdateRequest;

/// The four calls the lifecycle handlers need from the configuration API.
/// Paths are relative to the `/config/v1` base.
#[async_trait]
pub trait ConfigApi: Send + Sync {
    async fn get(&self, path: &str) -> Result<Value, ConfigApiError>;
    async fn create(&self, collection_path: &str, body: &Value) -> Result<Value, ConfigApiError>;
    async fn update(&self, path: &str, request: &UpdateRequest) -> Result<Value, ConfigApiError>;
    async fn delete(&self, path: &str) -> Result<(), ConfigApiError>;
}
