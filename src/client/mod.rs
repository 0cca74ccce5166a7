// src/client/mod.rs
mod error;
mod rest;

pub use error::{ApiError, ClientError};
pub use rest::RestClient;

use async_trait::async_trait;
use serde_json::Value;

/// The one query the probe needs from a data service.
#[async_trait]
pub trait QueryClient: Send + Sync {
    /// Count rows in `resource`, returning the service's payload as-is.
    async fn count_rows(&self, resource: &str) -> Result<Value, ClientError>;
}
