pub mod redis_kv;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Link between a caller subject and a device. Provisioned out-of-band;
/// this service only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Registration {
    pub subject: String,
    pub device_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registered_at: Option<String>,
}

/// Registration lookup abstraction.
/// Key = subject, Field = device_id, Value = optional JSON metadata.
#[async_trait]
pub trait RegistrationStore: Send + Sync + 'static {
    /// Returns `Ok(None)` when no registration links `subject` to `device_id`.
    async fn get(&self, subject: &str, device_id: &str) -> anyhow::Result<Option<Registration>>;
}
