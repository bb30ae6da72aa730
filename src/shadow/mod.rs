pub mod redis_shadow;

use async_trait::async_trait;
use serde_json::{Map, Value};

/// Last reported attributes of a device, in the order they were reported.
pub type DeviceState = Map<String, Value>;

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// The device has never published a state document.
    #[error("no state resource for device {0}")]
    ResourceNotFound(String),

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// Device state (shadow) abstraction.
#[async_trait]
pub trait DeviceStateStore: Send + Sync + 'static {
    async fn get_state(&self, device_id: &str) -> Result<DeviceState, StateError>;
}
