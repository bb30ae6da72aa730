pub mod redis_index;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Connectivity {
    pub connected: bool,
}

/// One connectivity index entry for a device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectivityRecord {
    pub device_id: String,
    #[serde(default)]
    pub connectivity: Connectivity,
}

impl ConnectivityRecord {
    pub fn new(device_id: impl Into<String>, connected: bool) -> Self {
        Self {
            device_id: device_id.into(),
            connectivity: Connectivity { connected },
        }
    }
}

/// Connectivity index abstraction. Returns every entry matching the device,
/// in index order; zero entries is a normal answer.
#[async_trait]
pub trait ConnectivityIndex: Send + Sync + 'static {
    async fn query(&self, device_id: &str) -> anyhow::Result<Vec<ConnectivityRecord>>;
}
