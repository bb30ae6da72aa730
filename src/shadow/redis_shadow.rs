use anyhow::Context;
use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use serde_json::Value;
use tracing::debug;

use super::{DeviceState, DeviceStateStore, StateError};

/// Redis-backed shadow store. Each device's reported attributes are kept
/// as a JSON object under `<prefix>:<device_id>`.
pub struct RedisShadowStore {
    conn: MultiplexedConnection,
    prefix: String,
}

impl RedisShadowStore {
    pub fn new(conn: MultiplexedConnection, prefix: impl Into<String>) -> Self {
        Self { conn, prefix: prefix.into() }
    }
}

pub fn shadow_key(prefix: &str, device_id: &str) -> String {
    format!("{}:{}", prefix, device_id)
}

fn parse_state(device_id: &str, raw: &str) -> Result<DeviceState, StateError> {
    let value: Value = serde_json::from_str(raw)
        .with_context(|| format!("shadow for {} is not valid json", device_id))?;
    match value {
        Value::Object(map) => Ok(map),
        other => Err(StateError::Backend(anyhow::anyhow!(
            "shadow for {} is not an object: {}",
            device_id,
            other
        ))),
    }
}

#[async_trait]
impl DeviceStateStore for RedisShadowStore {
    async fn get_state(&self, device_id: &str) -> Result<DeviceState, StateError> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = conn
            .get(shadow_key(&self.prefix, device_id))
            .await
            .context("redis get failed")?;

        let raw = raw.ok_or_else(|| StateError::ResourceNotFound(device_id.to_string()))?;
        let state = parse_state(device_id, &raw)?;
        debug!(device_id, attributes = state.len(), "loaded shadow");
        Ok(state)
    }
}
