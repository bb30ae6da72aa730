use anyhow::Context;
use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use tracing::debug;

use super::{ConnectivityIndex, ConnectivityRecord};

/// Redis-backed connectivity index. Entries for a device are JSON records
/// in a list under `<prefix>:<device_id>`.
pub struct RedisConnectivityIndex {
    conn: MultiplexedConnection,
    prefix: String,
}

impl RedisConnectivityIndex {
    pub fn new(conn: MultiplexedConnection, prefix: impl Into<String>) -> Self {
        Self { conn, prefix: prefix.into() }
    }
}

pub fn connectivity_key(prefix: &str, device_id: &str) -> String {
    format!("{}:{}", prefix, device_id)
}

fn parse_records(entries: &[String]) -> anyhow::Result<Vec<ConnectivityRecord>> {
    entries
        .iter()
        .map(|raw| {
            serde_json::from_str::<ConnectivityRecord>(raw)
                .context("unreadable connectivity record")
        })
        .collect()
}

#[async_trait]
impl ConnectivityIndex for RedisConnectivityIndex {
    async fn query(&self, device_id: &str) -> anyhow::Result<Vec<ConnectivityRecord>> {
        let mut conn = self.conn.clone();
        let entries: Vec<String> = conn
            .lrange(connectivity_key(&self.prefix, device_id), 0, -1)
            .await
            .context("redis lrange failed")?;

        let records = parse_records(&entries)?;
        debug!(device_id, matches = records.len(), "queried connectivity index");
        Ok(records)
    }
}
