use anyhow::Context;
use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use serde::Deserialize;
use tracing::debug;

use super::{Registration, RegistrationStore};

/// Redis-backed registration store using hash maps.
/// Each subject is a Redis hash key, device_id is the field, and the
/// value is an optional JSON object of registration metadata.
pub struct RedisRegistrationStore {
    conn: MultiplexedConnection,
    prefix: String,
}

#[derive(Debug, Default, Deserialize)]
struct RegistrationMeta {
    registered_at: Option<String>,
}

impl RedisRegistrationStore {
    pub fn new(conn: MultiplexedConnection, prefix: impl Into<String>) -> Self {
        Self { conn, prefix: prefix.into() }
    }
}

pub fn registration_key(prefix: &str, subject: &str) -> String {
    format!("{}:{}", prefix, subject)
}

fn parse_meta(raw: &str) -> RegistrationMeta {
    if raw.trim().is_empty() {
        return RegistrationMeta::default();
    }
    serde_json::from_str(raw).unwrap_or_else(|e| {
        debug!(error = %e, "registration metadata is not json, ignoring");
        RegistrationMeta::default()
    })
}

#[async_trait]
impl RegistrationStore for RedisRegistrationStore {
    async fn get(&self, subject: &str, device_id: &str) -> anyhow::Result<Option<Registration>> {
        let mut conn = self.conn.clone();
        let key = registration_key(&self.prefix, subject);
        let value: Option<String> = conn
            .hget(&key, device_id)
            .await
            .context("redis hget failed")?;

        let Some(raw) = value else {
            return Ok(None);
        };
        let meta = parse_meta(&raw);
        debug!(subject, device_id, "loaded registration");
        Ok(Some(Registration {
            subject: subject.to_string(),
            device_id: device_id.to_string(),
            registered_at: meta.registered_at,
        }))
    }
}
