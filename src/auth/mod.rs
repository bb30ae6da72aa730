use axum::http::HeaderMap;

use crate::config::IdentityConfig;
use crate::error::StatusError;

/// Authenticated caller. `subject` is the stable identifier registrations
/// are keyed by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub subject: String,
}

impl Identity {
    pub fn new(subject: impl Into<String>) -> Self {
        Self { subject: subject.into() }
    }
}

/// Reads the caller identity the upstream gateway has already verified.
/// Token validation happens before requests reach this service.
#[derive(Debug, Clone)]
pub struct IdentityService {
    config: IdentityConfig,
}

impl IdentityService {
    pub fn new(config: IdentityConfig) -> Self {
        Self { config }
    }

    pub fn identify_http(&self, headers: &HeaderMap) -> Result<Identity, StatusError> {
        let subject = headers
            .get(&self.config.header)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .unwrap_or("");

        if subject.is_empty() {
            return Err(StatusError::Unauthenticated(format!(
                "missing {} header",
                self.config.header
            )));
        }
        Ok(Identity::new(subject))
    }
}
