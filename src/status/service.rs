use std::sync::Arc;
use std::sync::atomic::Ordering;

use tracing::{debug, error, warn};

use crate::auth::Identity;
use crate::connectivity::ConnectivityIndex;
use crate::error::StatusError;
use crate::kv::{Registration, RegistrationStore};
use crate::metrics::Metrics;
use crate::shadow::{DeviceState, DeviceStateStore, StateError};

use super::models::{assemble, resolve_connected, StatusDocument};

/// Resolves the status of a device on behalf of a caller:
/// authorize, fetch the shadow, enrich it with connectivity, return.
///
/// Holds no per-request state, so one instance serves concurrent requests.
pub struct DeviceStatusResolver {
    registrations: Arc<dyn RegistrationStore>,
    shadows: Arc<dyn DeviceStateStore>,
    connectivity: Arc<dyn ConnectivityIndex>,
    metrics: Arc<Metrics>,
}

impl DeviceStatusResolver {
    pub fn new(
        registrations: Arc<dyn RegistrationStore>,
        shadows: Arc<dyn DeviceStateStore>,
        connectivity: Arc<dyn ConnectivityIndex>,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self { registrations, shadows, connectivity, metrics }
    }

    pub async fn get_device_status(
        &self,
        identity: &Identity,
        device_id: &str,
    ) -> Result<StatusDocument, StatusError> {
        self.metrics.status_requests_total.fetch_add(1, Ordering::Relaxed);

        self.authorize(identity, device_id).await?;
        let state = self.fetch_state(device_id).await?;
        let connected = self.fetch_connected(device_id).await?;

        let document = assemble(state, connected);
        self.metrics.status_success_total.fetch_add(1, Ordering::Relaxed);
        debug!(subject = identity.subject, device_id, connected, "resolved device status");
        Ok(document)
    }

    async fn authorize(&self, identity: &Identity, device_id: &str) -> Result<Registration, StatusError> {
        match self.registrations.get(&identity.subject, device_id).await {
            Ok(Some(registration)) => {
                debug!(
                    subject = identity.subject,
                    device_id,
                    registered_at = ?registration.registered_at,
                    "caller authorized"
                );
                Ok(registration)
            }
            Ok(None) => {
                self.metrics.missing_registration_total.fetch_add(1, Ordering::Relaxed);
                warn!(subject = identity.subject, device_id, "no registration for device");
                Err(StatusError::MissingRegistration(device_id.to_string()))
            }
            Err(e) => {
                self.metrics.registration_failure_total.fetch_add(1, Ordering::Relaxed);
                error!(subject = identity.subject, device_id, error = %e, "registration lookup failed");
                Err(StatusError::RegistrationRetrieveFailure(device_id.to_string()))
            }
        }
    }

    async fn fetch_state(&self, device_id: &str) -> Result<DeviceState, StatusError> {
        match self.shadows.get_state(device_id).await {
            Ok(state) => Ok(state),
            Err(StateError::ResourceNotFound(_)) => {
                // never reported: an empty document, not a failure
                self.metrics.empty_state_total.fetch_add(1, Ordering::Relaxed);
                debug!(device_id, "device has no shadow yet");
                Ok(DeviceState::new())
            }
            Err(StateError::Backend(e)) => {
                self.metrics.status_failure_total.fetch_add(1, Ordering::Relaxed);
                error!(device_id, error = %e, "shadow lookup failed");
                Err(StatusError::StatusRetrieveFailure(device_id.to_string()))
            }
        }
    }

    async fn fetch_connected(&self, device_id: &str) -> Result<bool, StatusError> {
        let records = self.connectivity.query(device_id).await.map_err(|e| {
            self.metrics.status_failure_total.fetch_add(1, Ordering::Relaxed);
            error!(device_id, error = %e, "connectivity lookup failed");
            StatusError::StatusRetrieveFailure(device_id.to_string())
        })?;
        if records.len() > 1 {
            debug!(device_id, matches = records.len(), "multiple connectivity entries, using first");
        }
        Ok(resolve_connected(&records))
    }
}
