use std::sync::atomic::{AtomicU64, Ordering};

pub struct Metrics {
    pub status_requests_total: AtomicU64,
    pub status_success_total: AtomicU64,
    pub empty_state_total: AtomicU64,
    pub missing_registration_total: AtomicU64,
    pub registration_failure_total: AtomicU64,
    pub status_failure_total: AtomicU64,
    pub unauthenticated_total: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            status_requests_total: AtomicU64::new(0),
            status_success_total: AtomicU64::new(0),
            empty_state_total: AtomicU64::new(0),
            missing_registration_total: AtomicU64::new(0),
            registration_failure_total: AtomicU64::new(0),
            status_failure_total: AtomicU64::new(0),
            unauthenticated_total: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            status_requests_total: self.status_requests_total.load(Ordering::Relaxed),
            status_success_total: self.status_success_total.load(Ordering::Relaxed),
            empty_state_total: self.empty_state_total.load(Ordering::Relaxed),
            missing_registration_total: self.missing_registration_total.load(Ordering::Relaxed),
            registration_failure_total: self.registration_failure_total.load(Ordering::Relaxed),
            status_failure_total: self.status_failure_total.load(Ordering::Relaxed),
            unauthenticated_total: self.unauthenticated_total.load(Ordering::Relaxed),
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, serde::Serialize)]
pub struct MetricsSnapshot {
    pub status_requests_total: u64,
    pub status_success_total: u64,
    pub empty_state_total: u64,
    pub missing_registration_total: u64,
    pub registration_failure_total: u64,
    pub status_failure_total: u64,
    pub unauthenticated_total: u64,
}
