//! In-memory stores for exercising the resolver and the HTTP layer.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::connectivity::{ConnectivityIndex, ConnectivityRecord};
use crate::kv::{Registration, RegistrationStore};
use crate::metrics::Metrics;
use crate::shadow::{DeviceState, DeviceStateStore, StateError};
use crate::status::service::DeviceStatusResolver;

#[derive(Default)]
pub struct FakeRegistrations {
    entries: Mutex<HashSet<(String, String)>>,
    fail: AtomicBool,
    calls: AtomicUsize,
}

#[async_trait]
impl RegistrationStore for FakeRegistrations {
    async fn get(&self, subject: &str, device_id: &str) -> anyhow::Result<Option<Registration>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            anyhow::bail!("registration table unavailable");
        }
        let key = (subject.to_string(), device_id.to_string());
        let found = self.entries.lock().unwrap().contains(&key);
        Ok(found.then(|| Registration {
            subject: subject.to_string(),
            device_id: device_id.to_string(),
            registered_at: None,
        }))
    }
}

#[derive(Default)]
pub struct FakeShadows {
    states: Mutex<HashMap<String, DeviceState>>,
    fail: AtomicBool,
    calls: AtomicUsize,
}

impl FakeShadows {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DeviceStateStore for FakeShadows {
    async fn get_state(&self, device_id: &str) -> Result<DeviceState, StateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(StateError::Backend(anyhow::anyhow!("shadow service unavailable")));
        }
        self.states
            .lock()
            .unwrap()
            .get(device_id)
            .cloned()
            .ok_or_else(|| StateError::ResourceNotFound(device_id.to_string()))
    }
}

#[derive(Default)]
pub struct FakeConnectivity {
    records: Mutex<HashMap<String, Vec<ConnectivityRecord>>>,
    fail: AtomicBool,
    calls: AtomicUsize,
}

impl FakeConnectivity {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConnectivityIndex for FakeConnectivity {
    async fn query(&self, device_id: &str) -> anyhow::Result<Vec<ConnectivityRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            anyhow::bail!("connectivity index unavailable");
        }
        Ok(self
            .records
            .lock()
            .unwrap()
            .get(device_id)
            .cloned()
            .unwrap_or_default())
    }
}

/// Builder wiring the three fakes and a metrics handle into a resolver.
#[derive(Default)]
pub struct Fixture {
    pub registrations: Arc<FakeRegistrations>,
    pub shadows: Arc<FakeShadows>,
    pub connectivity: Arc<FakeConnectivity>,
    pub metrics: Arc<Metrics>,
}

impl Fixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(self, subject: &str, device_id: &str) -> Self {
        self.registrations
            .entries
            .lock()
            .unwrap()
            .insert((subject.to_string(), device_id.to_string()));
        self
    }

    pub fn shadow(self, device_id: &str, state: Value) -> Self {
        let Value::Object(map) = state else {
            panic!("shadow fixture must be a json object");
        };
        self.shadows.states.lock().unwrap().insert(device_id.to_string(), map);
        self
    }

    pub fn connectivity(self, device_id: &str, records: Vec<ConnectivityRecord>) -> Self {
        self.connectivity
            .records
            .lock()
            .unwrap()
            .insert(device_id.to_string(), records);
        self
    }

    pub fn failing_registrations(self) -> Self {
        self.registrations.fail.store(true, Ordering::SeqCst);
        self
    }

    pub fn failing_shadows(self) -> Self {
        self.shadows.fail.store(true, Ordering::SeqCst);
        self
    }

    pub fn failing_connectivity(self) -> Self {
        self.connectivity.fail.store(true, Ordering::SeqCst);
        self
    }

    pub fn resolver(&self) -> DeviceStatusResolver {
        DeviceStatusResolver::new(
            self.registrations.clone(),
            self.shadows.clone(),
            self.connectivity.clone(),
            self.metrics.clone(),
        )
    }
}
