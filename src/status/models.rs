use serde_json::{Map, Value};

use crate::connectivity::ConnectivityRecord;
use crate::shadow::DeviceState;

/// Reported attributes plus the injected `connected` flag.
pub type StatusDocument = Map<String, Value>;

pub const CONNECTED_FIELD: &str = "connected";

/// Connectivity of a device given its index entries. Only the first entry is
/// consulted; no entries means disconnected.
pub fn resolve_connected(records: &[ConnectivityRecord]) -> bool {
    records
        .first()
        .map(|record| record.connectivity.connected)
        .unwrap_or(false)
}

/// Merges `connected` into the reported state. A reported attribute with the
/// same name is overwritten in place.
pub fn assemble(state: DeviceState, connected: bool) -> StatusDocument {
    let mut document = state;
    document.insert(CONNECTED_FIELD.to_string(), Value::Bool(connected));
    document
}
