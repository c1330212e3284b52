//! Serializable snapshots of a device.
//!
//! A snapshot is an in-memory image of a device that can be encoded as JSON
//! or binary and turned back into a device. Where the bytes go is up to the
//! caller.
//!
//! The state is stored as its raw code, so a decoded snapshot may name a
//! state that does not exist. `Device::restore` validates every snapshot
//! before building a device from it.

use crate::core::{DeviceState, State, StateHistory};
use crate::device::Device;
use serde::{Deserialize, Serialize};
use stillwater::validation::Validation;
use tracing::{debug, warn};

pub mod error;
mod validate;

pub use error::{SnapshotError, SnapshotViolation};

/// Version identifier for snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serializable image of a device.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeviceSnapshot {
    /// Snapshot format version
    pub version: u32,

    pub label: String,

    /// Raw state code, see `DeviceState::code`
    pub state_code: u8,

    /// Transition history, if the device records one
    pub history: Option<StateHistory>,
}

impl DeviceSnapshot {
    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string_pretty(self).map_err(|e| SnapshotError::Serialization(e.to_string()))
    }

    /// Deserialize from JSON. Does not validate; see `Device::restore`.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(json).map_err(|e| SnapshotError::Deserialization(e.to_string()))
    }

    /// Serialize to compact binary.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(|e| SnapshotError::Serialization(e.to_string()))
    }

    /// Deserialize from binary. Does not validate; see `Device::restore`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        bincode::deserialize(bytes).map_err(|e| SnapshotError::Deserialization(e.to_string()))
    }
}

impl Device {
    /// Take a snapshot of this device.
    ///
    /// # Example
    ///
    /// ```rust
    /// use device_lifecycle::{Device, DeviceSnapshot, DeviceState};
    ///
    /// let mut device = Device::new();
    /// device.receive_command();
    ///
    /// let json = device.snapshot().to_json()?;
    /// let restored = Device::restore(DeviceSnapshot::from_json(&json)?)?;
    /// assert_eq!(restored.current_state(), DeviceState::Receiving);
    /// # Ok::<(), device_lifecycle::SnapshotError>(())
    /// ```
    pub fn snapshot(&self) -> DeviceSnapshot {
        DeviceSnapshot {
            version: SNAPSHOT_VERSION,
            label: self.label.clone(),
            state_code: self.state.code(),
            history: self.history.clone(),
        }
    }

    /// Rebuild a device from a snapshot.
    ///
    /// Rejects snapshots with an unsupported version, and snapshots whose
    /// contents could not have come from a real device. In the second case
    /// every violation found is reported.
    pub fn restore(snapshot: DeviceSnapshot) -> Result<Self, SnapshotError> {
        if snapshot.version != SNAPSHOT_VERSION {
            warn!(
                device = %snapshot.label,
                version = snapshot.version,
                "snapshot version not supported"
            );
            return Err(SnapshotError::UnsupportedVersion {
                found: snapshot.version,
                supported: SNAPSHOT_VERSION,
            });
        }

        if let Validation::Failure(errors) = validate::validate(&snapshot) {
            let violations: Vec<SnapshotViolation> = errors.iter().cloned().collect();
            warn!(
                device = %snapshot.label,
                violations = violations.len(),
                "snapshot rejected"
            );
            return Err(SnapshotError::Invalid(violations));
        }

        let state = DeviceState::try_from(snapshot.state_code).map_err(|code| {
            SnapshotError::Invalid(vec![SnapshotViolation::UnknownStateCode { code }])
        })?;

        debug!(
            device = %snapshot.label,
            state = state.name(),
            "device restored"
        );

        Ok(Self {
            label: snapshot.label.trim().to_string(),
            state,
            history: snapshot.history,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Command;

    fn busy_device() -> Device {
        let mut device = Device::builder().label("gpu0").build().unwrap();
        device.run(Command::ALL);
        device.run([Command::ReceiveCommand, Command::ProcessCommand]);
        device
    }

    #[test]
    fn snapshot_captures_device() {
        let device = busy_device();
        let snapshot = device.snapshot();

        assert_eq!(snapshot.version, SNAPSHOT_VERSION);
        assert_eq!(snapshot.label, "gpu0");
        assert_eq!(snapshot.state_code, DeviceState::Executing.code());
        assert_eq!(snapshot.history.as_ref().map(|h| h.len()), Some(6));
    }

    #[test]
    fn json_restore_reproduces_device() {
        let device = busy_device();
        let json = device.snapshot().to_json().unwrap();

        let restored = Device::restore(DeviceSnapshot::from_json(&json).unwrap()).unwrap();
        assert_eq!(restored, device);
    }

    #[test]
    fn binary_restore_reproduces_device() {
        let device = busy_device();
        let bytes = device.snapshot().to_bytes().unwrap();

        let restored = Device::restore(DeviceSnapshot::from_bytes(&bytes).unwrap()).unwrap();
        assert_eq!(restored, device);
    }

    #[test]
    fn restored_device_keeps_working() {
        let device = busy_device();
        let mut restored = Device::restore(device.snapshot()).unwrap();

        assert!(restored.complete_task());
        assert!(restored.reset());
        assert_eq!(restored.history().map(|h| h.next_sequence()), Some(9));
    }

    #[test]
    fn restore_rejects_unknown_state_code() {
        let mut snapshot = Device::new().snapshot();
        snapshot.history = None;
        snapshot.state_code = 7;

        match Device::restore(snapshot) {
            Err(SnapshotError::Invalid(violations)) => {
                assert_eq!(
                    violations,
                    vec![SnapshotViolation::UnknownStateCode { code: 7 }]
                );
            }
            other => panic!("Expected invalid snapshot, got {other:?}"),
        }
    }

    #[test]
    fn restore_rejects_unsupported_version() {
        let mut snapshot = Device::new().snapshot();
        snapshot.version = SNAPSHOT_VERSION + 1;

        let result = Device::restore(snapshot);
        assert!(matches!(
            result,
            Err(SnapshotError::UnsupportedVersion { found: 2, supported: 1 })
        ));
    }

    #[test]
    fn corrupted_json_code_is_caught_on_restore() {
        let json = Device::new().snapshot().to_json().unwrap();
        let corrupted = json.replace("\"state_code\": 0", "\"state_code\": 200");

        let snapshot = DeviceSnapshot::from_json(&corrupted).unwrap();
        let err = Device::restore(snapshot).unwrap_err();
        assert!(err.to_string().contains("unknown state code 200"));
    }

    #[test]
    fn malformed_json_fails_to_decode() {
        let result = DeviceSnapshot::from_json("{ not json");
        assert!(matches!(result, Err(SnapshotError::Deserialization(_))));
    }

    #[test]
    fn truncated_bytes_fail_to_decode() {
        let bytes = Device::new().snapshot().to_bytes().unwrap();
        let result = DeviceSnapshot::from_bytes(&bytes[..bytes.len() / 2]);
        assert!(matches!(result, Err(SnapshotError::Deserialization(_))));
    }

    fn with_history_counters(device: &Device, first_sequence: u64, total: u64) -> DeviceSnapshot {
        let mut value = serde_json::to_value(device.snapshot()).unwrap();
        value["history"]["transitions"][0]["sequence"] = serde_json::json!(first_sequence);
        value["history"]["total_recorded"] = serde_json::json!(total);
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn restore_rejects_sequence_overflow_instead_of_panicking() {
        let mut device = Device::new();
        device.run([Command::ReceiveCommand, Command::ProcessCommand]);

        let result = Device::restore(with_history_counters(&device, u64::MAX, 2));
        match result {
            Err(SnapshotError::Invalid(violations)) => {
                assert!(violations.contains(&SnapshotViolation::SequenceGap {
                    previous: u64::MAX,
                    found: 2,
                }));
            }
            other => panic!("Expected invalid snapshot, got {other:?}"),
        }
    }

    #[test]
    fn restore_rejects_exhausted_counter() {
        let mut device = Device::builder().history_capacity(1).build().unwrap();
        device.run([Command::ReceiveCommand, Command::ProcessCommand]);

        let result = Device::restore(with_history_counters(&device, u64::MAX, u64::MAX));
        match result {
            Err(SnapshotError::Invalid(violations)) => {
                assert_eq!(violations, vec![SnapshotViolation::SequenceExhausted]);
            }
            other => panic!("Expected invalid snapshot, got {other:?}"),
        }
    }

    #[test]
    fn restore_rejects_busy_state_with_empty_history() {
        let mut snapshot = Device::new().snapshot();
        snapshot.state_code = DeviceState::Completed.code();

        let err = Device::restore(snapshot).unwrap_err();
        assert!(err.to_string().contains("history is empty"));
    }
}
