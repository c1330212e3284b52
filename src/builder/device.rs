//! Builder for configuring devices.

use crate::builder::error::BuildError;
use crate::core::{DeviceState, StateHistory};
use crate::device::Device;
use tracing::debug;

/// Builder for constructing devices with a fluent API.
///
/// Defaults: label `"device"`, history recording on, unbounded history.
/// Every device starts in `Idle`; the builder has no way to choose another
/// initial state.
#[derive(Clone, Debug)]
pub struct DeviceBuilder {
    label: String,
    record_history: bool,
    history_capacity: Option<usize>,
}

impl DeviceBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            label: Device::DEFAULT_LABEL.to_string(),
            record_history: true,
            history_capacity: None,
        }
    }

    /// Set the name used in log fields and snapshots.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Enable or disable transition history.
    pub fn record_history(mut self, enabled: bool) -> Self {
        self.record_history = enabled;
        self
    }

    /// Keep at most `capacity` history entries, dropping the oldest.
    pub fn history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = Some(capacity);
        self
    }

    /// Build the device.
    /// Returns an error if the configuration is inconsistent.
    pub fn build(self) -> Result<Device, BuildError> {
        let label = self.label.trim();
        if label.is_empty() {
            return Err(BuildError::EmptyLabel);
        }

        let history = match (self.record_history, self.history_capacity) {
            (false, Some(_)) => return Err(BuildError::CapacityWithoutHistory),
            (false, None) => None,
            (true, Some(0)) => return Err(BuildError::ZeroHistoryCapacity),
            (true, Some(capacity)) => Some(StateHistory::with_capacity(capacity)),
            (true, None) => Some(StateHistory::new()),
        };

        debug!(
            device = label,
            history = self.record_history,
            capacity = ?self.history_capacity,
            "device built"
        );

        Ok(Device {
            label: label.to_string(),
            state: DeviceState::Idle,
            history,
        })
    }
}

impl Default for DeviceBuilder {
    fn default() -> Self {
        Self::new()
    }
}
