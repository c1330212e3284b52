//! Build errors for the device builder.

use thiserror::Error;

/// Errors that can occur when building a device.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("Device label is empty. Call .label(name) with a non-blank name")]
    EmptyLabel,

    #[error("History capacity must be at least 1")]
    ZeroHistoryCapacity,

    #[error("History capacity set but history recording is disabled")]
    CapacityWithoutHistory,
}
