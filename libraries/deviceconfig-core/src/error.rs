/// Core error types for the device registry
use thiserror::Error;

use crate::types::{DeviceId, DeviceType};

/// Result type alias using `DeviceError`
pub type Result<T> = std::result::Result<T, DeviceError>;

/// Core error type for device operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeviceError {
    /// The operation targeted an id that is not stored
    #[error("A device with id {0} was not found.")]
    NotFound(DeviceId),

    /// Create on an id that is already taken by any variant
    #[error("A device with id {0} already exists.")]
    AlreadyExists(DeviceId),

    /// The stored variant differs from the variant of the request
    #[error(
        "Type of resource with id {id} doesn't match device type in document. \
         resourceType: {existing}, invalidDeviceType: {invalid}"
    )]
    TypeConflict {
        /// Device the request targeted
        id: DeviceId,
        /// Variant currently stored
        existing: DeviceType,
        /// Variant the request tried to apply
        invalid: DeviceType,
    },

    /// Persistence failure (connection, query, corrupt row)
    #[error("Storage error: {0}")]
    Storage(String),
}

impl DeviceError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a type conflict error
    pub fn type_conflict(id: DeviceId, existing: DeviceType, invalid: DeviceType) -> Self {
        Self::TypeConflict {
            id,
            existing,
            invalid,
        }
    }
}
