//! Storage traits for device persistence

use crate::error::Result;
use crate::types::{Device, DeviceId, DeviceType, DeviceUpdate};
use async_trait::async_trait;

/// Persistence facade for devices
///
/// Every operation runs inside a [`DeviceTransaction`] obtained from
/// [`DeviceStore::begin`], so a caller decides exactly which calls form one
/// atomic unit.
#[async_trait]
pub trait DeviceStore: Send + Sync {
    /// Start a transaction that will write
    ///
    /// Implementations take the write lock up front, so concurrent writers
    /// wait for each other instead of failing when they upgrade.
    async fn begin(&self) -> Result<Box<dyn DeviceTransaction>>;

    /// Start a transaction that only reads
    async fn begin_read(&self) -> Result<Box<dyn DeviceTransaction>>;
}

/// One atomic unit of work against the device store
///
/// Writes become visible to other transactions only after [`commit`].
/// Dropping a transaction without committing discards its writes.
///
/// [`commit`]: DeviceTransaction::commit
#[async_trait]
pub trait DeviceTransaction: Send {
    // ========================================================================
    // Writes
    // ========================================================================

    /// Persist a new device
    ///
    /// Fails with `AlreadyExists` if any variant already uses the id.
    async fn create_device(&mut self, device: &Device) -> Result<()>;

    /// Overwrite every field of a stored device
    ///
    /// Fails with `NotFound` if the id is absent. The variant is not checked
    /// here; callers compare it with [`find_type_by_id`](Self::find_type_by_id) first.
    async fn replace(&mut self, device: &Device) -> Result<()>;

    /// Overwrite the present fields of `update` onto a stored device
    ///
    /// Fails with `NotFound` if the id is absent and with `TypeConflict` if
    /// the update is for another variant.
    async fn merge(&mut self, id: &DeviceId, update: &DeviceUpdate) -> Result<()>;

    // ========================================================================
    // Reads
    // ========================================================================

    /// Get a device by ID, failing with `NotFound` if absent
    async fn find_by_id(&mut self, id: &DeviceId) -> Result<Device>;

    /// Get only the variant of a device, failing with `NotFound` if absent
    async fn find_type_by_id(&mut self, id: &DeviceId) -> Result<DeviceType>;

    /// Get all devices, in no particular order
    async fn find_all(&mut self) -> Result<Vec<Device>>;

    // ========================================================================
    // Completion
    // ========================================================================

    /// Make all writes of this transaction durable
    async fn commit(self: Box<Self>) -> Result<()>;

    /// Discard all writes of this transaction
    async fn rollback(self: Box<Self>) -> Result<()>;
}
