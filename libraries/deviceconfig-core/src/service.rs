//! Device service: business rules around the device store

use std::sync::Arc;

use crate::error::{DeviceError, Result};
use crate::storage::{DeviceStore, DeviceTransaction};
use crate::types::{Device, DeviceId, DeviceType, DeviceUpdate};

/// Orchestrates store calls, one transaction per public method
#[derive(Clone)]
pub struct DeviceService {
    store: Arc<dyn DeviceStore>,
}

impl DeviceService {
    pub fn new(store: Arc<dyn DeviceStore>) -> Self {
        Self { store }
    }

    /// Register a new device
    pub async fn create_device(&self, device: Device) -> Result<()> {
        tracing::debug!(device_id = %device.id(), device_type = %device.device_type(), "Creating device");

        let mut tx = self.store.begin().await?;
        let result = tx.create_device(&device).await;
        finish(tx, result).await?;

        tracing::info!(device_id = %device.id(), "Device created");
        Ok(())
    }

    /// Get a device by ID
    pub async fn find_device_by_id(&self, id: &DeviceId) -> Result<Device> {
        let mut tx = self.store.begin_read().await?;
        let result = tx.find_by_id(id).await;
        finish(tx, result).await
    }

    /// Get only the variant of a device
    pub async fn find_device_type_by_id(&self, id: &DeviceId) -> Result<DeviceType> {
        let mut tx = self.store.begin_read().await?;
        let result = tx.find_type_by_id(id).await;
        finish(tx, result).await
    }

    /// Replace all fields of a device, keeping its variant
    ///
    /// # Errors
    ///
    /// `NotFound` if the device does not exist, `TypeConflict` if `device`
    /// is of another variant than the stored one. Nothing is written in
    /// either case.
    pub async fn replace_device(&self, device: Device) -> Result<()> {
        tracing::debug!(device_id = %device.id(), "Replacing device");

        let mut tx = self.store.begin().await?;
        let result = replace_in(tx.as_mut(), &device).await;
        finish(tx, result).await?;

        tracing::info!(device_id = %device.id(), "Device replaced");
        Ok(())
    }

    /// Merge the present fields of `update` into a device
    ///
    /// The store verifies inside the same transaction that `update` matches
    /// the stored variant.
    pub async fn update_device(&self, id: &DeviceId, update: DeviceUpdate) -> Result<()> {
        tracing::debug!(device_id = %id, device_type = %update.device_type(), "Updating device");

        let mut tx = self.store.begin().await?;
        let result = tx.merge(id, &update).await;
        finish(tx, result).await?;

        tracing::info!(device_id = %id, "Device updated");
        Ok(())
    }

    /// Get all devices
    pub async fn find_all_devices(&self) -> Result<Vec<Device>> {
        let mut tx = self.store.begin_read().await?;
        let result = tx.find_all().await;
        finish(tx, result).await
    }

    /// Open and release a read transaction to confirm the store is reachable
    pub async fn check_store(&self) -> Result<()> {
        self.store.begin_read().await?.rollback().await
    }
}

async fn replace_in(tx: &mut dyn DeviceTransaction, device: &Device) -> Result<()> {
    let existing = tx.find_type_by_id(device.id()).await?;
    let supplied = device.device_type();
    if existing != supplied {
        return Err(DeviceError::type_conflict(
            device.id().clone(),
            existing,
            supplied,
        ));
    }
    tx.replace(device).await
}

/// Commit on success, roll back on failure
///
/// A failed rollback is logged and the original error is returned.
async fn finish<T>(tx: Box<dyn DeviceTransaction>, result: Result<T>) -> Result<T> {
    match result {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::warn!("Rollback failed: {}", rollback_err);
            }
            Err(err)
        }
    }
}
