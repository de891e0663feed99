use crate::{computers, devices, displays, StorageError};
use async_trait::async_trait;
use deviceconfig_core::{
    error::Result,
    storage::{DeviceStore, DeviceTransaction},
    types::*,
    DeviceError,
};
use sqlx::{Sqlite, SqlitePool, Transaction};

/// Device store backed by `SQLite`
#[derive(Clone)]
pub struct SqliteDeviceStore {
    pool: SqlitePool,
}

impl SqliteDeviceStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DeviceStore for SqliteDeviceStore {
    async fn begin(&self) -> Result<Box<dyn DeviceTransaction>> {
        // Upgrading a deferred read to a write fails with SQLITE_BUSY without
        // waiting, so writers take the lock up front
        let tx = self
            .pool
            .begin_with("BEGIN IMMEDIATE")
            .await
            .map_err(StorageError::from)?;
        Ok(Box::new(SqliteDeviceTransaction { tx }))
    }

    async fn begin_read(&self) -> Result<Box<dyn DeviceTransaction>> {
        let tx = self.pool.begin().await.map_err(StorageError::from)?;
        Ok(Box::new(SqliteDeviceTransaction { tx }))
    }
}

/// A running `SQLite` transaction
///
/// Dropping it without [`commit`](DeviceTransaction::commit) rolls back.
pub struct SqliteDeviceTransaction {
    tx: Transaction<'static, Sqlite>,
}

impl SqliteDeviceTransaction {
    async fn write(&mut self, device: &Device) -> Result<bool> {
        let updated = match device {
            Device::Computer(computer) => computers::update(&mut self.tx, computer).await?,
            Device::Display(display) => displays::update(&mut self.tx, display).await?,
        };
        Ok(updated)
    }
}

#[async_trait]
impl DeviceTransaction for SqliteDeviceTransaction {
    async fn create_device(&mut self, device: &Device) -> Result<()> {
        if devices::exists(&mut self.tx, device.id()).await? {
            return Err(DeviceError::AlreadyExists(device.id().clone()));
        }

        let inserted = match device {
            Device::Computer(computer) => computers::insert(&mut self.tx, computer).await,
            Device::Display(display) => displays::insert(&mut self.tx, display).await,
        };

        match inserted {
            Ok(()) => Ok(()),
            Err(err) if err.is_unique_violation() => {
                Err(DeviceError::AlreadyExists(device.id().clone()))
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn replace(&mut self, device: &Device) -> Result<()> {
        if self.write(device).await? {
            Ok(())
        } else {
            Err(DeviceError::NotFound(device.id().clone()))
        }
    }

    async fn merge(&mut self, id: &DeviceId, update: &DeviceUpdate) -> Result<()> {
        let mut device = self.find_by_id(id).await?;
        device.merge(update)?;
        self.write(&device).await?;
        Ok(())
    }

    async fn find_by_id(&mut self, id: &DeviceId) -> Result<Device> {
        let device_type = devices::get_type_by_id(&mut self.tx, id)
            .await?
            .ok_or_else(|| DeviceError::NotFound(id.clone()))?;

        let device = match device_type {
            DeviceType::Computer => computers::get_by_id(&mut self.tx, id)
                .await?
                .map(Device::Computer),
            DeviceType::Display => displays::get_by_id(&mut self.tx, id)
                .await?
                .map(Device::Display),
        };

        device.ok_or_else(|| DeviceError::NotFound(id.clone()))
    }

    async fn find_type_by_id(&mut self, id: &DeviceId) -> Result<DeviceType> {
        devices::get_type_by_id(&mut self.tx, id)
            .await?
            .ok_or_else(|| DeviceError::NotFound(id.clone()))
    }

    async fn find_all(&mut self) -> Result<Vec<Device>> {
        let mut all: Vec<Device> = computers::get_all(&mut self.tx)
            .await?
            .into_iter()
            .map(Device::Computer)
            .collect();
        all.extend(
            displays::get_all(&mut self.tx)
                .await?
                .into_iter()
                .map(Device::Display),
        );
        Ok(all)
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        self.tx.commit().await.map_err(StorageError::from)?;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<()> {
        self.tx.rollback().await.map_err(StorageError::from)?;
        Ok(())
    }
}
