//! Queries spanning every device variant

use crate::error::{Result, StorageError};
use deviceconfig_core::types::{DeviceId, DeviceType};
use sqlx::{Row, SqliteConnection};

/// Get the variant stored under an id, looking through every variant table
pub async fn get_type_by_id(
    conn: &mut SqliteConnection,
    id: &DeviceId,
) -> Result<Option<DeviceType>> {
    let row = sqlx::query(
        "SELECT 'computer' AS device_type FROM computer WHERE id = ?
         UNION ALL
         SELECT 'display' AS device_type FROM display WHERE id = ?
         LIMIT 1",
    )
    .bind(id.as_str())
    .bind(id.as_str())
    .fetch_optional(conn)
    .await?;

    row.map(|row| {
        let device_type: String = row.try_get("device_type")?;
        DeviceType::from_str(&device_type).ok_or_else(|| {
            StorageError::corrupt_row("device", format!("unknown device type {device_type}"))
        })
    })
    .transpose()
}

/// Whether any variant uses this id
pub async fn exists(conn: &mut SqliteConnection, id: &DeviceId) -> Result<bool> {
    Ok(get_type_by_id(conn, id).await?.is_some())
}
