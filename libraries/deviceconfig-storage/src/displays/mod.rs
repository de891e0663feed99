//! Display rows

use crate::error::{Result, StorageError};
use deviceconfig_core::types::{DeviceId, Display, Resolution};
use sqlx::{sqlite::SqliteRow, Row, SqliteConnection};

fn from_row(row: &SqliteRow) -> Result<Display> {
    let resolution: String = row.try_get("resolution")?;
    let resolution = Resolution::from_str(&resolution).ok_or_else(|| {
        StorageError::corrupt_row("display", format!("unknown resolution {resolution}"))
    })?;

    Ok(Display {
        id: DeviceId::new(row.try_get::<String, _>("id")?),
        name: row.try_get("name")?,
        resolution,
    })
}

/// Insert a new display
pub async fn insert(conn: &mut SqliteConnection, display: &Display) -> Result<()> {
    sqlx::query("INSERT INTO display (id, name, resolution) VALUES (?, ?, ?)")
        .bind(display.id.as_str())
        .bind(&display.name)
        .bind(display.resolution.as_str())
        .execute(conn)
        .await?;

    Ok(())
}

/// Get a display by ID
pub async fn get_by_id(conn: &mut SqliteConnection, id: &DeviceId) -> Result<Option<Display>> {
    let row = sqlx::query("SELECT id, name, resolution FROM display WHERE id = ?")
        .bind(id.as_str())
        .fetch_optional(conn)
        .await?;

    row.as_ref().map(from_row).transpose()
}

/// Get all displays, ordered by id
pub async fn get_all(conn: &mut SqliteConnection) -> Result<Vec<Display>> {
    let rows = sqlx::query("SELECT id, name, resolution FROM display ORDER BY id")
        .fetch_all(conn)
        .await?;

    rows.iter().map(from_row).collect()
}

/// Overwrite every column of a stored display
///
/// Returns `false` if no display has this id.
pub async fn update(conn: &mut SqliteConnection, display: &Display) -> Result<bool> {
    let result = sqlx::query("UPDATE display SET name = ?, resolution = ? WHERE id = ?")
        .bind(&display.name)
        .bind(display.resolution.as_str())
        .bind(display.id.as_str())
        .execute(conn)
        .await?;

    Ok(result.rows_affected() > 0)
}
