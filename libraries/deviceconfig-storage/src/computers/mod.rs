//! Computer rows

use crate::error::Result;
use deviceconfig_core::types::{Computer, DeviceId};
use sqlx::{sqlite::SqliteRow, Row, SqliteConnection};

fn from_row(row: &SqliteRow) -> Result<Computer> {
    Ok(Computer {
        id: DeviceId::new(row.try_get::<String, _>("id")?),
        name: row.try_get("name")?,
        username: row.try_get("username")?,
        password: row.try_get("password")?,
        ip_address: row.try_get("ip_address")?,
    })
}

/// Insert a new computer
pub async fn insert(conn: &mut SqliteConnection, computer: &Computer) -> Result<()> {
    sqlx::query(
        "INSERT INTO computer (id, name, username, password, ip_address)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(computer.id.as_str())
    .bind(&computer.name)
    .bind(&computer.username)
    .bind(&computer.password)
    .bind(&computer.ip_address)
    .execute(conn)
    .await?;

    Ok(())
}

/// Get a computer by ID
pub async fn get_by_id(conn: &mut SqliteConnection, id: &DeviceId) -> Result<Option<Computer>> {
    let row = sqlx::query(
        "SELECT id, name, username, password, ip_address FROM computer WHERE id = ?",
    )
    .bind(id.as_str())
    .fetch_optional(conn)
    .await?;

    row.as_ref().map(from_row).transpose()
}

/// Get all computers, ordered by id
pub async fn get_all(conn: &mut SqliteConnection) -> Result<Vec<Computer>> {
    let rows = sqlx::query(
        "SELECT id, name, username, password, ip_address FROM computer ORDER BY id",
    )
    .fetch_all(conn)
    .await?;

    rows.iter().map(from_row).collect()
}

/// Overwrite every column of a stored computer
///
/// Returns `false` if no computer has this id.
pub async fn update(conn: &mut SqliteConnection, computer: &Computer) -> Result<bool> {
    let result = sqlx::query(
        "UPDATE computer
         SET name = ?, username = ?, password = ?, ip_address = ?
         WHERE id = ?",
    )
    .bind(&computer.name)
    .bind(&computer.username)
    .bind(&computer.password)
    .bind(&computer.ip_address)
    .bind(computer.id.as_str())
    .execute(conn)
    .await?;

    Ok(result.rows_affected() > 0)
}
