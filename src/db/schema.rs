use crate::error::Result;
use sqlx::{Connection, SqliteConnection};

/// Create both tables and their unique keys (idempotent).
///
/// `weather_data` is unique on `(date, station_id)` and `statistics_data`
/// on `(station_id, year)`; the upsert writers rely on these constraints
/// for their `ON CONFLICT` targets.
pub async fn ensure_schema(conn: &mut SqliteConnection) -> Result<()> {
    let mut tx = conn.begin().await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS weather_data (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            station_id    TEXT NOT NULL,
            date          TEXT NOT NULL,
            max_temp      REAL,
            min_temp      REAL,
            precipitation REAL,
            UNIQUE (date, station_id)
        )
        "#,
    )
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS statistics_data (
            id                      INTEGER PRIMARY KEY AUTOINCREMENT,
            station_id              TEXT    NOT NULL,
            year                    INTEGER NOT NULL,
            avg_maximum_temperature REAL    NOT NULL,
            avg_minimum_temperature REAL    NOT NULL,
            total_precipitation     REAL    NOT NULL,
            UNIQUE (station_id, year)
        )
        "#,
    )
    .execute(&mut *tx)
    .await?;

    // Statistics scans group by station
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_weather_data_station_date
            ON weather_data (station_id, date)
        "#,
    )
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(())
}
