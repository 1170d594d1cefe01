use crate::error::Result;
use crate::models::{Observation, StoredAggregate, StoredObservation};
use crate::utils::constants::{DEFAULT_PAGE, DEFAULT_PER_PAGE, MAX_PER_PAGE};
use futures::stream::BoxStream;
use serde::Serialize;
use sqlx::SqliteConnection;

/// Page request for list queries. Out-of-range values are clamped, never rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: i64,
    pub per: i64,
}

impl Pagination {
    /// `page` below 1 becomes 1; `per` is clamped to `1..=500`.
    pub fn new(page: Option<i64>, per: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(DEFAULT_PAGE).max(1),
            per: per.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE),
        }
    }

    pub fn limit(&self) -> i64 {
        self.per
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.per)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Observations ordered by `(date, station_id)`.
pub async fn list_observations(
    conn: &mut SqliteConnection,
    pagination: &Pagination,
) -> Result<Vec<StoredObservation>> {
    let rows = sqlx::query_as::<_, StoredObservation>(
        r#"
        SELECT id, station_id, date, max_temp, min_temp, precipitation
        FROM weather_data
        ORDER BY date, station_id
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(pagination.limit())
    .bind(pagination.offset())
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows)
}

/// Aggregates ordered by `(year, station_id)`.
pub async fn list_aggregates(
    conn: &mut SqliteConnection,
    pagination: &Pagination,
) -> Result<Vec<StoredAggregate>> {
    let rows = sqlx::query_as::<_, StoredAggregate>(
        r#"
        SELECT id, station_id, year,
               avg_maximum_temperature, avg_minimum_temperature, total_precipitation
        FROM statistics_data
        ORDER BY year, station_id
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(pagination.limit())
    .bind(pagination.offset())
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows)
}

pub async fn count_observations(conn: &mut SqliteConnection) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM weather_data")
        .fetch_one(&mut *conn)
        .await?;
    Ok(count)
}

pub async fn count_aggregates(conn: &mut SqliteConnection) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM statistics_data")
        .fetch_one(&mut *conn)
        .await?;
    Ok(count)
}

/// Stream observations with all three measurements present.
pub fn stream_complete_observations(
    conn: &mut SqliteConnection,
) -> BoxStream<'_, std::result::Result<Observation, sqlx::Error>> {
    sqlx::query_as::<_, Observation>(
        r#"
        SELECT station_id, date, max_temp, min_temp, precipitation
        FROM weather_data
        WHERE max_temp IS NOT NULL
          AND min_temp IS NOT NULL
          AND precipitation IS NOT NULL
        ORDER BY station_id, date
        "#,
    )
    .fetch(conn)
}
