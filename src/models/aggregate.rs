use serde::{Deserialize, Serialize};

/// Yearly statistics for one station, keyed on `(station_id, year)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct YearlyAggregate {
    pub station_id: String,
    pub year: i32,
    pub avg_max_temp: f64,
    pub avg_min_temp: f64,
    pub total_precipitation: f64,
}

impl YearlyAggregate {
    pub fn new(
        station_id: impl Into<String>,
        year: i32,
        avg_max_temp: f64,
        avg_min_temp: f64,
        total_precipitation: f64,
    ) -> Self {
        Self {
            station_id: station_id.into(),
            year,
            avg_max_temp,
            avg_min_temp,
            total_precipitation,
        }
    }
}

/// An aggregate as stored, using the persisted column names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct StoredAggregate {
    pub id: i64,
    pub station_id: String,
    pub year: i32,
    pub avg_maximum_temperature: f64,
    pub avg_minimum_temperature: f64,
    pub total_precipitation: f64,
}
