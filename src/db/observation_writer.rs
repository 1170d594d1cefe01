use crate::error::Result;
use crate::models::Observation;
use chrono::NaiveDate;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};
use std::collections::HashMap;
use tracing::debug;
use validator::Validate;

/// Insert or update observations keyed on `(date, station_id)`.
///
/// Rows are written in chunks of `batch_size`. The result is the same as
/// upserting each record on its own, in input order: when a key appears more
/// than once, the last occurrence wins. Returns the number of records
/// processed; an empty slice never touches the database. Every record is
/// validated before the first write, so an invalid one leaves the store as it was.
pub async fn upsert_observations(
    conn: &mut SqliteConnection,
    observations: &[Observation],
    batch_size: usize,
) -> Result<u64> {
    if observations.is_empty() {
        return Ok(0);
    }

    for observation in observations {
        observation.validate()?;
    }

    let latest = latest_per_key(observations);
    let batch_size = batch_size.max(1);

    for (batch_index, chunk) in latest.chunks(batch_size).enumerate() {
        let mut qb = QueryBuilder::<Sqlite>::new(
            "INSERT INTO weather_data (station_id, date, max_temp, min_temp, precipitation) ",
        );

        qb.push_values(chunk, |mut row, observation| {
            row.push_bind(&observation.station_id)
                .push_bind(observation.date)
                .push_bind(observation.max_temp)
                .push_bind(observation.min_temp)
                .push_bind(observation.precipitation);
        });

        qb.push(
            " ON CONFLICT (date, station_id) DO UPDATE SET \
             max_temp = excluded.max_temp, \
             min_temp = excluded.min_temp, \
             precipitation = excluded.precipitation",
        );

        qb.build().execute(&mut *conn).await?;
        debug!("Upserted observation batch {} ({} rows)", batch_index + 1, chunk.len());
    }

    Ok(observations.len() as u64)
}

/// Keep only the last record for each key, preserving input order.
fn latest_per_key(observations: &[Observation]) -> Vec<&Observation> {
    let mut last_index: HashMap<(&str, NaiveDate), usize> =
        HashMap::with_capacity(observations.len());
    for (index, observation) in observations.iter().enumerate() {
        last_index.insert((observation.station_id.as_str(), observation.date), index);
    }

    observations
        .iter()
        .enumerate()
        .filter(|(index, o)| last_index.get(&(o.station_id.as_str(), o.date)) == Some(index))
        .map(|(_, o)| o)
        .collect()
}
