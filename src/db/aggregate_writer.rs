use crate::error::Result;
use crate::models::YearlyAggregate;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};
use std::collections::HashMap;
use tracing::debug;

/// Insert or update yearly aggregates keyed on `(station_id, year)`.
///
/// Same contract as [`upsert_observations`](crate::db::upsert_observations):
/// batched for throughput, last occurrence of a key wins, empty input is a no-op.
pub async fn upsert_aggregates(
    conn: &mut SqliteConnection,
    aggregates: &[YearlyAggregate],
    batch_size: usize,
) -> Result<u64> {
    if aggregates.is_empty() {
        return Ok(0);
    }

    let mut last_index: HashMap<(&str, i32), usize> = HashMap::with_capacity(aggregates.len());
    for (index, aggregate) in aggregates.iter().enumerate() {
        last_index.insert((aggregate.station_id.as_str(), aggregate.year), index);
    }
    let latest: Vec<&YearlyAggregate> = aggregates
        .iter()
        .enumerate()
        .filter(|(index, a)| last_index.get(&(a.station_id.as_str(), a.year)) == Some(index))
        .map(|(_, a)| a)
        .collect();

    for chunk in latest.chunks(batch_size.max(1)) {
        let mut qb = QueryBuilder::<Sqlite>::new(
            "INSERT INTO statistics_data (station_id, year, avg_maximum_temperature, avg_minimum_temperature, total_precipitation) ",
        );

        qb.push_values(chunk, |mut row, aggregate| {
            row.push_bind(&aggregate.station_id)
                .push_bind(aggregate.year)
                .push_bind(aggregate.avg_max_temp)
                .push_bind(aggregate.avg_min_temp)
                .push_bind(aggregate.total_precipitation);
        });

        qb.push(
            " ON CONFLICT (station_id, year) DO UPDATE SET \
             avg_maximum_temperature = excluded.avg_maximum_temperature, \
             avg_minimum_temperature = excluded.avg_minimum_temperature, \
             total_precipitation = excluded.total_precipitation",
        );

        qb.build().execute(&mut *conn).await?;
    }

    debug!("Upserted {} aggregates", latest.len());
    Ok(aggregates.len() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::ensure_schema;
    use pretty_assertions::assert_eq;
    use sqlx::Connection;

    #[tokio::test]
    async fn test_upsert_aggregates_overwrites_by_station_year() {
        let mut conn = SqliteConnection::connect("sqlite::memory:").await.unwrap();
        ensure_schema(&mut conn).await.unwrap();

        let first = vec![
            YearlyAggregate::new("S1", 2020, 15.0, 5.0, 5.0),
            YearlyAggregate::new("S1", 2021, 14.0, 4.0, 7.5),
        ];
        assert_eq!(upsert_aggregates(&mut conn, &first, 1).await.unwrap(), 2);

        let second = vec![YearlyAggregate::new("S1", 2020, 16.5, 6.0, 9.25)];
        upsert_aggregates(&mut conn, &second, 1000).await.unwrap();

        let rows: Vec<YearlyAggregate> = sqlx::query_as(
            "SELECT station_id, year, avg_maximum_temperature AS avg_max_temp, \
             avg_minimum_temperature AS avg_min_temp, total_precipitation \
             FROM statistics_data ORDER BY station_id, year",
        )
        .fetch_all(&mut conn)
        .await
        .unwrap();

        assert_eq!(rows, vec![second[0].clone(), first[1].clone()]);
    }
}
