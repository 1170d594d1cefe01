use crate::db::queries::stream_complete_observations;
use crate::error::Result;
use crate::models::{Observation, YearlyAggregate};
use crate::utils::constants::AGGREGATE_DECIMAL_PLACES;
use chrono::Datelike;
use futures::TryStreamExt;
use sqlx::SqliteConnection;
use std::collections::BTreeMap;

#[derive(Debug, Default, Clone, Copy)]
struct YearTotals {
    count: u32,
    max_temp_sum: f64,
    min_temp_sum: f64,
    precipitation_sum: f64,
}

/// Groups complete observations by `(station_id, year)` and derives yearly
/// mean temperatures and total precipitation.
///
/// An observation missing any of its three measurements is ignored for every
/// field, so a group made only of incomplete rows produces no aggregate.
#[derive(Debug, Default)]
pub struct AggregateCalculator {
    groups: BTreeMap<(String, i32), YearTotals>,
    skipped: u64,
}

impl AggregateCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, observation: &Observation) {
        let (Some(max_temp), Some(min_temp), Some(precipitation)) = (
            observation.max_temp,
            observation.min_temp,
            observation.precipitation,
        ) else {
            self.skipped += 1;
            return;
        };

        let totals = self
            .groups
            .entry((observation.station_id.clone(), observation.date.year()))
            .or_default();
        totals.count += 1;
        totals.max_temp_sum += max_temp;
        totals.min_temp_sum += min_temp;
        totals.precipitation_sum += precipitation;
    }

    /// Observations ignored because a measurement was missing
    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    /// One aggregate per qualifying group, ordered by `(station_id, year)`.
    pub fn finish(self) -> Vec<YearlyAggregate> {
        self.groups
            .into_iter()
            .map(|((station_id, year), totals)| {
                let count = f64::from(totals.count);
                YearlyAggregate {
                    station_id,
                    year,
                    avg_max_temp: round_stored(totals.max_temp_sum / count),
                    avg_min_temp: round_stored(totals.min_temp_sum / count),
                    total_precipitation: round_stored(totals.precipitation_sum),
                }
            })
            .collect()
    }

    pub fn calculate<'a>(observations: impl IntoIterator<Item = &'a Observation>) -> Vec<YearlyAggregate> {
        let mut calculator = Self::new();
        for observation in observations {
            calculator.add(observation);
        }
        calculator.finish()
    }

    /// Stream every complete observation from the store through a new calculator.
    pub async fn calculate_from_store(conn: &mut SqliteConnection) -> Result<Vec<YearlyAggregate>> {
        let mut calculator = Self::new();
        let mut rows = stream_complete_observations(conn);

        while let Some(observation) = rows.try_next().await? {
            calculator.add(&observation);
        }

        Ok(calculator.finish())
    }
}

fn round_stored(value: f64) -> f64 {
    let factor = 10f64.powi(AGGREGATE_DECIMAL_PLACES);
    (value * factor).round() / factor
}
