use crate::config::RunConfig;
use crate::db::{self, ensure_schema, upsert_aggregates};
use crate::error::Result;
use crate::processors::aggregate_calculator::AggregateCalculator;
use crate::processors::timing::RunTiming;
use crate::utils::progress::ProgressReporter;
use serde::Serialize;
use sqlx::{Connection, SqliteConnection};
use tracing::{error, info};

/// Completion report for a statistics run.
#[derive(Debug, Clone, Serialize)]
pub struct StatisticsReport {
    pub timing: RunTiming,
    pub aggregates_written: u64,
}

impl StatisticsReport {
    pub fn summary(&self) -> String {
        format!(
            "=== Statistics Report ===\nStart: {}\nEnd: {}\nDuration: {}\nAggregates: {}\n",
            self.timing.started_at.format("%F %T"),
            self.timing.finished_at.format("%F %T"),
            self.timing.duration_display(),
            self.aggregates_written
        )
    }
}

/// Recomputes yearly aggregates from the whole observation table and
/// upserts them, committing once at the end of the run.
pub struct StatisticsProcessor {
    config: RunConfig,
}

impl StatisticsProcessor {
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    pub async fn run(&self) -> Result<StatisticsReport> {
        let run = RunTiming::start();
        info!("Starting statistics calculation");

        let mut conn = db::connect(&self.config.database_url).await?;
        let result = self.compute_and_store(&mut conn).await;
        db::close(conn).await;

        let timing = run.finish();
        info!(
            "Completed. Start: {}, End: {}, Duration: {}",
            timing.started_at.format("%F %T"),
            timing.finished_at.format("%F %T"),
            timing.duration_display()
        );

        match result {
            Ok(aggregates_written) => {
                info!("Total aggregates: {}", aggregates_written);
                Ok(StatisticsReport {
                    timing,
                    aggregates_written,
                })
            }
            Err(e) => {
                error!("Database error: {}", e);
                Err(e)
            }
        }
    }

    /// All-or-nothing: the transaction rolls back if anything fails before commit.
    async fn compute_and_store(&self, conn: &mut SqliteConnection) -> Result<u64> {
        ensure_schema(conn).await?;

        let progress = ProgressReporter::spinner("Calculating statistics...", self.config.silent);
        let mut tx = conn.begin().await?;

        let aggregates = AggregateCalculator::calculate_from_store(&mut tx).await?;
        progress.set_message(format!("Updating {} statistics...", aggregates.len()));

        let written = upsert_aggregates(&mut tx, &aggregates, self.config.batch_size).await?;
        tx.commit().await?;

        progress.finish(format!("Updated {} statistics", written));
        Ok(written)
    }
}
