use crate::config::RunConfig;
use crate::db::{self, ensure_schema, upsert_observations};
use crate::error::Result;
use crate::processors::timing::{RunStart, RunTiming};
use crate::readers::ObservationReader;
use crate::utils::progress::ProgressReporter;
use serde::Serialize;
use sqlx::{Connection, SqliteConnection};
use std::path::Path;
use tracing::{debug, error, info};

/// Completion report for a directory ingestion run.
#[derive(Debug, Clone, Serialize)]
pub struct IngestionReport {
    pub timing: RunTiming,
    pub files_processed: usize,
    pub rows_processed: u64,
}

impl IngestionReport {
    pub fn summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str("=== Ingestion Report ===\n");
        summary.push_str(&format!(
            "Start: {}\n",
            self.timing.started_at.format("%F %T")
        ));
        summary.push_str(&format!(
            "End: {}\n",
            self.timing.finished_at.format("%F %T")
        ));
        summary.push_str(&format!("Duration: {}\n", self.timing.duration_display()));
        summary.push_str(&format!("Files: {}\n", self.files_processed));
        summary.push_str(&format!("Total rows: {}\n", self.rows_processed));

        summary
    }
}

/// Loads every observation file in a directory and upserts it, one file at
/// a time, one transaction per file.
///
/// Any I/O or parse failure stops the run; files committed before the
/// failure stay committed. There is no retry.
pub struct IngestionProcessor {
    config: RunConfig,
}

impl IngestionProcessor {
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    /// Ingest the configured data directory.
    pub async fn run(&self) -> Result<IngestionReport> {
        self.ingest_directory(&self.config.data_dir).await
    }

    pub async fn ingest_directory(&self, dir: &Path) -> Result<IngestionReport> {
        let mut conn = db::connect(&self.config.database_url).await?;

        let result = self.ingest_with_connection(&mut conn, dir).await;
        db::close(conn).await;

        match &result {
            Ok(report) => {
                info!("End: {}", report.timing.finished_at.format("%F %T"));
                info!("Duration: {}", report.timing.duration_display());
                info!("Total rows: {}", report.rows_processed);
            }
            Err(e) => error!("Ingestion of {} aborted: {}", dir.display(), e),
        }

        result
    }

    async fn ingest_with_connection(
        &self,
        conn: &mut SqliteConnection,
        dir: &Path,
    ) -> Result<IngestionReport> {
        let run = RunTiming::start();
        info!("Start: {}", run.started_at.format("%F %T"));

        ensure_schema(conn).await?;

        let reader = ObservationReader::new()
            .with_extension(&self.config.file_extension)
            .with_skip_malformed(self.config.skip_malformed);
        let files = reader.find_observation_files(dir)?;
        info!("Ingesting {} files from {}", files.len(), dir.display());

        let progress = ProgressReporter::for_files(files.len(), self.config.silent);
        let mut rows_processed = 0;

        for path in &files {
            progress.start_file(path);
            rows_processed += self.ingest_file(conn, &reader, path).await?;
            progress.file_done();
        }

        progress.finish(format!(
            "Ingested {} rows from {} files",
            rows_processed,
            files.len()
        ));

        Ok(Self::report(run, files.len(), rows_processed))
    }

    /// Load one file and upsert its observations in a single transaction.
    pub async fn ingest_file(
        &self,
        conn: &mut SqliteConnection,
        reader: &ObservationReader,
        path: &Path,
    ) -> Result<u64> {
        let observations = match reader.read_observations(path) {
            Ok(observations) => observations,
            Err(e) => {
                error!("Failed to read {}: {}", path.display(), e);
                return Err(e);
            }
        };

        if observations.is_empty() {
            debug!("No observations in {}", path.display());
            return Ok(0);
        }

        let mut tx = conn.begin().await?;
        let rows = match upsert_observations(&mut tx, &observations, self.config.batch_size).await {
            Ok(rows) => rows,
            Err(e) => {
                error!("Upsert failed for {}: {}", path.display(), e);
                return Err(e);
            }
        };
        tx.commit().await?;

        debug!("{}: {} rows", path.display(), rows);
        Ok(rows)
    }

    fn report(run: RunStart, files_processed: usize, rows_processed: u64) -> IngestionReport {
        IngestionReport {
            timing: run.finish(),
            files_processed,
            rows_processed,
        }
    }
}
