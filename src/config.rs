//! Run configuration.
//!
//! Sources are layered lowest to highest: built-in defaults, an optional
//! TOML file, then `WEATHER_*` environment variables. The CLI applies its
//! flags on top and the result is validated before any run starts.

use crate::error::Result;
use crate::utils::constants::{
    DEFAULT_BATCH_SIZE, DEFAULT_CONFIG_FILE, DEFAULT_DATABASE_URL, DEFAULT_DATA_DIR, ENV_PREFIX,
    MAX_BATCH_SIZE, OBSERVATION_FILE_EXTENSION,
};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;
use validator::Validate;

/// Everything a run needs, passed explicitly into each orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RunConfig {
    /// sqlx SQLite URL, e.g. `sqlite://weather.sqlite`
    #[validate(length(min = 1))]
    pub database_url: String,

    /// Directory scanned for observation files
    pub data_dir: PathBuf,

    /// Rows per upsert statement
    #[validate(range(min = 1, max = MAX_BATCH_SIZE))]
    pub batch_size: usize,

    /// Observation file extension, without the dot
    #[validate(length(min = 1))]
    pub file_extension: String,

    /// Log and skip malformed lines instead of aborting the run
    #[serde(default)]
    pub skip_malformed: bool,

    /// Append log output to this file as well as stderr
    #[serde(default)]
    pub log_file: Option<PathBuf>,

    /// Suppress progress bars
    #[serde(default)]
    pub silent: bool,
}

impl RunConfig {
    pub fn new(database_url: impl Into<String>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            database_url: database_url.into(),
            data_dir: data_dir.into(),
            batch_size: DEFAULT_BATCH_SIZE,
            file_extension: OBSERVATION_FILE_EXTENSION.to_string(),
            skip_malformed: false,
            log_file: None,
            silent: false,
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_skip_malformed(mut self, skip_malformed: bool) -> Self {
        self.skip_malformed = skip_malformed;
        self
    }

    pub fn with_silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    /// Load layered configuration.
    ///
    /// An explicit `config_file` must exist; otherwise `weather-ingest.toml`
    /// in the working directory is read when present.
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let builder = Config::builder()
            .set_default("database_url", DEFAULT_DATABASE_URL)?
            .set_default("data_dir", DEFAULT_DATA_DIR)?
            .set_default("batch_size", DEFAULT_BATCH_SIZE as i64)?
            .set_default("file_extension", OBSERVATION_FILE_EXTENSION)?
            .set_default("skip_malformed", false)?
            .set_default("silent", false)?;

        let builder = match config_file {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false)),
        };

        let run_config: RunConfig = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        run_config.validate()?;
        debug!("Loaded configuration: {:?}", run_config);

        Ok(run_config)
    }
}
