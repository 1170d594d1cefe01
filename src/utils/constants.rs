/// Raw value marking a missing measurement
pub const MISSING_VALUE_SENTINEL: i32 = -9999;

/// Source measurements are recorded in tenths of a unit
pub const MEASUREMENT_SCALE: f64 = 10.0;

/// Extension of observation files, without the dot
pub const OBSERVATION_FILE_EXTENSION: &str = "txt";

/// Processing defaults
pub const DEFAULT_BATCH_SIZE: usize = 1000;
pub const MAX_BATCH_SIZE: usize = 5_000; // keeps a batch under SQLite's bind-parameter limit
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 16; // 128KB
pub const DEFAULT_DATABASE_URL: &str = "sqlite://weather.sqlite";
pub const DEFAULT_DATA_DIR: &str = "data/wx_data";
pub const DEFAULT_CONFIG_FILE: &str = "weather-ingest.toml";
pub const ENV_PREFIX: &str = "WEATHER";

/// Pagination
pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PER_PAGE: i64 = 50;
pub const MAX_PER_PAGE: i64 = 500;

/// Aggregates are stored with two decimal places
pub const AGGREGATE_DECIMAL_PLACES: i32 = 2;
