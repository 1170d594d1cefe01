pub mod aggregate_calculator;
pub mod ingestion;
pub mod statistics;
pub mod timing;

pub use aggregate_calculator::AggregateCalculator;
pub use ingestion::{IngestionProcessor, IngestionReport};
pub use statistics::{StatisticsProcessor, StatisticsReport};
pub use timing::RunTiming;
