pub mod aggregate;
pub mod observation;

pub use aggregate::{StoredAggregate, YearlyAggregate};
pub use observation::{DailyReading, Observation, StoredObservation};
