use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// One parsed line of an observation file, before the station is attached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyReading {
    pub date: NaiveDate,
    pub max_temp: Option<f64>,
    pub min_temp: Option<f64>,
    pub precipitation: Option<f64>,
}

impl DailyReading {
    pub fn with_station(self, station_id: &str) -> Observation {
        Observation {
            station_id: station_id.to_string(),
            date: self.date,
            max_temp: self.max_temp,
            min_temp: self.min_temp,
            precipitation: self.precipitation,
        }
    }
}

/// A station's measurements for one calendar date, keyed on `(station_id, date)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, sqlx::FromRow)]
pub struct Observation {
    #[validate(length(min = 1))]
    pub station_id: String,

    pub date: NaiveDate,

    /// Degrees Celsius
    pub max_temp: Option<f64>,

    /// Degrees Celsius
    pub min_temp: Option<f64>,

    /// Millimetres
    pub precipitation: Option<f64>,
}

impl Observation {
    pub fn new(
        station_id: impl Into<String>,
        date: NaiveDate,
        max_temp: Option<f64>,
        min_temp: Option<f64>,
        precipitation: Option<f64>,
    ) -> Self {
        Self {
            station_id: station_id.into(),
            date,
            max_temp,
            min_temp,
            precipitation,
        }
    }

    /// True when every measurement is present; only such rows feed yearly statistics.
    pub fn is_complete(&self) -> bool {
        self.max_temp.is_some() && self.min_temp.is_some() && self.precipitation.is_some()
    }
}

/// An observation as stored, including its surrogate row id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct StoredObservation {
    pub id: i64,
    pub station_id: String,
    pub date: NaiveDate,
    pub max_temp: Option<f64>,
    pub min_temp: Option<f64>,
    pub precipitation: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_completeness_requires_all_measurements() {
        let full = Observation::new("S1", date(2020, 1, 1), Some(10.0), Some(5.0), Some(0.0));
        assert!(full.is_complete());

        let no_max = Observation::new("S1", date(2020, 1, 2), None, Some(5.0), Some(1.0));
        assert!(!no_max.is_complete());

        let no_precip = Observation::new("S1", date(2020, 1, 3), Some(1.0), Some(0.5), None);
        assert!(!no_precip.is_complete());
    }

    #[test]
    fn test_station_id_validation() {
        let valid = Observation::new("USC00110072", date(1985, 1, 1), None, None, None);
        assert!(valid.validate().is_ok());

        let empty = Observation::new("", date(1985, 1, 1), None, None, None);
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_reading_with_station() {
        let reading = DailyReading {
            date: date(1985, 1, 1),
            max_temp: Some(-2.2),
            min_temp: None,
            precipitation: Some(9.4),
        };

        let observation = reading.with_station("USC00110072");
        assert_eq!(observation.station_id, "USC00110072");
        assert_eq!(observation.date, reading.date);
        assert_eq!(observation.max_temp, Some(-2.2));
        assert_eq!(observation.min_temp, None);
        assert_eq!(observation.precipitation, Some(9.4));
    }
}
