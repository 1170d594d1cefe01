use crate::error::{IngestError, Result};
use crate::models::DailyReading;
use crate::utils::constants::{MEASUREMENT_SCALE, MISSING_VALUE_SENTINEL};
use chrono::NaiveDate;

/// Parse one observation line: `YYYYMMDD maxTemp minTemp precipitation`.
///
/// Measurements are integers in tenths of a unit; `-9999` marks a missing
/// value and becomes `None`. Any other shape is a `MalformedRecord` error.
pub fn parse_observation_line(line: &str) -> Result<DailyReading> {
    let fields: Vec<&str> = line.split_whitespace().collect();

    if fields.len() != 4 {
        return Err(IngestError::MalformedRecord(format!(
            "expected 4 whitespace-separated fields, found {}",
            fields.len()
        )));
    }

    Ok(DailyReading {
        date: parse_date(fields[0])?,
        max_temp: parse_measurement(fields[1])?,
        min_temp: parse_measurement(fields[2])?,
        precipitation: parse_measurement(fields[3])?,
    })
}

/// Parse a compact `YYYYMMDD` date.
pub fn parse_date(token: &str) -> Result<NaiveDate> {
    if token.len() != 8 || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(IngestError::MalformedRecord(format!(
            "Invalid date format: '{}'",
            token
        )));
    }

    NaiveDate::parse_from_str(token, "%Y%m%d").map_err(|_| {
        IngestError::MalformedRecord(format!("Invalid calendar date: '{}'", token))
    })
}

/// Convert a raw tenths value, mapping the missing-value sentinel to `None`.
pub fn parse_measurement(token: &str) -> Result<Option<f64>> {
    let raw = token.parse::<i32>().map_err(|_| {
        IngestError::MalformedRecord(format!("Invalid measurement: '{}'", token))
    })?;

    if raw == MISSING_VALUE_SENTINEL {
        Ok(None)
    } else {
        Ok(Some(raw as f64 / MEASUREMENT_SCALE))
    }
}
