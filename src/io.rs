//! Reading series from tabular input.

use crate::core::{MissingValuePolicy, TimeSeries};
use crate::error::{ForecastError, Result};
use chrono::{DateTime, NaiveDate, Utc};
use std::io::Read;

/// Read a `(date, value)` series from comma-separated input.
///
/// Expects a header row, dates in the first column as `%Y-%m-%d`, and
/// values in the second. Blank or `nan` value cells are parsed as NaN and
/// then handled according to `policy`; rows are never silently dropped
/// unless the policy says so.
pub fn read_series<R: Read>(reader: R, policy: MissingValuePolicy) -> Result<TimeSeries> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut timestamps = Vec::new();
    let mut values = Vec::new();

    for record in csv_reader.records() {
        let record = record.map_err(|e| ForecastError::Csv(e.to_string()))?;
        if record.len() < 2 {
            return Err(ForecastError::Csv(format!(
                "expected 2 columns (date, value), got {}",
                record.len()
            )));
        }
        timestamps.push(parse_date(&record[0])?);
        values.push(parse_value(&record[1])?);
    }

    if timestamps.is_empty() {
        return Err(ForecastError::EmptyData);
    }

    TimeSeries::new(timestamps, values)?.sanitized(policy)
}

fn parse_date(field: &str) -> Result<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(field, "%Y-%m-%d")
        .map_err(|e| ForecastError::TimestampError(format!("bad date {:?}: {}", field, e)))?;
    let naive = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| ForecastError::TimestampError(format!("bad date {:?}", field)))?;
    Ok(DateTime::from_naive_utc_and_offset(naive, Utc))
}

fn parse_value(field: &str) -> Result<f64> {
    if field.is_empty() || field.eq_ignore_ascii_case("nan") {
        return Ok(f64::NAN);
    }
    field
        .parse::<f64>()
        .map_err(|e| ForecastError::Csv(format!("bad value {:?}: {}", field, e)))
}
