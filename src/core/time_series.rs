//! TimeSeries data structure for representing temporal data.

use crate::error::{ForecastError, Result};
use chrono::{DateTime, Datelike, Duration, Months, Utc};

/// Policy for handling missing values (NaN/Inf).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MissingValuePolicy {
    /// Drop observations with missing values.
    Drop,
    /// Fill with a specific value.
    Fill(f64),
    /// Forward fill (use previous valid value).
    ForwardFill,
    /// Return error if missing values found.
    Error,
}

/// Sampling frequency of a series.
///
/// Monthly and coarser frequencies use calendar arithmetic so a step from
/// Jan 31 lands on the right month regardless of month length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl Frequency {
    /// Advance a timestamp by `steps` whole periods.
    pub fn advance(&self, timestamp: DateTime<Utc>, steps: u32) -> DateTime<Utc> {
        match self {
            Frequency::Hourly => timestamp + Duration::hours(steps as i64),
            Frequency::Daily => timestamp + Duration::days(steps as i64),
            Frequency::Weekly => timestamp + Duration::weeks(steps as i64),
            Frequency::Monthly => timestamp + Months::new(steps),
            Frequency::Quarterly => timestamp + Months::new(3 * steps),
            Frequency::Yearly => timestamp + Months::new(12 * steps),
        }
    }

    /// Count the periods covered by the inclusive span `[start, end]`.
    ///
    /// A monthly span from January to June is 6 periods. Returns 0 when
    /// `end` precedes `start`.
    pub fn periods_between(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> usize {
        if end < start {
            return 0;
        }
        match self {
            Frequency::Hourly | Frequency::Daily | Frequency::Weekly => {
                let seconds = match self {
                    Frequency::Hourly => 3_600,
                    Frequency::Daily => 86_400,
                    _ => 7 * 86_400,
                };
                ((end - start).num_seconds() / seconds) as usize + 1
            }
            Frequency::Monthly => Self::month_span(start, end) + 1,
            Frequency::Quarterly => Self::month_span(start, end) / 3 + 1,
            Frequency::Yearly => (end.year() - start.year()) as usize + 1,
        }
    }

    fn month_span(start: DateTime<Utc>, end: DateTime<Utc>) -> usize {
        let months =
            (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32;
        months.max(0) as usize
    }
}

/// A univariate time series with strictly increasing timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    timestamps: Vec<DateTime<Utc>>,
    values: Vec<f64>,
    frequency: Option<Frequency>,
}

impl TimeSeries {
    /// Create a new series, validating that timestamps are strictly
    /// increasing and match the values in length.
    pub fn new(timestamps: Vec<DateTime<Utc>>, values: Vec<f64>) -> Result<Self> {
        if timestamps.len() != values.len() {
            return Err(ForecastError::DimensionMismatch {
                expected: timestamps.len(),
                got: values.len(),
            });
        }
        for i in 1..timestamps.len() {
            if timestamps[i] <= timestamps[i - 1] {
                return Err(ForecastError::TimestampError(
                    "timestamps must be strictly increasing".to_string(),
                ));
            }
        }
        Ok(Self {
            timestamps,
            values,
            frequency: None,
        })
    }

    /// Attach a sampling frequency.
    pub fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = Some(frequency);
        self
    }

    /// Create an empty series.
    pub fn empty() -> Self {
        Self {
            timestamps: Vec::new(),
            values: Vec::new(),
            frequency: None,
        }
    }

    /// Get the number of observations.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Check if the series is empty.
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Get timestamps.
    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    /// Get values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Get the first observed timestamp.
    pub fn first_timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamps.first().copied()
    }

    /// Get the latest observed timestamp.
    pub fn last_timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamps.last().copied()
    }

    /// Get frequency.
    pub fn frequency(&self) -> Option<Frequency> {
        self.frequency
    }

    /// Set frequency.
    pub fn set_frequency(&mut self, frequency: Frequency) {
        self.frequency = Some(frequency);
    }

    /// Extract a positional slice `[start, end)` of the series.
    pub fn slice(&self, start: usize, end: usize) -> Result<TimeSeries> {
        if start > end {
            return Err(ForecastError::InvalidParameter(
                "start must be <= end".to_string(),
            ));
        }
        if end > self.len() {
            return Err(ForecastError::InvalidParameter(format!(
                "slice end {} exceeds series length {}",
                end,
                self.len()
            )));
        }
        Ok(TimeSeries {
            timestamps: self.timestamps[start..end].to_vec(),
            values: self.values[start..end].to_vec(),
            frequency: self.frequency,
        })
    }

    /// Append another series after this one, revalidating ordering.
    ///
    /// The appended series must start strictly after the last timestamp of
    /// this one. The combined series keeps this series' frequency.
    pub fn concat(&self, other: &TimeSeries) -> Result<TimeSeries> {
        if let (Some(last), Some(first)) = (self.last_timestamp(), other.first_timestamp()) {
            if first <= last {
                return Err(ForecastError::TimestampError(
                    "appended series must start after the existing series".to_string(),
                ));
            }
        }
        let mut timestamps = self.timestamps.clone();
        timestamps.extend_from_slice(&other.timestamps);
        let mut values = self.values.clone();
        values.extend_from_slice(&other.values);
        Ok(TimeSeries {
            timestamps,
            values,
            frequency: self.frequency,
        })
    }

    /// Check if the series has missing values (NaN or Inf).
    pub fn has_missing_values(&self) -> bool {
        self.values.iter().any(|v| v.is_nan() || v.is_infinite())
    }

    /// Return a sanitized copy with missing values handled.
    pub fn sanitized(&self, policy: MissingValuePolicy) -> Result<TimeSeries> {
        match policy {
            MissingValuePolicy::Error => {
                if self.has_missing_values() {
                    return Err(ForecastError::MissingValues);
                }
                Ok(self.clone())
            }
            MissingValuePolicy::Drop => {
                let valid: Vec<usize> = (0..self.len())
                    .filter(|&i| !self.values[i].is_nan() && !self.values[i].is_infinite())
                    .collect();
                Ok(TimeSeries {
                    timestamps: valid.iter().map(|&i| self.timestamps[i]).collect(),
                    values: valid.iter().map(|&i| self.values[i]).collect(),
                    frequency: self.frequency,
                })
            }
            MissingValuePolicy::Fill(fill_value) => {
                let values = self
                    .values
                    .iter()
                    .map(|&v| {
                        if v.is_nan() || v.is_infinite() {
                            fill_value
                        } else {
                            v
                        }
                    })
                    .collect();
                Ok(TimeSeries {
                    timestamps: self.timestamps.clone(),
                    values,
                    frequency: self.frequency,
                })
            }
            MissingValuePolicy::ForwardFill => {
                let mut values = Vec::with_capacity(self.len());
                let mut last_valid = None;
                for &v in &self.values {
                    if v.is_nan() || v.is_infinite() {
                        values.push(last_valid.unwrap_or(v));
                    } else {
                        last_valid = Some(v);
                        values.push(v);
                    }
                }
                Ok(TimeSeries {
                    timestamps: self.timestamps.clone(),
                    values,
                    frequency: self.frequency,
                })
            }
        }
    }
}
