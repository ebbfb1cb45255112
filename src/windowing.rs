//! Date-bounded and proportional train/test splitting.
//!
//! A window is a named, date-bounded subset of a series. The split
//! functions here read the series but never modify it; each call derives
//! fresh train/test series from the same input.

use crate::core::{Frequency, TimeSeries};
use crate::error::{ForecastError, Result};
use chrono::{DateTime, Utc};

/// An inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl DateRange {
    /// Create a range, validating `start <= end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if start > end {
            return Err(ForecastError::InvalidRange(format!(
                "range start {} is after end {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Check whether a timestamp falls within the range (inclusive).
    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        self.start <= timestamp && timestamp <= self.end
    }

    /// Check whether two ranges share any instant.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

/// Named date ranges for the train, test and prediction windows.
///
/// Train and test must not overlap; the prediction window is optional and
/// only required by backends that forecast a fixed future range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSpec {
    train: DateRange,
    test: DateRange,
    pred: Option<DateRange>,
}

impl WindowSpec {
    /// Create a window spec, rejecting overlapping train/test ranges.
    pub fn new(train: DateRange, test: DateRange) -> Result<Self> {
        if train.overlaps(&test) {
            return Err(ForecastError::InvalidRange(
                "train window overlaps test window".to_string(),
            ));
        }
        Ok(Self {
            train,
            test,
            pred: None,
        })
    }

    /// Attach a prediction window.
    pub fn with_prediction(mut self, pred: DateRange) -> Self {
        self.pred = Some(pred);
        self
    }

    pub fn train(&self) -> &DateRange {
        &self.train
    }

    pub fn test(&self) -> &DateRange {
        &self.test
    }

    pub fn pred(&self) -> Option<&DateRange> {
        self.pred.as_ref()
    }
}

/// Slice a series into train and test windows by inclusive date bounds.
///
/// A range lying entirely outside the series' observed span is a
/// malformed request and fails with [`ForecastError::InvalidRange`]. A
/// range inside the span that happens to match no observations degrades
/// to an empty series.
pub fn split_by_dates(
    series: &TimeSeries,
    train: &DateRange,
    test: &DateRange,
) -> Result<(TimeSeries, TimeSeries)> {
    let train_series = slice_by_range(series, train, "train")?;
    let test_series = slice_by_range(series, test, "test")?;
    Ok((train_series, test_series))
}

fn slice_by_range(series: &TimeSeries, range: &DateRange, name: &str) -> Result<TimeSeries> {
    let (first, last) = match (series.first_timestamp(), series.last_timestamp()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(ForecastError::EmptyData),
    };

    if range.end() < first || range.start() > last {
        return Err(ForecastError::InvalidRange(format!(
            "{} window [{}, {}] lies outside the observed span [{}, {}]",
            name,
            range.start(),
            range.end(),
            first,
            last
        )));
    }

    let timestamps = series.timestamps();
    let start = timestamps.partition_point(|&t| t < range.start());
    let end = timestamps.partition_point(|&t| t <= range.end());
    series.slice(start, end)
}

/// Split a series positionally: the first `ratio` fraction of rows as
/// train, remainder as test. Requires `0 < ratio < 1`.
pub fn split_by_ratio(series: &TimeSeries, ratio: f64) -> Result<(TimeSeries, TimeSeries)> {
    if !(ratio > 0.0 && ratio < 1.0) {
        return Err(ForecastError::InvalidParameter(format!(
            "split ratio must be in (0, 1), got {}",
            ratio
        )));
    }
    let split = (series.len() as f64 * ratio).floor() as usize;
    let train = series.slice(0, split)?;
    let test = series.slice(split, series.len())?;
    Ok((train, test))
}

/// Number of forecast periods covered by a prediction window at the
/// given sampling frequency.
pub fn prediction_horizon(range: &DateRange, frequency: Frequency) -> usize {
    frequency.periods_between(range.start(), range.end())
}
