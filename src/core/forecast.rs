//! Forecast result structures for holding predictions.

use crate::error::{ForecastError, Result};
use chrono::{DateTime, Utc};

/// Raw backend output: point predictions and optional interval bounds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Forecast {
    point: Vec<f64>,
    lower: Option<Vec<f64>>,
    upper: Option<Vec<f64>>,
}

impl Forecast {
    /// Create an empty forecast.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a forecast from point predictions.
    pub fn from_values(point: Vec<f64>) -> Self {
        Self {
            point,
            lower: None,
            upper: None,
        }
    }

    /// Create a forecast with prediction intervals.
    pub fn from_values_with_intervals(point: Vec<f64>, lower: Vec<f64>, upper: Vec<f64>) -> Self {
        Self {
            point,
            lower: Some(lower),
            upper: Some(upper),
        }
    }

    /// Get the forecast horizon (number of steps).
    pub fn horizon(&self) -> usize {
        self.point.len()
    }

    /// Check if the forecast is empty.
    pub fn is_empty(&self) -> bool {
        self.point.is_empty()
    }

    /// Check if both interval bounds are available.
    pub fn has_intervals(&self) -> bool {
        self.lower.is_some() && self.upper.is_some()
    }

    /// Get point predictions.
    pub fn point(&self) -> &[f64] {
        &self.point
    }

    /// Get lower interval bounds.
    pub fn lower(&self) -> Option<&[f64]> {
        self.lower.as_deref()
    }

    /// Get upper interval bounds.
    pub fn upper(&self) -> Option<&[f64]> {
        self.upper.as_deref()
    }
}

/// One row of a normalized forecast table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastRow {
    pub timestamp: DateTime<Utc>,
    pub point_estimate: f64,
    pub lower_bound: Option<f64>,
    pub upper_bound: Option<f64>,
}

/// Normalized forecast output: one timestamped row per forecast step,
/// with a point estimate and optional confidence bounds.
///
/// An empty table is the null forecast produced when no backend is
/// registered for the requested kind; callers must check [`is_empty`]
/// before evaluating.
///
/// [`is_empty`]: ForecastTable::is_empty
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForecastTable {
    timestamps: Vec<DateTime<Utc>>,
    point: Vec<f64>,
    lower: Option<Vec<f64>>,
    upper: Option<Vec<f64>>,
}

impl ForecastTable {
    /// Create an empty table.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Attach timestamps to a backend forecast.
    pub fn from_forecast(timestamps: Vec<DateTime<Utc>>, forecast: Forecast) -> Result<Self> {
        if timestamps.len() != forecast.horizon() {
            return Err(ForecastError::DimensionMismatch {
                expected: timestamps.len(),
                got: forecast.horizon(),
            });
        }
        if let Some(lower) = forecast.lower() {
            if lower.len() != forecast.horizon() {
                return Err(ForecastError::DimensionMismatch {
                    expected: forecast.horizon(),
                    got: lower.len(),
                });
            }
        }
        if let Some(upper) = forecast.upper() {
            if upper.len() != forecast.horizon() {
                return Err(ForecastError::DimensionMismatch {
                    expected: forecast.horizon(),
                    got: upper.len(),
                });
            }
        }
        Ok(Self {
            timestamps,
            point: forecast.point,
            lower: forecast.lower,
            upper: forecast.upper,
        })
    }

    /// Get the number of rows.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Get timestamps.
    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    /// Get point estimates.
    pub fn point_estimates(&self) -> &[f64] {
        &self.point
    }

    /// Get lower confidence bounds.
    pub fn lower_bounds(&self) -> Option<&[f64]> {
        self.lower.as_deref()
    }

    /// Get upper confidence bounds.
    pub fn upper_bounds(&self) -> Option<&[f64]> {
        self.upper.as_deref()
    }

    /// Check if both confidence bounds are present.
    pub fn has_bounds(&self) -> bool {
        self.lower.is_some() && self.upper.is_some()
    }

    /// Get a single row.
    pub fn row(&self, index: usize) -> Option<ForecastRow> {
        if index >= self.len() {
            return None;
        }
        Some(ForecastRow {
            timestamp: self.timestamps[index],
            point_estimate: self.point[index],
            lower_bound: self.lower.as_ref().map(|l| l[index]),
            upper_bound: self.upper.as_ref().map(|u| u[index]),
        })
    }

    /// Iterate over rows.
    pub fn rows(&self) -> impl Iterator<Item = ForecastRow> + '_ {
        (0..self.len()).map(move |i| self.row(i).unwrap())
    }

    /// Check the per-row invariant `lower <= point <= upper`.
    ///
    /// Always true for a table without bounds. A well-behaved backend
    /// never violates this; a violation signals a broken backend.
    pub fn bounds_are_ordered(&self) -> bool {
        match (&self.lower, &self.upper) {
            (Some(lower), Some(upper)) => (0..self.len())
                .all(|i| lower[i] <= self.point[i] && self.point[i] <= upper[i]),
            _ => true,
        }
    }
}
