//! Forecast pipeline: windowing, backend dispatch and evaluation.
//!
//! A [`Forecaster`] owns exactly one series and the windows for one run.
//! It is synchronous and single-threaded; fitting a backend (especially a
//! stepwise order search) may be long-running, but no offload happens
//! here. Forecast tables and metric sets are return values; nothing is
//! accumulated on the instance beyond the derived train/test split.

use crate::backend::{BackendConfig, BackendKind, BoxedBackend};
use crate::core::{ForecastTable, TimeSeries};
use crate::error::{ForecastError, Result};
use crate::metrics::{self, MetricSet};
use crate::windowing::{self, WindowSpec};
use std::collections::HashMap;
use tracing::{info, warn};

/// Drives one forecast run against a registered backend.
pub struct Forecaster {
    series: TimeSeries,
    windows: WindowSpec,
    config: BackendConfig,
    backends: HashMap<BackendKind, BoxedBackend>,
    split: Option<(TimeSeries, TimeSeries)>,
}

impl Forecaster {
    /// Create a forecaster for one series and one validated configuration.
    pub fn new(series: TimeSeries, windows: WindowSpec, config: BackendConfig) -> Result<Self> {
        if series.is_empty() {
            return Err(ForecastError::EmptyData);
        }
        config.validate()?;
        Ok(Self {
            series,
            windows,
            config,
            backends: HashMap::new(),
            split: None,
        })
    }

    /// Register a backend for a kind. Replaces any previous registration.
    pub fn register_backend(&mut self, kind: BackendKind, backend: BoxedBackend) {
        self.backends.insert(kind, backend);
    }

    /// The series under forecast.
    pub fn series(&self) -> &TimeSeries {
        &self.series
    }

    /// The derived training window, if the split has run.
    pub fn train(&self) -> Option<&TimeSeries> {
        self.split.as_ref().map(|(train, _)| train)
    }

    /// The derived test window, if the split has run.
    pub fn test(&self) -> Option<&TimeSeries> {
        self.split.as_ref().map(|(_, test)| test)
    }

    /// Derive the train/test windows from the date ranges. Runs once;
    /// later calls return the cached split.
    pub fn split(&mut self) -> Result<(&TimeSeries, &TimeSeries)> {
        if self.split.is_none() {
            let pair =
                windowing::split_by_dates(&self.series, self.windows.train(), self.windows.test())?;
            self.split = Some(pair);
        }
        let (train, test) = self.split.as_ref().unwrap();
        Ok((train, test))
    }

    /// Split positionally instead, when explicit dates are unavailable.
    /// Replaces any previously derived split.
    pub fn split_by_ratio(&mut self, ratio: f64) -> Result<(&TimeSeries, &TimeSeries)> {
        let pair = windowing::split_by_ratio(&self.series, ratio)?;
        self.split = Some(pair);
        let (train, test) = self.split.as_ref().unwrap();
        Ok((train, test))
    }

    /// Fit the configured backend and produce a normalized forecast table.
    ///
    /// When no backend is registered for the configured kind, a warning is
    /// logged and an empty table is returned instead of failing; callers
    /// must check [`ForecastTable::is_empty`] before evaluating. Backend
    /// fit failures (e.g. non-convergence) propagate as-is.
    pub fn make_forecast(&mut self) -> Result<ForecastTable> {
        let kind = self.config.kind();
        let frequency = self.series.frequency().ok_or_else(|| {
            ForecastError::InvalidParameter(
                "series frequency is required to generate forecast timestamps".to_string(),
            )
        })?;

        if kind == BackendKind::AutoOrderSearch {
            self.split()?;
        }

        let level = self.config.interval_width();
        let backend = match self.backends.get_mut(&kind) {
            Some(backend) => backend,
            None => {
                warn!(backend = %kind, "no backend registered; returning empty forecast");
                return Ok(ForecastTable::empty());
            }
        };
        info!(backend = %kind, name = backend.name(), "making forecast");

        match kind {
            BackendKind::SeasonalTrend => {
                // The backend does its own internal train/future handling;
                // it gets the full history and a future frame as long as
                // the input series.
                backend.fit(&self.series)?;
                let horizon = self.series.len();
                let forecast = backend.predict_with_intervals(horizon, level)?;

                let last = self.series.last_timestamp().ok_or(ForecastError::EmptyData)?;
                let timestamps = (1..=horizon)
                    .map(|i| frequency.advance(last, i as u32))
                    .collect();
                ForecastTable::from_forecast(timestamps, forecast)
            }
            BackendKind::AutoOrderSearch => {
                let pred = *self.windows.pred().ok_or_else(|| {
                    ForecastError::InvalidParameter(
                        "auto_order_search requires a prediction window".to_string(),
                    )
                })?;
                let (train, test) = self.split.as_ref().unwrap();

                // Two-phase fit: order search on the training window
                // alone, then a refit on train + test before forecasting.
                // The refit sees the test window; see DESIGN.md.
                backend.fit(train)?;
                let combined = train.concat(test)?;
                backend.fit(&combined)?;

                let horizon = windowing::prediction_horizon(&pred, frequency);
                let forecast = backend.predict_with_intervals(horizon, level)?;

                let timestamps = (0..horizon)
                    .map(|i| frequency.advance(pred.start(), i as u32))
                    .collect();
                ForecastTable::from_forecast(timestamps, forecast)
            }
        }
    }

    /// Compute the accuracy battery for a forecast against the test
    /// window, deriving the split first if needed.
    pub fn evaluate(&mut self, table: &ForecastTable) -> Result<MetricSet> {
        self.split()?;
        let (_, test) = self.split.as_ref().unwrap();
        metrics::evaluate(test, table)
    }
}
