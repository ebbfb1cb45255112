//! Backend capability interface.
//!
//! A backend is an external forecasting library reachable only through
//! the narrow fit/predict contract below. The fitting algorithms
//! themselves (seasonal decomposition, stepwise order search, MCMC) live
//! behind this trait and are opaque to the harness.

pub mod config;

pub use config::{AutoOrderConfig, BackendConfig, SeasonalTrendConfig, SeasonalityMode};

use crate::core::{Forecast, TimeSeries};
use crate::error::Result;
use std::fmt;

/// Common interface for forecasting backends.
///
/// This trait is object-safe and can be used with `Box<dyn Backend>`.
/// `fit` may be called more than once; a later call refits the backend
/// on the new series (the auto-order dispatch relies on this).
pub trait Backend {
    /// Fit the backend to the time series data.
    fn fit(&mut self, series: &TimeSeries) -> Result<()>;

    /// Generate point predictions for the specified horizon.
    fn predict(&self, horizon: usize) -> Result<Forecast>;

    /// Generate predictions with confidence intervals at `level`
    /// (e.g. 0.95 for 95% intervals).
    fn predict_with_intervals(&self, horizon: usize, level: f64) -> Result<Forecast> {
        // Default implementation just returns point predictions
        let _ = level;
        self.predict(horizon)
    }

    /// Get the backend name.
    fn name(&self) -> &str;

    /// Check if the backend has been fitted.
    fn is_fitted(&self) -> bool;
}

/// Type alias for boxed backend trait objects.
pub type BoxedBackend = Box<dyn Backend>;

/// The two backend families the harness dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// Bayesian structural model with internal seasonality/trend handling.
    SeasonalTrend,
    /// Stepwise automatic order search (auto-ARIMA style).
    AutoOrderSearch,
}

impl BackendKind {
    /// Parse a backend identifier. Unrecognized identifiers yield `None`;
    /// the pipeline treats that as a non-fatal condition.
    pub fn parse(identifier: &str) -> Option<Self> {
        match identifier {
            "seasonal_trend" => Some(Self::SeasonalTrend),
            "auto_order_search" => Some(Self::AutoOrderSearch),
            _ => None,
        }
    }

    /// The canonical identifier string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SeasonalTrend => "seasonal_trend",
            Self::AutoOrderSearch => "auto_order_search",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TimeSeries;
    use crate::error::ForecastError;
    use chrono::{Duration, TimeZone, Utc};

    /// Minimal backend used to exercise the trait surface.
    struct LastValue {
        last: Option<f64>,
    }

    impl Backend for LastValue {
        fn fit(&mut self, series: &TimeSeries) -> Result<()> {
            self.last = series.values().last().copied();
            self.last.map(|_| ()).ok_or(ForecastError::EmptyData)
        }

        fn predict(&self, horizon: usize) -> Result<Forecast> {
            let last = self.last.ok_or(ForecastError::FitRequired)?;
            Ok(Forecast::from_values(vec![last; horizon]))
        }

        fn name(&self) -> &str {
            "LastValue"
        }

        fn is_fitted(&self) -> bool {
            self.last.is_some()
        }
    }

    fn make_series(n: usize) -> TimeSeries {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let timestamps: Vec<_> = (0..n).map(|i| base + Duration::days(i as i64)).collect();
        let values: Vec<f64> = (1..=n).map(|i| i as f64).collect();
        TimeSeries::new(timestamps, values).unwrap()
    }

    #[test]
    fn boxed_backend_fit_predict() {
        let mut backend: BoxedBackend = Box::new(LastValue { last: None });
        assert!(!backend.is_fitted());

        backend.fit(&make_series(10)).unwrap();
        assert!(backend.is_fitted());

        let forecast = backend.predict(4).unwrap();
        assert_eq!(forecast.point(), &[10.0, 10.0, 10.0, 10.0]);
    }

    #[test]
    fn default_interval_prediction_falls_back_to_point() {
        let mut backend = LastValue { last: None };
        backend.fit(&make_series(5)).unwrap();

        let forecast = backend.predict_with_intervals(3, 0.95).unwrap();
        assert_eq!(forecast.horizon(), 3);
        assert!(!forecast.has_intervals());
    }

    #[test]
    fn backend_kind_parses_known_identifiers() {
        assert_eq!(
            BackendKind::parse("seasonal_trend"),
            Some(BackendKind::SeasonalTrend)
        );
        assert_eq!(
            BackendKind::parse("auto_order_search"),
            Some(BackendKind::AutoOrderSearch)
        );
        assert_eq!(BackendKind::parse("gradient_boosting"), None);
        assert_eq!(BackendKind::parse(""), None);
    }

    #[test]
    fn backend_kind_display_round_trips() {
        for kind in [BackendKind::SeasonalTrend, BackendKind::AutoOrderSearch] {
            assert_eq!(BackendKind::parse(&kind.to_string()), Some(kind));
        }
    }
}
