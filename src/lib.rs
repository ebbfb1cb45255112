//! # forecast-harness
//!
//! A thin harness around external time series forecasting backends: it
//! windows a raw series into train/test/prediction ranges, dispatches to
//! a backend through a narrow fit/predict contract, normalizes the output
//! into a timestamped forecast table with confidence bounds, and computes
//! a battery of accuracy metrics against the held-out test window.
//!
//! The forecasting algorithms themselves live behind the
//! [`backend::Backend`] trait and are out of scope; the harness supplies
//! the windowing and evaluation protocol around them.
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use forecast_harness::prelude::*;
//! use forecast_harness::windowing::split_by_ratio;
//!
//! let base = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
//! let timestamps: Vec<_> = (0..12)
//!     .map(|i| Frequency::Monthly.advance(base, i))
//!     .collect();
//! let values: Vec<f64> = (1..=12).map(|i| i as f64).collect();
//! let series = TimeSeries::new(timestamps, values).unwrap();
//!
//! let (train, test) = split_by_ratio(&series, 0.75).unwrap();
//! assert_eq!(train.len(), 9);
//! assert_eq!(test.len(), 3);
//! ```

pub mod backend;
pub mod core;
pub mod error;
pub mod io;
pub mod metrics;
pub mod pipeline;
#[cfg(feature = "plot")]
pub mod plot;
pub mod windowing;

pub use error::{ForecastError, Result};

pub mod prelude {
    pub use crate::backend::{Backend, BackendConfig, BackendKind, BoxedBackend};
    pub use crate::core::{Forecast, ForecastTable, Frequency, TimeSeries};
    pub use crate::error::{ForecastError, Result};
    pub use crate::metrics::{evaluate, MetricSet};
    pub use crate::pipeline::Forecaster;
    pub use crate::windowing::{DateRange, WindowSpec};
}
