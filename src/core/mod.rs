//! Core data structures for time series forecasting.

mod forecast;
mod time_series;

pub use forecast::{Forecast, ForecastRow, ForecastTable};
pub use time_series::{Frequency, MissingValuePolicy, TimeSeries};
