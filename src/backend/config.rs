//! Per-backend configuration.
//!
//! Each backend family gets an explicit, enumerated configuration struct
//! validated up front, instead of an opaque parameter dictionary splatted
//! into the external call.

use crate::backend::BackendKind;
use crate::error::{ForecastError, Result};

/// How seasonal components combine with the trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeasonalityMode {
    #[default]
    Additive,
    Multiplicative,
}

/// Configuration for the seasonal/trend backend.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonalTrendConfig {
    /// Fit a yearly seasonal component.
    pub yearly_seasonality: bool,
    /// Fit a weekly seasonal component.
    pub weekly_seasonality: bool,
    /// Fit a daily seasonal component.
    pub daily_seasonality: bool,
    /// Additive or multiplicative seasonality.
    pub seasonality_mode: SeasonalityMode,
    /// Flexibility of the automatic changepoint selection.
    pub changepoint_prior_scale: f64,
    /// Fraction of history in which changepoints are placed.
    pub changepoint_range: f64,
    /// Strength of the seasonality prior.
    pub seasonality_prior_scale: f64,
    /// Strength of the holiday prior.
    pub holidays_prior_scale: f64,
    /// Width of the uncertainty intervals (0.95 for 95%).
    pub interval_width: f64,
}

impl Default for SeasonalTrendConfig {
    fn default() -> Self {
        Self {
            yearly_seasonality: true,
            weekly_seasonality: false,
            daily_seasonality: false,
            seasonality_mode: SeasonalityMode::Additive,
            changepoint_prior_scale: 0.05,
            changepoint_range: 0.8,
            seasonality_prior_scale: 10.0,
            holidays_prior_scale: 10.0,
            interval_width: 0.95,
        }
    }
}

impl SeasonalTrendConfig {
    /// Set the seasonality mode.
    pub fn with_seasonality_mode(mut self, mode: SeasonalityMode) -> Self {
        self.seasonality_mode = mode;
        self
    }

    /// Set the changepoint prior scale.
    pub fn with_changepoint_prior_scale(mut self, scale: f64) -> Self {
        self.changepoint_prior_scale = scale;
        self
    }

    /// Set the interval width.
    pub fn with_interval_width(mut self, width: f64) -> Self {
        self.interval_width = width;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.changepoint_prior_scale <= 0.0 {
            return Err(ForecastError::InvalidParameter(
                "changepoint_prior_scale must be positive".to_string(),
            ));
        }
        if !(self.changepoint_range > 0.0 && self.changepoint_range <= 1.0) {
            return Err(ForecastError::InvalidParameter(
                "changepoint_range must be in (0, 1]".to_string(),
            ));
        }
        if self.seasonality_prior_scale <= 0.0 || self.holidays_prior_scale <= 0.0 {
            return Err(ForecastError::InvalidParameter(
                "prior scales must be positive".to_string(),
            ));
        }
        validate_interval_width(self.interval_width)
    }
}

/// Configuration for the automatic order search backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoOrderConfig {
    /// Starting AR order for the stepwise search.
    pub start_p: usize,
    /// Starting MA order for the stepwise search.
    pub start_q: usize,
    /// Maximum AR order to consider.
    pub max_p: usize,
    /// Maximum MA order to consider.
    pub max_q: usize,
    /// Maximum differencing order.
    pub max_d: usize,
    /// Search seasonal orders too.
    pub seasonal: bool,
    /// Seasonal period (observations per cycle).
    pub seasonal_period: usize,
    /// Use stepwise search instead of exhaustive.
    pub stepwise: bool,
}

impl Default for AutoOrderConfig {
    fn default() -> Self {
        Self {
            start_p: 1,
            start_q: 1,
            max_p: 3,
            max_q: 3,
            max_d: 2,
            seasonal: false,
            seasonal_period: 12,
            stepwise: true,
        }
    }
}

impl AutoOrderConfig {
    /// Set maximum non-seasonal orders.
    pub fn with_max_orders(mut self, max_p: usize, max_d: usize, max_q: usize) -> Self {
        self.max_p = max_p;
        self.max_d = max_d;
        self.max_q = max_q;
        self
    }

    /// Enable seasonal search with the given period.
    pub fn with_seasonal_period(mut self, period: usize) -> Self {
        self.seasonal = true;
        self.seasonal_period = period;
        self
    }

    /// Use exhaustive search instead of stepwise.
    pub fn exhaustive(mut self) -> Self {
        self.stepwise = false;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.start_p > self.max_p || self.start_q > self.max_q {
            return Err(ForecastError::InvalidParameter(
                "starting orders must not exceed maximum orders".to_string(),
            ));
        }
        if self.seasonal && self.seasonal_period < 2 {
            return Err(ForecastError::InvalidParameter(
                "seasonal period must be at least 2".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration for one forecast run: backend family, its parameters,
/// and the confidence level requested from the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendConfig {
    SeasonalTrend(SeasonalTrendConfig),
    AutoOrderSearch {
        config: AutoOrderConfig,
        /// Width of the confidence intervals (0.95 for 95%).
        interval_width: f64,
    },
}

impl BackendConfig {
    /// Auto-order-search with the default 95% intervals.
    pub fn auto_order_search(config: AutoOrderConfig) -> Self {
        Self::AutoOrderSearch {
            config,
            interval_width: 0.95,
        }
    }

    /// The backend family this configuration selects.
    pub fn kind(&self) -> BackendKind {
        match self {
            Self::SeasonalTrend(_) => BackendKind::SeasonalTrend,
            Self::AutoOrderSearch { .. } => BackendKind::AutoOrderSearch,
        }
    }

    /// The requested confidence interval width.
    pub fn interval_width(&self) -> f64 {
        match self {
            Self::SeasonalTrend(config) => config.interval_width,
            Self::AutoOrderSearch { interval_width, .. } => *interval_width,
        }
    }

    /// Validate the selected backend's parameters.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::SeasonalTrend(config) => config.validate(),
            Self::AutoOrderSearch {
                config,
                interval_width,
            } => {
                config.validate()?;
                validate_interval_width(*interval_width)
            }
        }
    }
}

fn validate_interval_width(width: f64) -> Result<()> {
    if !(width > 0.0 && width < 1.0) {
        return Err(ForecastError::InvalidParameter(format!(
            "interval width must be in (0, 1), got {}",
            width
        )));
    }
    Ok(())
}
