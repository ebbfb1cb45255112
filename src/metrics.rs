//! Accuracy metrics for forecast evaluation.

use crate::core::{ForecastTable, TimeSeries};
use crate::error::{ForecastError, Result};

/// The standard accuracy battery for one actual/predicted pairing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    /// Mean Squared Error
    pub mse: f64,
    /// Mean Absolute Error
    pub mae: f64,
    /// Mean Absolute Percentage Error (percent; NaN if every actual is zero)
    pub mape: f64,
    /// Mean Percentage Error (percent; NaN if every actual is zero)
    pub mpe: f64,
    /// Symmetric Mean Absolute Percentage Error (percent)
    pub smape: f64,
    /// R-squared (coefficient of determination)
    pub r2: f64,
    /// Root Mean Squared Error
    pub rmse: f64,
}

impl Metrics {
    /// Compute the battery between aligned actual and predicted values.
    ///
    /// Percentage-error terms with a zero actual are skipped; when every
    /// term is skipped the metric is NaN. A constant actual series gives
    /// `r2 = 1.0` for an exact forecast (zero total sum of squares is
    /// treated as a perfect fit).
    pub fn between(actual: &[f64], predicted: &[f64]) -> Result<Self> {
        if actual.is_empty() || predicted.is_empty() {
            return Err(ForecastError::EmptyData);
        }
        if actual.len() != predicted.len() {
            return Err(ForecastError::DimensionMismatch {
                expected: actual.len(),
                got: predicted.len(),
            });
        }

        let n = actual.len() as f64;

        let mse: f64 = actual
            .iter()
            .zip(predicted.iter())
            .map(|(a, p)| (a - p).powi(2))
            .sum::<f64>()
            / n;

        let mae: f64 = actual
            .iter()
            .zip(predicted.iter())
            .map(|(a, p)| (a - p).abs())
            .sum::<f64>()
            / n;

        // Percentage errors over the terms with a non-zero actual
        let mut abs_pct_sum = 0.0;
        let mut pct_sum = 0.0;
        let mut pct_terms = 0usize;
        for (a, p) in actual.iter().zip(predicted.iter()) {
            if *a != 0.0 {
                abs_pct_sum += ((a - p) / a).abs();
                pct_sum += (a - p) / a;
                pct_terms += 1;
            }
        }
        let (mape, mpe) = if pct_terms == 0 {
            (f64::NAN, f64::NAN)
        } else {
            (
                100.0 * abs_pct_sum / pct_terms as f64,
                100.0 * pct_sum / pct_terms as f64,
            )
        };

        let smape: f64 = actual
            .iter()
            .zip(predicted.iter())
            .map(|(a, p)| {
                let denom = a.abs() + p.abs();
                if denom == 0.0 {
                    0.0
                } else {
                    2.0 * (a - p).abs() / denom
                }
            })
            .sum::<f64>()
            * 100.0
            / n;

        let mean_actual = actual.iter().sum::<f64>() / n;
        let ss_tot: f64 = actual.iter().map(|a| (a - mean_actual).powi(2)).sum();
        let ss_res: f64 = actual
            .iter()
            .zip(predicted.iter())
            .map(|(a, p)| (a - p).powi(2))
            .sum();
        let r2 = if ss_tot == 0.0 {
            1.0
        } else {
            1.0 - ss_res / ss_tot
        };

        Ok(Self {
            mse,
            mae,
            mape,
            mpe,
            smape,
            r2,
            rmse: mse.sqrt(),
        })
    }

    fn named_pairs(&self, suffix: &str) -> Vec<(String, f64)> {
        [
            ("mse", self.mse),
            ("mae", self.mae),
            ("mape", self.mape),
            ("mpe", self.mpe),
            ("smape", self.smape),
            ("r2", self.r2),
            ("rmse", self.rmse),
        ]
        .into_iter()
        .map(|(name, value)| (format!("{}{}", name, suffix), value))
        .collect()
    }
}

/// The full metric set for a forecast: the battery against the point
/// estimates, plus variants against each confidence bound when the
/// forecast table carries them. Immutable once computed.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSet {
    /// Metrics against the point estimates.
    pub point: Metrics,
    /// Metrics against the lower confidence bound.
    pub lower: Option<Metrics>,
    /// Metrics against the upper confidence bound.
    pub upper: Option<Metrics>,
}

impl MetricSet {
    /// Enumerate all metrics as `(name, value)` pairs, bound variants
    /// suffixed `_lower`/`_upper`.
    pub fn as_pairs(&self) -> Vec<(String, f64)> {
        let mut pairs = self.point.named_pairs("");
        if let Some(upper) = &self.upper {
            pairs.extend(upper.named_pairs("_upper"));
        }
        if let Some(lower) = &self.lower {
            pairs.extend(lower.named_pairs("_lower"));
        }
        pairs
    }

    /// Log every metric as a key/value line.
    pub fn log(&self) {
        for (name, value) in self.as_pairs() {
            tracing::info!(metric = %name, value, "forecast metric");
        }
    }
}

/// Evaluate a forecast table against the held-out test window.
///
/// Rows are aligned by timestamp when the test series and table share any
/// timestamps; otherwise positionally over the common prefix, mirroring
/// the behavior of comparing the two column vectors directly. No
/// comparable rows at all is an error.
pub fn evaluate(test: &TimeSeries, table: &ForecastTable) -> Result<MetricSet> {
    if test.is_empty() || table.is_empty() {
        return Err(ForecastError::EmptyData);
    }

    let pairs = align(test, table);
    if pairs.is_empty() {
        return Err(ForecastError::EmptyData);
    }

    let actual: Vec<f64> = pairs.iter().map(|&(a, _)| test.values()[a]).collect();
    let point: Vec<f64> = pairs
        .iter()
        .map(|&(_, f)| table.point_estimates()[f])
        .collect();

    let lower = match table.lower_bounds() {
        Some(bounds) => {
            let predicted: Vec<f64> = pairs.iter().map(|&(_, f)| bounds[f]).collect();
            Some(Metrics::between(&actual, &predicted)?)
        }
        None => None,
    };
    let upper = match table.upper_bounds() {
        Some(bounds) => {
            let predicted: Vec<f64> = pairs.iter().map(|&(_, f)| bounds[f]).collect();
            Some(Metrics::between(&actual, &predicted)?)
        }
        None => None,
    };

    Ok(MetricSet {
        point: Metrics::between(&actual, &point)?,
        lower,
        upper,
    })
}

/// Pair up test and table rows: `(test_index, table_index)`.
fn align(test: &TimeSeries, table: &ForecastTable) -> Vec<(usize, usize)> {
    // Both timestamp sequences are strictly increasing, so a single merge
    // pass finds the shared timestamps.
    let mut matched = Vec::new();
    let (mut i, mut j) = (0, 0);
    let test_ts = test.timestamps();
    let table_ts = table.timestamps();
    while i < test_ts.len() && j < table_ts.len() {
        match test_ts[i].cmp(&table_ts[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                matched.push((i, j));
                i += 1;
                j += 1;
            }
        }
    }
    if !matched.is_empty() {
        return matched;
    }

    // Disjoint timestamp sets: compare positionally over the common prefix
    let n = test.len().min(table.len());
    (0..n).map(|i| (i, i)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Forecast;
    use approx::assert_relative_eq;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn make_timestamps(start_day: u32, n: usize) -> Vec<DateTime<Utc>> {
        let base = Utc.with_ymd_and_hms(2024, 1, start_day, 0, 0, 0).unwrap();
        (0..n).map(|i| base + Duration::days(i as i64)).collect()
    }

    fn make_table(start_day: u32, point: Vec<f64>) -> ForecastTable {
        let timestamps = make_timestamps(start_day, point.len());
        ForecastTable::from_forecast(timestamps, Forecast::from_values(point)).unwrap()
    }

    #[test]
    fn metrics_perfect_prediction() {
        let actual = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let metrics = Metrics::between(&actual, &actual).unwrap();

        assert_relative_eq!(metrics.mse, 0.0, epsilon = 1e-10);
        assert_relative_eq!(metrics.mae, 0.0, epsilon = 1e-10);
        assert_relative_eq!(metrics.mape, 0.0, epsilon = 1e-10);
        assert_relative_eq!(metrics.mpe, 0.0, epsilon = 1e-10);
        assert_relative_eq!(metrics.smape, 0.0, epsilon = 1e-10);
        assert_relative_eq!(metrics.r2, 1.0, epsilon = 1e-10);
        assert_relative_eq!(metrics.rmse, 0.0, epsilon = 1e-10);
    }

    #[test]
    fn metrics_known_values() {
        let actual = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let predicted = vec![1.5, 2.5, 2.5, 4.5, 4.5];
        // Absolute errors: all 0.5

        let metrics = Metrics::between(&actual, &predicted).unwrap();

        assert_relative_eq!(metrics.mae, 0.5, epsilon = 1e-10);
        assert_relative_eq!(metrics.mse, 0.25, epsilon = 1e-10);
        assert_relative_eq!(metrics.rmse, 0.5, epsilon = 1e-10);
    }

    #[test]
    fn metrics_mpe_signs_cancel() {
        let actual = vec![10.0, 10.0];
        let predicted = vec![9.0, 11.0]; // +10% and -10%

        let metrics = Metrics::between(&actual, &predicted).unwrap();

        assert_relative_eq!(metrics.mpe, 0.0, epsilon = 1e-10);
        assert_relative_eq!(metrics.mape, 10.0, epsilon = 1e-10);
    }

    #[test]
    fn metrics_skip_zero_actual_terms() {
        let actual = vec![0.0, 10.0, 20.0];
        let predicted = vec![1.0, 11.0, 22.0];

        let metrics = Metrics::between(&actual, &predicted).unwrap();

        // MAPE over the two non-zero terms: (10% + 10%) / 2
        assert_relative_eq!(metrics.mape, 10.0, epsilon = 1e-10);
        assert!(metrics.smape.is_finite());
    }

    #[test]
    fn metrics_all_zero_actuals_give_nan_percentages() {
        let actual = vec![0.0, 0.0];
        let predicted = vec![1.0, 2.0];

        let metrics = Metrics::between(&actual, &predicted).unwrap();

        assert!(metrics.mape.is_nan());
        assert!(metrics.mpe.is_nan());
        assert!(metrics.mae.is_finite());
    }

    #[test]
    fn metrics_r2_negative_for_poor_model() {
        let actual = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let predicted = vec![5.0, 4.0, 3.0, 2.0, 1.0]; // Inverted

        let metrics = Metrics::between(&actual, &predicted).unwrap();
        assert!(metrics.r2 < 0.0);
    }

    #[test]
    fn metrics_validate_input() {
        assert!(matches!(
            Metrics::between(&[], &[]),
            Err(ForecastError::EmptyData)
        ));
        assert!(matches!(
            Metrics::between(&[1.0, 2.0], &[1.0]),
            Err(ForecastError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn evaluate_aligns_by_timestamp() {
        // Test window: Jan 5..9; table: Jan 1..10. Only the shared days count.
        let test = TimeSeries::new(make_timestamps(5, 5), vec![5.0, 6.0, 7.0, 8.0, 9.0]).unwrap();
        let table = make_table(1, (1..=10).map(|i| i as f64).collect());

        let set = evaluate(&test, &table).unwrap();

        // Shared rows carry identical values, so the fit is exact
        assert_relative_eq!(set.point.mae, 0.0, epsilon = 1e-10);
        assert_relative_eq!(set.point.r2, 1.0, epsilon = 1e-10);
        assert!(set.lower.is_none());
        assert!(set.upper.is_none());
    }

    #[test]
    fn evaluate_falls_back_to_positional_alignment() {
        // Table lives entirely after the test window (future-only frame)
        let test = TimeSeries::new(make_timestamps(1, 3), vec![10.0, 20.0, 30.0]).unwrap();
        let table = make_table(20, vec![10.0, 20.0, 30.0, 40.0]);

        let set = evaluate(&test, &table).unwrap();
        assert_relative_eq!(set.point.mae, 0.0, epsilon = 1e-10);
    }

    #[test]
    fn evaluate_computes_bound_variants() {
        let test = TimeSeries::new(make_timestamps(1, 3), vec![10.0, 10.0, 10.0]).unwrap();
        let table = ForecastTable::from_forecast(
            make_timestamps(1, 3),
            Forecast::from_values_with_intervals(
                vec![10.0, 10.0, 10.0],
                vec![9.0, 9.0, 9.0],
                vec![11.0, 11.0, 11.0],
            ),
        )
        .unwrap();

        let set = evaluate(&test, &table).unwrap();

        assert_relative_eq!(set.point.mape, 0.0, epsilon = 1e-10);
        assert_relative_eq!(set.lower.unwrap().mape, 10.0, epsilon = 1e-10);
        assert_relative_eq!(set.upper.unwrap().mape, 10.0, epsilon = 1e-10);
        // Lower bound sits below the actuals, upper above
        assert!(set.lower.unwrap().mpe > 0.0);
        assert!(set.upper.unwrap().mpe < 0.0);
    }

    #[test]
    fn evaluate_is_idempotent() {
        let test = TimeSeries::new(make_timestamps(1, 4), vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let table = make_table(1, vec![1.1, 2.2, 2.9, 4.4]);

        let first = evaluate(&test, &table).unwrap();
        let second = evaluate(&test, &table).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn evaluate_rejects_empty_inputs() {
        let test = TimeSeries::new(make_timestamps(1, 2), vec![1.0, 2.0]).unwrap();
        assert!(matches!(
            evaluate(&test, &ForecastTable::empty()),
            Err(ForecastError::EmptyData)
        ));
        assert!(matches!(
            evaluate(&TimeSeries::empty(), &make_table(1, vec![1.0])),
            Err(ForecastError::EmptyData)
        ));
    }

    #[test]
    fn metric_set_enumerates_all_names() {
        let test = TimeSeries::new(make_timestamps(1, 2), vec![10.0, 20.0]).unwrap();
        let table = ForecastTable::from_forecast(
            make_timestamps(1, 2),
            Forecast::from_values_with_intervals(
                vec![10.0, 20.0],
                vec![9.0, 19.0],
                vec![11.0, 21.0],
            ),
        )
        .unwrap();

        let set = evaluate(&test, &table).unwrap();
        let names: Vec<String> = set.as_pairs().into_iter().map(|(name, _)| name).collect();

        for expected in ["mse", "mae", "mape", "mpe", "smape", "r2", "rmse"] {
            assert!(names.contains(&expected.to_string()));
            assert!(names.contains(&format!("{}_upper", expected)));
            assert!(names.contains(&format!("{}_lower", expected)));
        }
        assert_eq!(names.len(), 21);
    }
}
