//! Forecast visualization using Plotters.
//!
//! Renders the training data, test data and point forecast as lines with
//! a shaded confidence band. Only compiled with the `plot` feature.

use crate::core::{ForecastTable, TimeSeries};
use crate::error::{ForecastError, Result};
use chrono::{DateTime, Utc};
use plotters::prelude::*;
use std::path::Path;

fn render_err<E: std::fmt::Display>(e: E) -> ForecastError {
    ForecastError::Render(e.to_string())
}

/// Days since the first plotted timestamp, as the x coordinate.
fn to_x(origin: DateTime<Utc>, timestamp: DateTime<Utc>) -> f64 {
    (timestamp - origin).num_seconds() as f64 / 86_400.0
}

/// Render training data, test data, forecast and confidence band to a
/// PNG file.
pub fn plot_forecast<P: AsRef<Path>>(
    train: &TimeSeries,
    test: &TimeSeries,
    table: &ForecastTable,
    path: P,
) -> Result<()> {
    if train.is_empty() || table.is_empty() {
        return Err(ForecastError::EmptyData);
    }

    let origin = train.first_timestamp().ok_or(ForecastError::EmptyData)?;

    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    let mut extend = |timestamps: &[DateTime<Utc>], values: &[f64]| {
        for (&t, &v) in timestamps.iter().zip(values.iter()) {
            x_max = x_max.max(to_x(origin, t));
            y_min = y_min.min(v);
            y_max = y_max.max(v);
        }
    };
    extend(train.timestamps(), train.values());
    extend(test.timestamps(), test.values());
    extend(table.timestamps(), table.point_estimates());
    if let Some(lower) = table.lower_bounds() {
        extend(table.timestamps(), lower);
    }
    if let Some(upper) = table.upper_bounds() {
        extend(table.timestamps(), upper);
    }

    let y_margin = ((y_max - y_min) * 0.05).max(1e-9);
    let y_range = (y_min - y_margin)..(y_max + y_margin);

    let root = BitMapBackend::new(path.as_ref(), (1024, 640)).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Forecast", ("sans-serif", 24))
        .margin(16)
        .x_label_area_size(36)
        .y_label_area_size(48)
        .build_cartesian_2d(0.0..x_max.max(1.0), y_range)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .x_desc("days")
        .draw()
        .map_err(render_err)?;

    // Shaded confidence band first, so the lines draw on top of it
    if let (Some(lower), Some(upper)) = (table.lower_bounds(), table.upper_bounds()) {
        let mut band: Vec<(f64, f64)> = table
            .timestamps()
            .iter()
            .zip(upper.iter())
            .map(|(&t, &v)| (to_x(origin, t), v))
            .collect();
        band.extend(
            table
                .timestamps()
                .iter()
                .zip(lower.iter())
                .rev()
                .map(|(&t, &v)| (to_x(origin, t), v)),
        );
        chart
            .draw_series(std::iter::once(Polygon::new(band, BLUE.mix(0.2).filled())))
            .map_err(render_err)?;
    }

    let line = |timestamps: &[DateTime<Utc>], values: &[f64]| -> Vec<(f64, f64)> {
        timestamps
            .iter()
            .zip(values.iter())
            .map(|(&t, &v)| (to_x(origin, t), v))
            .collect()
    };

    chart
        .draw_series(LineSeries::new(
            line(train.timestamps(), train.values()),
            &BLACK,
        ))
        .map_err(render_err)?
        .label("Training Data")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLACK));

    if !test.is_empty() {
        chart
            .draw_series(LineSeries::new(
                line(test.timestamps(), test.values()),
                &GREEN,
            ))
            .map_err(render_err)?
            .label("Test Data")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], GREEN));
    }

    chart
        .draw_series(LineSeries::new(
            line(table.timestamps(), table.point_estimates()),
            &BLUE,
        ))
        .map_err(render_err)?
        .label("Forecast")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Forecast, Frequency};
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn monthly_series(start: DateTime<Utc>, values: Vec<f64>) -> TimeSeries {
        let timestamps: Vec<_> = (0..values.len())
            .map(|i| Frequency::Monthly.advance(start, i as u32))
            .collect();
        TimeSeries::new(timestamps, values).unwrap()
    }

    #[test]
    fn renders_forecast_overlay_to_png() {
        let train = monthly_series(date(2020, 1, 1), (1..=12).map(|i| i as f64).collect());
        let test = monthly_series(date(2021, 1, 1), vec![13.0, 14.0, 15.0]);
        let table = ForecastTable::from_forecast(
            (0..3)
                .map(|i| Frequency::Monthly.advance(date(2021, 4, 1), i))
                .collect(),
            Forecast::from_values_with_intervals(
                vec![16.0, 17.0, 18.0],
                vec![14.0, 15.0, 16.0],
                vec![18.0, 19.0, 20.0],
            ),
        )
        .unwrap();

        let path = std::env::temp_dir().join("forecast_harness_plot_test.png");
        plot_forecast(&train, &test, &table, &path).unwrap();

        let metadata = std::fs::metadata(&path).unwrap();
        assert!(metadata.len() > 0);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn rejects_empty_inputs() {
        let train = monthly_series(date(2020, 1, 1), vec![1.0, 2.0]);
        let path = std::env::temp_dir().join("forecast_harness_plot_unused.png");

        let result = plot_forecast(&train, &TimeSeries::empty(), &ForecastTable::empty(), &path);
        assert!(matches!(result, Err(ForecastError::EmptyData)));
    }
}
