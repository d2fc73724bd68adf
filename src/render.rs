//! Plain-text rendering of a conditions report

use crate::models::ForecastSeries;
use crate::report::{ConditionsReport, Section};
use std::fmt::Write;

const BAR_WIDTH: usize = 30;
/// Ocean current speed that fills the whole bar, in m/s
const OCEAN_BAR_FULL_SCALE: f64 = 2.0;

/// Render a report for the terminal
#[must_use]
pub fn render_text(report: &ConditionsReport) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = write_report(&mut out, report);
    out
}

fn write_report(out: &mut String, report: &ConditionsReport) -> std::fmt::Result {
    let weather = &report.weather;

    writeln!(out, "Conditions for {}", report.location.display_name())?;
    writeln!(out, "  Coordinates:  {}", report.location.format_coordinates())?;
    writeln!(out, "  Temperature:  {}", weather.format_temperature())?;
    writeln!(out, "  Condition:    {}", weather.condition)?;
    writeln!(out, "  Wind:         {}", weather.format_wind())?;
    writeln!(out)?;

    writeln!(out, "Air quality")?;
    match &report.air_quality {
        Section::Ready { data } => {
            writeln!(out, "  AQI:          {} ({})", data.aqi, data.label)?;
            match data.pm2_5 {
                Some(pm) => writeln!(out, "  PM2.5:        {pm:.1} μg/m³")?,
                None => writeln!(out, "  PM2.5:        n/a")?,
            }
        }
        Section::Unavailable { warning } => writeln!(out, "  ⚠ {warning}")?,
    }
    writeln!(out)?;

    writeln!(out, "Beach")?;
    match &report.beach {
        Section::Ready { data } => {
            let mark = if data.suitable { "✅" } else { "❌" };
            writeln!(out, "  {mark} {}", data.message())?;
            for extra in data.violations.iter().skip(1) {
                writeln!(out, "     also: {}", extra.message())?;
            }
        }
        Section::Unavailable { warning } => writeln!(out, "  ⚠ {warning}")?,
    }

    if let Some(ocean) = &report.ocean {
        writeln!(out)?;
        writeln!(out, "Ocean current")?;
        match ocean {
            Section::Ready { data } => {
                writeln!(out, "  Speed:        {}", data.sample.format_speed())?;
                writeln!(out, "  Direction:    {}", data.sample.format_direction())?;
                writeln!(
                    out,
                    "  {}",
                    bar(data.sample.speed_ms, OCEAN_BAR_FULL_SCALE, BAR_WIDTH)
                )?;
            }
            Section::Unavailable { warning } => writeln!(out, "  ⚠ {warning}")?,
        }
    }

    if let Some(forecast) = &report.forecast {
        writeln!(out)?;
        writeln!(out, "Forecast")?;
        match forecast {
            Section::Ready { data } if data.is_empty() => {
                writeln!(out, "  No forecast data points returned.")?;
            }
            Section::Ready { data } => write_forecast(out, data)?,
            Section::Unavailable { warning } => writeln!(out, "  ⚠ {warning}")?,
        }
    }

    Ok(())
}

fn write_forecast(out: &mut String, series: &ForecastSeries) -> std::fmt::Result {
    let (min, max) = series.temperature_range().unwrap_or((0.0, 0.0));
    // bars are scaled between the coldest and warmest step
    let span = (max - min).max(f64::EPSILON);

    writeln!(out, "  {:<16}  {:>8}  {:<24}", "Time (UTC)", "Temp", "Condition")?;
    for (row, (_, temperature)) in series.rows().iter().zip(series.temperature_series()) {
        writeln!(
            out,
            "  {:<16}  {:>8}  {:<24}  {}",
            row.time,
            row.temperature,
            row.condition,
            bar(temperature - min + span * 0.05, span * 1.05, BAR_WIDTH / 2)
        )?;
    }
    Ok(())
}

/// Horizontal bar of `width` cells filled in proportion to `value / full_scale`
fn bar(value: f64, full_scale: f64, width: usize) -> String {
    let ratio = if full_scale > 0.0 {
        (value / full_scale).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = (ratio * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "·".repeat(width - filled))
}
