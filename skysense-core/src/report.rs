//! Text rendering of forecast series and the two-city temperature comparison.

use std::fmt::Write;

use crate::ForecastSeries;

pub const SEPARATOR: &str = "-------------------";
pub const WIDE_SEPARATOR: &str = "-------------------------------------";

const DATE_WIDTH: usize = 12;
const DESCRIPTION_WIDTH: usize = 25;
const TEMPERATURE_WIDTH: usize = 18;
const HUMIDITY_WIDTH: usize = 14;
const WIND_WIDTH: usize = 20;
const PRESSURE_WIDTH: usize = 15;

/// Left-aligned cell of exactly `width` chars. Longer text is cut so at least
/// one space always separates it from the next column.
fn cell(text: &str, width: usize) -> String {
    let visible = width.saturating_sub(1);
    format!("{text:<width$.visible$}")
}

fn row(cells: [(&str, usize); 6]) -> String {
    let line: String = cells.iter().map(|(text, width)| cell(text, *width)).collect();
    line.trim_end().to_string()
}

/// Column headers, one line per day, then a separator line.
pub fn render(series: &ForecastSeries) -> String {
    let mut out = String::new();

    out.push_str(&row([
        ("Date", DATE_WIDTH),
        ("Description", DESCRIPTION_WIDTH),
        ("Temperature (°C)", TEMPERATURE_WIDTH),
        ("Humidity (%)", HUMIDITY_WIDTH),
        ("Wind Speed (m/s)", WIND_WIDTH),
        ("Pressure (mb)", PRESSURE_WIDTH),
    ]));
    out.push('\n');

    for day in &series.days {
        let date = day.date.to_string();
        let temperature = format!("{:.2}", day.temperature_c);
        let humidity = format!("{:.2}", day.humidity_pct);
        let wind = format!("{:.2}", day.wind_speed_mps);
        let pressure = format!("{:.2}", day.pressure_mb);

        out.push_str(&row([
            (date.as_str(), DATE_WIDTH),
            (day.description.as_str(), DESCRIPTION_WIDTH),
            (temperature.as_str(), TEMPERATURE_WIDTH),
            (humidity.as_str(), HUMIDITY_WIDTH),
            (wind.as_str(), WIND_WIDTH),
            (pressure.as_str(), PRESSURE_WIDTH),
        ]));
        out.push('\n');
    }

    out.push_str(SEPARATOR);
    out.push('\n');
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    FirstHotter,
    SecondHotter,
    Tie,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Comparison {
    pub mean_a: f64,
    pub mean_b: f64,
    /// Days averaged on each side: the length of the shorter series.
    pub paired_days: usize,
    pub verdict: Verdict,
}

/// Mean temperature of each series over the days they have in common by position.
///
/// Trailing days of the longer series are ignored. Returns `None` when there
/// is no pair to average.
pub fn mean_temperatures(a: &ForecastSeries, b: &ForecastSeries) -> Option<(f64, f64, usize)> {
    let (sum_a, sum_b, n) = a
        .temperatures()
        .zip(b.temperatures())
        .fold((0.0, 0.0, 0usize), |(sa, sb, n), (ta, tb)| (sa + ta, sb + tb, n + 1));

    if n == 0 {
        return None;
    }

    Some((sum_a / n as f64, sum_b / n as f64, n))
}

pub fn compare(a: &ForecastSeries, b: &ForecastSeries) -> Option<Comparison> {
    let (mean_a, mean_b, paired_days) = mean_temperatures(a, b)?;

    let verdict = if mean_a > mean_b {
        Verdict::FirstHotter
    } else if mean_a < mean_b {
        Verdict::SecondHotter
    } else {
        Verdict::Tie
    };

    Some(Comparison { mean_a, mean_b, paired_days, verdict })
}

/// Both tables followed by the average temperatures and which city is hotter.
pub fn render_comparison(a: &ForecastSeries, b: &ForecastSeries) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "Comparing weather data between {} and {}:", a.city, b.city);
    for series in [a, b] {
        let _ = writeln!(out, "{WIDE_SEPARATOR}");
        let _ = writeln!(out, "Weather data for {}:", series.city);
        out.push_str(&render(series));
    }
    let _ = writeln!(out, "{WIDE_SEPARATOR}");
    let _ = writeln!(out, "{WIDE_SEPARATOR}");

    let Some(cmp) = compare(a, b) else {
        let _ = writeln!(out, "Insufficient weather data available for comparison.");
        return out;
    };

    let _ = writeln!(out, "Average Temperature for {}: {:.2}°C", a.city, cmp.mean_a);
    let _ = writeln!(out, "Average Temperature for {}: {:.2}°C", b.city, cmp.mean_b);
    let _ = writeln!(out, "{WIDE_SEPARATOR}");

    match cmp.verdict {
        Verdict::FirstHotter => {
            let _ = writeln!(out, "{} is hotter on average.", a.city);
        }
        Verdict::SecondHotter => {
            let _ = writeln!(out, "{} is hotter on average.", b.city);
        }
        Verdict::Tie => {
            let _ = writeln!(out, "Average temperatures are the same for both cities.");
        }
    }

    out
}
