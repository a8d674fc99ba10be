//! Plain-text and JSON rendering of a day's forecast
//!
//! One line per hour with temperature, sky condition, wind, pressure and waves,
//! preceded by the spot, the day, the provider and the verdict.

use chrono::Timelike;
use serde::Serialize;

use crate::data::{weather_condition, ForecastSource, HourlyFrame, HourlySeries, Location};
use crate::day::DayOffset;
use crate::fishing::{is_good_pressure, is_strong_wind, Verdict};

/// Everything the binary prints for one request
#[derive(Debug, Clone, Serialize)]
pub struct DayReport {
    pub location: Location,
    pub day: DayOffset,
    pub source: ForecastSource,
    pub verdict: Verdict,
    /// Verdict display string, duplicated for JSON consumers
    pub verdict_text: String,
    pub frames: Vec<HourlyFrame>,
}

impl DayReport {
    pub fn new(location: Location, day: DayOffset, series: HourlySeries, verdict: Verdict) -> Self {
        Self {
            location,
            day,
            source: series.source,
            verdict,
            verdict_text: verdict.to_string(),
            frames: series.frames,
        }
    }
}

/// Eight-point compass abbreviation (Spanish) for a wind direction in degrees
pub fn compass_point(degrees: f64) -> &'static str {
    const POINTS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SO", "O", "NO"];
    let index = (degrees.rem_euclid(360.0) / 45.0).round() as usize % POINTS.len();
    POINTS[index]
}

/// Render a single hour, e.g. `14:00   22°  Despejado  💨  12 km/h NE  hPa 1016  🌊 0.3 m`
pub fn render_hour(frame: &HourlyFrame) -> String {
    let mut line = format!(
        "{:02}:00  {:>3}°  {}",
        frame.timestamp.hour(),
        frame.temperature_c.round() as i64,
        weather_condition(frame.weather_code),
    );
    if !frame.is_day {
        line.push_str(" 🌙");
    }

    line.push_str(&format!(
        "  💨 {:>3} km/h {}",
        frame.wind_speed_kmh.round() as i64,
        compass_point(frame.wind_direction_or_default()),
    ));
    if is_strong_wind(frame) {
        line.push_str(" ⚠️ Viento fuerte");
    }

    line.push_str(&format!("  hPa {:>4}", frame.pressure_hpa.round() as i64));
    if is_good_pressure(frame) {
        line.push_str(" ✅ Buena presión");
    }

    if let Some(wave) = frame.wave_height_m {
        line.push_str(&format!("  🌊 {:.1} m", wave));
    }

    line
}

/// Render the full text report
pub fn render_text(report: &DayReport) -> String {
    let mut lines = vec![
        format!(
            "{} - {} (fuente: {})",
            report.location.name,
            report.day.label(),
            report.source
        ),
        report.verdict.to_string(),
        String::new(),
    ];

    if report.frames.is_empty() {
        lines.push("Sin horas para mostrar.".to_string());
    }
    lines.extend(report.frames.iter().map(render_hour));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Render the report as pretty-printed JSON
pub fn render_json(report: &DayReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_support::series_at;
    use crate::fishing::fishing_verdict;

    fn report(hours: usize) -> DayReport {
        let series = series_at(ForecastSource::OpenMeteo, hours, -3 * 3600);
        let verdict = fishing_verdict(&series.frames);
        DayReport::new(
            Location::new("Costanera Norte", -34.5444, -58.4320),
            DayOffset::Tomorrow,
            series,
            verdict,
        )
    }

    #[test]
    fn test_render_hour_basic() {
        let series = series_at(ForecastSource::OpenMeteo, 15, 0);
        let line = render_hour(&series.frames[14]);

        assert!(line.starts_with("14:00"));
        assert!(line.contains(" 20°  Despejado  💨"));
        assert!(!line.contains("🌙"));
        assert!(line.contains("💨   8 km/h E"));
        assert!(line.contains("hPa 1015"));
        assert!(line.contains("🌊 0.2 m"));
        assert!(!line.contains("Viento fuerte"));
        assert!(!line.contains("Buena presión"));
    }

    #[test]
    fn test_render_hour_flags_and_no_waves() {
        let mut series = series_at(ForecastSource::MetNorway, 1, 0);
        let frame = &mut series.frames[0];
        frame.wind_speed_kmh = 36.0;
        frame.pressure_hpa = 1019.6;
        frame.wave_height_m = None;
        frame.wind_direction_deg = None;
        frame.weather_code = 61;

        let line = render_hour(frame);
        assert!(line.starts_with("00:00"));
        assert!(line.contains("Lluvia 🌙"));
        assert!(line.contains("km/h N ⚠️ Viento fuerte"));
        assert!(line.contains("hPa 1020 ✅ Buena presión"));
        assert!(!line.contains("🌊"));
    }

    #[test]
    fn test_compass_point() {
        assert_eq!(compass_point(0.0), "N");
        assert_eq!(compass_point(44.0), "NE");
        assert_eq!(compass_point(225.0), "SO");
        assert_eq!(compass_point(350.0), "N");
        assert_eq!(compass_point(-90.0), "O");
    }

    #[test]
    fn test_render_text_header_and_lines() {
        let text = render_text(&report(3));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Costanera Norte - Mañana (fuente: Open-Meteo)");
        assert_eq!(lines[1], Verdict::Ideal.message());
        assert_eq!(lines[2], "");
        assert_eq!(lines.len(), 3 + 3);
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_render_text_empty_day() {
        let text = render_text(&report(0));
        assert!(text.contains("No hay datos suficientes"));
        assert!(text.contains("Sin horas para mostrar."));
    }

    #[test]
    fn test_render_json() {
        let json = render_json(&report(2)).expect("Failed to serialize report");
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["source"], "OpenMeteo");
        assert_eq!(value["day"], "Tomorrow");
        assert_eq!(value["verdict"], "Ideal");
        assert_eq!(value["frames"].as_array().unwrap().len(), 2);
        assert_eq!(value["frames"][0]["timestamp"], "2024-07-15T00:00:00-03:00");
        assert_eq!(value["location"]["name"], "Costanera Norte");
    }
}
