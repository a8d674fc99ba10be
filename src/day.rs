//! Day selection over a multi-day hourly series
//!
//! The series is addressed as hours counted from local midnight of its first
//! day. "Today" starts at the current hour, later days start at midnight, and
//! every day ends at the following midnight.

use std::ops::Range;

use chrono::{DateTime, FixedOffset, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::data::{ForecastSource, HourlySeries};

pub const HOURS_PER_DAY: usize = 24;

/// Which of the forecast days to look at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayOffset {
    Today,
    Tomorrow,
    DayAfterTomorrow,
}

impl DayOffset {
    /// Days after today (0, 1 or 2)
    pub fn index(&self) -> usize {
        match self {
            DayOffset::Today => 0,
            DayOffset::Tomorrow => 1,
            DayOffset::DayAfterTomorrow => 2,
        }
    }

    /// Display label for the day.
    pub fn label(&self) -> &'static str {
        match self {
            DayOffset::Today => "Hoy",
            DayOffset::Tomorrow => "Mañana",
            DayOffset::DayAfterTomorrow => "Pasado mañana",
        }
    }

    /// Parses user input into a DayOffset.
    ///
    /// Matching is case-insensitive and supports aliases:
    /// - "0" | "hoy" | "today" -> Today
    /// - "1" | "mañana" | "manana" | "tomorrow" -> Tomorrow
    /// - "2" | "pasado" | "pasado-mañana" | "pasado-manana" | "day-after" -> DayAfterTomorrow
    ///
    /// Returns `None` if the input doesn't match any day.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<DayOffset> {
        match s.to_lowercase().trim() {
            "0" | "hoy" | "today" => Some(DayOffset::Today),
            "1" | "mañana" | "manana" | "tomorrow" => Some(DayOffset::Tomorrow),
            "2" | "pasado" | "pasado-mañana" | "pasado-manana" | "day-after" => {
                Some(DayOffset::DayAfterTomorrow)
            }
            _ => None,
        }
    }
}

/// Hour range of `day` within a series that starts at local midnight.
///
/// Today begins at `now_hour`; later days begin at midnight. The end is always
/// the midnight that closes the selected day.
pub fn day_bounds(day: DayOffset, now_hour: u32) -> Range<usize> {
    let hour_offset = match day {
        DayOffset::Today => (now_hour as usize).min(HOURS_PER_DAY),
        _ => 0,
    };

    let start = day.index() * HOURS_PER_DAY + hour_offset;
    let end = (day.index() + 1) * HOURS_PER_DAY;
    start..end
}

/// Extract the frames of one calendar day.
///
/// Frames are positioned by hours elapsed since local midnight of the first
/// frame's date, so a series starting at midnight is sliced exactly like
/// `frames[start..end]`. Missing hours are simply absent from the result.
pub fn slice_day(series: &HourlySeries, day: DayOffset, now_hour: u32) -> HourlySeries {
    let Some(first) = series.frames.first() else {
        return HourlySeries::new(series.source, Vec::new());
    };

    let midnight = first.timestamp.date_naive().and_time(NaiveTime::MIN);
    let bounds = day_bounds(day, now_hour);

    let frames = series
        .frames
        .iter()
        .filter(|frame| {
            let hour = frame
                .timestamp
                .naive_local()
                .signed_duration_since(midnight)
                .num_hours();
            usize::try_from(hour).is_ok_and(|hour| bounds.contains(&hour))
        })
        .cloned()
        .collect();

    HourlySeries::new(series.source, frames)
}

/// Express a series in the spot's local time.
///
/// Open-Meteo already reports the location's offset. MET Norway reports UTC,
/// so its frames are shifted to `local`, the offset of the machine asking.
pub fn localize(series: HourlySeries, local: FixedOffset) -> HourlySeries {
    match series.source {
        ForecastSource::OpenMeteo => series,
        ForecastSource::MetNorway => series.with_offset(local),
    }
}

/// Current hour of day in the series' own UTC offset.
pub fn current_local_hour(series: &HourlySeries, now: DateTime<Utc>) -> u32 {
    now.with_timezone(&series.offset()).hour()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_support::series_at;
    use chrono::{NaiveDate, TimeZone};

    #[test]
    fn test_day_bounds() {
        assert_eq!(day_bounds(DayOffset::Today, 14), 14..24);
        assert_eq!(day_bounds(DayOffset::Today, 0), 0..24);
        assert_eq!(day_bounds(DayOffset::Tomorrow, 14), 24..48);
        assert_eq!(day_bounds(DayOffset::DayAfterTomorrow, 23), 48..72);
    }

    #[test]
    fn test_today_starts_at_current_hour() {
        let series = series_at(ForecastSource::OpenMeteo, 72, -3 * 3600);
        let today = slice_day(&series, DayOffset::Today, 14);

        assert_eq!(today.len(), 10);
        assert_eq!(today.frames[..], series.frames[14..24]);
        assert_eq!(today.source, ForecastSource::OpenMeteo);
    }

    #[test]
    fn test_tomorrow_is_full_day_regardless_of_hour() {
        let series = series_at(ForecastSource::OpenMeteo, 72, 0);

        for now_hour in [0, 9, 14, 23] {
            let tomorrow = slice_day(&series, DayOffset::Tomorrow, now_hour);
            assert_eq!(tomorrow.len(), 24);
            assert_eq!(tomorrow.frames[..], series.frames[24..48]);
        }
    }

    #[test]
    fn test_short_series_truncates_silently() {
        let series = series_at(ForecastSource::OpenMeteo, 60, 0);

        assert_eq!(slice_day(&series, DayOffset::DayAfterTomorrow, 5).len(), 12);

        let short = series_at(ForecastSource::OpenMeteo, 20, 0);
        assert!(slice_day(&short, DayOffset::Tomorrow, 5).is_empty());
    }

    #[test]
    fn test_late_hour_leaves_today_empty() {
        let series = series_at(ForecastSource::OpenMeteo, 72, 0);
        assert!(slice_day(&series, DayOffset::Today, 24).is_empty());
    }

    #[test]
    fn test_empty_series() {
        let series = HourlySeries::new(ForecastSource::MetNorway, Vec::new());
        let sliced = slice_day(&series, DayOffset::Today, 10);
        assert!(sliced.is_empty());
        assert_eq!(sliced.source, ForecastSource::MetNorway);
    }

    #[test]
    fn test_series_starting_mid_day() {
        // Fallback series begin at the current hour rather than midnight
        let mut series = series_at(ForecastSource::MetNorway, 72, 0);
        series.frames.drain(..10);

        let today = slice_day(&series, DayOffset::Today, 10);
        assert_eq!(today.len(), 14);
        assert_eq!(today.frames[0].timestamp.hour(), 10);

        let tomorrow = slice_day(&series, DayOffset::Tomorrow, 10);
        assert_eq!(tomorrow.len(), 24);
        assert_eq!(tomorrow.frames[0].timestamp.hour(), 0);
    }

    #[test]
    fn test_current_local_hour_uses_series_offset() {
        let series = series_at(ForecastSource::OpenMeteo, 24, -3 * 3600);
        let now = Utc.with_ymd_and_hms(2024, 7, 15, 17, 30, 0).unwrap();
        assert_eq!(current_local_hour(&series, now), 14);
    }

    #[test]
    fn test_day_offset_parsing() {
        assert_eq!(DayOffset::from_str("hoy"), Some(DayOffset::Today));
        assert_eq!(DayOffset::from_str("0"), Some(DayOffset::Today));
        assert_eq!(DayOffset::from_str("Mañana"), Some(DayOffset::Tomorrow));
        assert_eq!(DayOffset::from_str("tomorrow"), Some(DayOffset::Tomorrow));
        assert_eq!(DayOffset::from_str("pasado"), Some(DayOffset::DayAfterTomorrow));
        assert_eq!(DayOffset::from_str("2"), Some(DayOffset::DayAfterTomorrow));
        assert_eq!(DayOffset::from_str("3"), None);
        assert_eq!(DayOffset::from_str("ayer"), None);
    }

    #[test]
    fn test_day_offset_index_and_label() {
        assert_eq!(DayOffset::Today.index(), 0);
        assert_eq!(DayOffset::DayAfterTomorrow.index(), 2);
        assert_eq!(DayOffset::Tomorrow.label(), "Mañana");
    }

    #[test]
    fn test_met_norway_series_sliced_in_local_time() {
        // UTC series starting 2024-07-16 01:00Z, which is 22:00 on the 15th at UTC-3
        let mut series = series_at(ForecastSource::MetNorway, 96, 0);
        series.frames.drain(..25);
        let local = FixedOffset::west_opt(3 * 3600).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 7, 16, 1, 30, 0).unwrap();

        let series = localize(series, local);
        let now_hour = current_local_hour(&series, now);
        assert_eq!(now_hour, 22);

        let today = slice_day(&series, DayOffset::Today, now_hour);
        assert_eq!(today.len(), 2);
        assert!(today
            .frames
            .iter()
            .all(|f| f.timestamp.date_naive() == NaiveDate::from_ymd_opt(2024, 7, 15).unwrap()));
        assert_eq!(today.frames[0].timestamp.hour(), 22);

        let tomorrow = slice_day(&series, DayOffset::Tomorrow, now_hour);
        assert_eq!(tomorrow.len(), 24);
        assert_eq!(tomorrow.frames[0].timestamp.to_rfc3339(), "2024-07-16T00:00:00-03:00");
    }

    #[test]
    fn test_localize_keeps_open_meteo_offset() {
        let series = series_at(ForecastSource::OpenMeteo, 24, -3 * 3600);
        let localized = localize(series.clone(), FixedOffset::east_opt(3600).unwrap());
        assert_eq!(localized, series);
    }
}
