//! Fishing condition scoring.
//!
//! Averages a day's hourly frames and turns them into a verdict. Two override
//! rules catch clearly bad and clearly great marine conditions first; anything
//! else is scored on wind, pressure, waves and temperature.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::HourlyFrame;

/// Wind (km/h) at or above which an hour is flagged as windy
pub const STRONG_WIND_KMH: f64 = 19.0;

/// Pressure (hPa) above which an hour is flagged as favourable
pub const GOOD_PRESSURE_HPA: f64 = 1015.0;

/// Human-readable outcome of scoring a day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// Nothing to score
    InsufficientData,
    /// Override: strong wind, waves and low pressure together
    Difficult,
    /// Override: calm water, light wind and high pressure together
    Excellent,
    /// Score of 7 or more
    Ideal,
    /// Score of 5 or 6
    Good,
    /// Score of 3 or 4
    Average,
    /// Score below 3
    Poor,
}

impl Verdict {
    /// Display string for the verdict
    pub fn message(&self) -> &'static str {
        match self {
            Verdict::InsufficientData => "No hay datos suficientes",
            Verdict::Difficult => {
                "⚠️ Condiciones difíciles: viento fuerte, oleaje y presión en baja."
            }
            Verdict::Excellent => {
                "🎣 ¡Condiciones excelentes! Agua calma, poco viento y presión alta."
            }
            Verdict::Ideal => "🎣 ¡Día IDEAL para pescar! Condiciones excelentes.",
            Verdict::Good => "🐟 Buen día para pescar. Condiciones aceptables.",
            Verdict::Average => "🎏 Día regular. Se puede pescar con paciencia.",
            Verdict::Poor => "⚠️ Día complicado. Mucho viento o presión inestable.",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Mean readings over a run of frames
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConditionAverages {
    pub temperature_c: f64,
    pub wind_speed_kmh: f64,
    pub pressure_hpa: f64,
    /// Mean of the hours that report waves, `None` when none do
    pub wave_height_m: Option<f64>,
}

impl ConditionAverages {
    /// Returns `None` for an empty slice.
    pub fn from_frames(frames: &[HourlyFrame]) -> Option<Self> {
        if frames.is_empty() {
            return None;
        }

        let waves: Vec<f64> = frames.iter().filter_map(|f| f.wave_height_m).collect();

        Some(Self {
            temperature_c: mean(frames.iter().map(|f| f.temperature_c)),
            wind_speed_kmh: mean(frames.iter().map(|f| f.wind_speed_kmh)),
            pressure_hpa: mean(frames.iter().map(|f| f.pressure_hpa)),
            wave_height_m: (!waves.is_empty()).then(|| mean(waves.iter().copied())),
        })
    }
}

fn mean(values: impl ExactSizeIterator<Item = f64>) -> f64 {
    let count = values.len() as f64;
    values.sum::<f64>() / count
}

/// Points awarded per factor by the standard scorer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreFactors {
    /// 3 below 10 km/h, 2 below 20, 1 below 30
    pub wind: u8,
    /// 2 within 1010-1020 hPa, 1 within 1000-1025
    pub pressure: u8,
    /// 2 below 0.3 m, 1 below 0.6 m; a flat 1 without marine data
    pub waves: u8,
    /// 1 within 15-28 °C
    pub temperature: u8,
}

impl ScoreFactors {
    pub fn from_averages(averages: &ConditionAverages) -> Self {
        Self {
            wind: wind_points(averages.wind_speed_kmh),
            pressure: pressure_points(averages.pressure_hpa),
            waves: match averages.wave_height_m {
                Some(wave) if wave < 0.3 => 2,
                Some(wave) if wave < 0.6 => 1,
                Some(_) => 0,
                None => 1,
            },
            temperature: u8::from((15.0..=28.0).contains(&averages.temperature_c)),
        }
    }

    pub fn total(&self) -> u8 {
        self.wind + self.pressure + self.waves + self.temperature
    }

    pub fn verdict(&self) -> Verdict {
        match self.total() {
            7.. => Verdict::Ideal,
            5..=6 => Verdict::Good,
            3..=4 => Verdict::Average,
            _ => Verdict::Poor,
        }
    }
}

fn wind_points(wind_kmh: f64) -> u8 {
    if wind_kmh < 10.0 {
        3
    } else if wind_kmh < 20.0 {
        2
    } else if wind_kmh < 30.0 {
        1
    } else {
        0
    }
}

fn pressure_points(pressure_hpa: f64) -> u8 {
    if (1010.0..=1020.0).contains(&pressure_hpa) {
        2
    } else if (1000.0..=1025.0).contains(&pressure_hpa) {
        1
    } else {
        0
    }
}

/// Override rules, only meaningful when the day has wave data
fn override_verdict(averages: &ConditionAverages) -> Option<Verdict> {
    let wave = averages.wave_height_m?;

    if averages.wind_speed_kmh > 17.0 && wave > 0.4 && averages.pressure_hpa < 1013.0 {
        Some(Verdict::Difficult)
    } else if wave < 0.3 && averages.wind_speed_kmh < 12.0 && averages.pressure_hpa > 1016.0 {
        Some(Verdict::Excellent)
    } else {
        None
    }
}

/// Score a day's frames. Never fails; an empty slice yields
/// [`Verdict::InsufficientData`].
pub fn fishing_verdict(frames: &[HourlyFrame]) -> Verdict {
    let Some(averages) = ConditionAverages::from_frames(frames) else {
        return Verdict::InsufficientData;
    };

    override_verdict(&averages)
        .unwrap_or_else(|| ScoreFactors::from_averages(&averages).verdict())
}

/// Verdict text for a day's frames
pub fn score(frames: &[HourlyFrame]) -> String {
    fishing_verdict(frames).to_string()
}

/// The earlier three-factor scorer: wind, pressure and a 15-25 °C band.
///
/// Ignores waves, has no override rules and only knows three outcomes.
pub fn legacy_verdict(frames: &[HourlyFrame]) -> Verdict {
    let Some(averages) = ConditionAverages::from_frames(frames) else {
        return Verdict::InsufficientData;
    };

    let total = wind_points(averages.wind_speed_kmh)
        + pressure_points(averages.pressure_hpa)
        + u8::from((15.0..=25.0).contains(&averages.temperature_c));

    match total {
        5.. => Verdict::Ideal,
        3..=4 => Verdict::Good,
        _ => Verdict::Poor,
    }
}

/// Which scorer produces the day's verdict
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScoringModel {
    #[default]
    Standard,
    Legacy,
}

impl ScoringModel {
    pub fn verdict(&self, frames: &[HourlyFrame]) -> Verdict {
        match self {
            ScoringModel::Standard => fishing_verdict(frames),
            ScoringModel::Legacy => legacy_verdict(frames),
        }
    }
}

/// Whether an hour's wind is strong enough to warn about
pub fn is_strong_wind(frame: &HourlyFrame) -> bool {
    frame.wind_speed_kmh.round() >= STRONG_WIND_KMH
}

/// Whether an hour's pressure is favourable for fishing
pub fn is_good_pressure(frame: &HourlyFrame) -> bool {
    frame.pressure_hpa.round() > GOOD_PRESSURE_HPA
}
