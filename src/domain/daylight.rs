//! Day-phase classification and the lighting values each phase implies.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use super::{
    interpolate::{cubic_in, cubic_out, lerp},
    solar::{SolarTimes, solar_times},
    weather::Location,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DayPhase {
    PreDawn,
    Dawn,
    Sunrise,
    GoldenHourMorning,
    Morning,
    Afternoon,
    GoldenHourEvening,
    Sunset,
    Twilight,
    Dusk,
    Night,
}

impl DayPhase {
    /// Phases bounded by two solar events, in day order. Night is the fallback.
    pub const BOUNDED: [DayPhase; 10] = [
        DayPhase::PreDawn,
        DayPhase::Dawn,
        DayPhase::Sunrise,
        DayPhase::GoldenHourMorning,
        DayPhase::Morning,
        DayPhase::Afternoon,
        DayPhase::GoldenHourEvening,
        DayPhase::Sunset,
        DayPhase::Twilight,
        DayPhase::Dusk,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            DayPhase::PreDawn => "Pre-dawn",
            DayPhase::Dawn => "Dawn",
            DayPhase::Sunrise => "Sunrise",
            DayPhase::GoldenHourMorning => "Morning golden hour",
            DayPhase::Morning => "Morning",
            DayPhase::Afternoon => "Afternoon",
            DayPhase::GoldenHourEvening => "Evening golden hour",
            DayPhase::Sunset => "Sunset",
            DayPhase::Twilight => "Twilight",
            DayPhase::Dusk => "Dusk",
            DayPhase::Night => "Night",
        }
    }

    /// Lighting for this phase at `progress` through it.
    #[must_use]
    pub fn daylight(self, progress: f64) -> Daylight {
        match self {
            DayPhase::PreDawn => Daylight::new(2.3, 0.2),
            DayPhase::Dawn => {
                let t = cubic_in(progress);
                Daylight::new(lerp(2.3, 1.8, t), lerp(0.2, 0.6, t))
            }
            DayPhase::Sunrise => {
                let t = cubic_out(progress);
                Daylight::new(lerp(1.8, 1.2, t), lerp(0.6, 0.7, t))
            }
            DayPhase::GoldenHourMorning => Daylight::new(1.2, 0.7),
            DayPhase::Morning | DayPhase::Afternoon | DayPhase::GoldenHourEvening => {
                Daylight::new(1.0, 1.0)
            }
            DayPhase::Sunset => Daylight::new(lerp(1.0, 1.4, progress), 1.0),
            DayPhase::Twilight => Daylight::new(1.4, 0.3),
            DayPhase::Dusk => Daylight::new(2.0, 0.3),
            DayPhase::Night => Daylight::new(2.5, 0.2),
        }
    }
}

/// `daylight_value` divides surface lightness in the shader; higher is darker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Daylight {
    pub daylight_value: f64,
    pub saturation: f64,
}

impl Daylight {
    #[must_use]
    pub const fn new(daylight_value: f64, saturation: f64) -> Self {
        Self {
            daylight_value,
            saturation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseReading {
    pub phase: DayPhase,
    pub progress: f64,
    pub daylight: Daylight,
}

#[must_use]
pub fn classify(at: DateTime<Utc>, location: &Location) -> PhaseReading {
    let times = solar_times(at, location.latitude, location.longitude);
    if let Some((phase, progress)) = bounded_phase(at, &times) {
        return PhaseReading {
            phase,
            progress,
            daylight: phase.daylight(progress),
        };
    }

    let progress = night_progress(at, &times, location);
    PhaseReading {
        phase: DayPhase::Night,
        progress,
        daylight: DayPhase::Night.daylight(progress),
    }
}

/// First bounded phase whose half-open interval contains `at`.
#[must_use]
pub fn bounded_phase(at: DateTime<Utc>, times: &SolarTimes) -> Option<(DayPhase, f64)> {
    let bounds = times.phase_boundaries();
    DayPhase::BOUNDED
        .iter()
        .zip(bounds.windows(2))
        .find_map(|(phase, window)| {
            let (start, end) = (window[0]?, window[1]?);
            (start <= at && at < end).then(|| (*phase, phase_progress(at, start, end)))
        })
}

/// Elapsed share of `[start, end)`. A zero-length span counts as finished.
#[must_use]
pub fn phase_progress(at: DateTime<Utc>, start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    let duration = (end - start).num_milliseconds();
    if duration <= 0 {
        return 1.0;
    }
    (at - start).num_milliseconds() as f64 / duration as f64
}

fn night_progress(at: DateTime<Utc>, times: &SolarTimes, location: &Location) -> f64 {
    let window = match (times.night_end, times.night) {
        (Some(end), _) if at < end => {
            solar_times(at - Duration::days(1), location.latitude, location.longitude)
                .night
                .map(|start| (start, end))
        }
        (_, Some(start)) if at >= start => {
            solar_times(at + Duration::days(1), location.latitude, location.longitude)
                .night_end
                .map(|end| (start, end))
        }
        _ => None,
    };
    window.map_or(0.0, |(start, end)| {
        phase_progress(at, start, end).clamp(0.0, 1.0)
    })
}
