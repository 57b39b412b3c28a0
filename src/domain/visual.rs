//! Weather metrics to shader parameters.

use serde::Serialize;

use super::{
    daylight::{DayPhase, PhaseReading},
    interpolate::{lerp, progress_between},
    palette::{PaletteError, hue_for_temperature},
    weather::WeatherSnapshot,
};

/// Background HSL lightness for a perfectly clear sky.
pub const CLEAR_SKY_LIGHTNESS: f64 = 95.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VisualParameters {
    pub hue_angle: f64,
    pub saturation: f64,
    pub daylight_value: f64,
    pub precip_intensity: f64,
    pub noise_multiplier: f64,
    pub wind_speed: f64,
    pub background_lightness: u8,
    pub phase: DayPhase,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Turbulence {
    pub precip_intensity: f64,
    pub noise_multiplier: f64,
}

impl Turbulence {
    const fn calm(precip_intensity: f64) -> Self {
        Self {
            precip_intensity,
            noise_multiplier: 1.0,
        }
    }
}

pub fn map_weather(
    snapshot: &WeatherSnapshot,
    reading: &PhaseReading,
) -> Result<VisualParameters, PaletteError> {
    let hue_angle = hue_for_temperature(snapshot.temperature)?;
    let turbulence = precipitation_turbulence(snapshot.precip_intensity);

    Ok(VisualParameters {
        hue_angle,
        saturation: reading.daylight.saturation,
        daylight_value: reading.daylight.daylight_value,
        precip_intensity: turbulence.precip_intensity,
        noise_multiplier: turbulence.noise_multiplier,
        wind_speed: wind_frequency(snapshot.wind_speed),
        background_lightness: background_lightness(snapshot.cloud_cover),
        phase: reading.phase,
    })
}

/// HSL lightness percentage for the backdrop; overcast is darkest.
#[must_use]
pub fn background_lightness(cloud_cover: f64) -> u8 {
    // 95 - c*95 rather than (1 - c)*95 so 0.9 lands on 9.5 exactly.
    (CLEAR_SKY_LIGHTNESS - cloud_cover * CLEAR_SKY_LIGHTNESS)
        .round()
        .clamp(0.0, CLEAR_SKY_LIGHTNESS) as u8
}

/// Intensity in inches per hour. Unbounded past 0.2 in/h.
#[must_use]
pub fn precipitation_turbulence(intensity: f64) -> Turbulence {
    if intensity == 0.0 {
        Turbulence::calm(1.0)
    } else if intensity < 0.03 {
        Turbulence::calm(lerp(2.8, 3.0, progress_between(0.0, 0.03, intensity)))
    } else if intensity < 0.1 {
        Turbulence::calm(lerp(3.0, 4.0, progress_between(0.03, 0.1, intensity)))
    } else if intensity < 0.2 {
        let progress = progress_between(0.1, 0.2, intensity);
        Turbulence {
            precip_intensity: lerp(3.0, 3.5, progress),
            noise_multiplier: lerp(1.5, 2.0, progress),
        }
    } else {
        let scale = intensity / 0.2;
        Turbulence {
            precip_intensity: 3.5 * scale,
            noise_multiplier: 2.0 * scale,
        }
    }
}

/// Speed in mph to noise time-frequency. Unbounded past 30 mph.
#[must_use]
pub fn wind_frequency(speed: f64) -> f64 {
    const BANDS: [(f64, f64, f64, f64); 4] = [
        (0.0, 5.0, 0.0, 0.25),
        (5.0, 10.0, 0.25, 0.45),
        (10.0, 20.0, 0.45, 1.0),
        (20.0, 30.0, 1.0, 2.5),
    ];

    BANDS
        .iter()
        .find(|(_, max, _, _)| speed < *max)
        .map_or(3.5 * (speed / 30.0), |(min, max, from, to)| {
            lerp(*from, *to, progress_between(*min, *max, speed))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{domain::daylight::Daylight, test_support::sample_snapshot};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    fn night_reading() -> PhaseReading {
        PhaseReading {
            phase: DayPhase::Night,
            progress: 0.0,
            daylight: Daylight::new(2.5, 0.2),
        }
    }

    #[test]
    fn chilly_overcast_scenario() {
        let params = map_weather(&sample_snapshot(), &night_reading()).expect("in range");

        assert_eq!(params.precip_intensity, 1.0);
        assert_eq!(params.noise_multiplier, 1.0);
        assert!((params.wind_speed - 0.1745).abs() < 1e-3);
        assert_eq!(params.background_lightness, 10);
        assert_eq!(params.daylight_value, 2.5);
        assert_eq!(params.saturation, 0.2);
        assert_eq!(params.phase, DayPhase::Night);
    }

    #[test]
    fn moderate_rain_scales_noise_with_intensity() {
        let turbulence = precipitation_turbulence(0.15);
        assert!(close(turbulence.precip_intensity, 3.25));
        assert!(close(turbulence.noise_multiplier, 1.75));
    }

    #[test]
    fn precipitation_branches() {
        assert!(close(precipitation_turbulence(0.015).precip_intensity, 2.9));
        assert!(close(precipitation_turbulence(0.065).precip_intensity, 3.5));
        let heavy = precipitation_turbulence(0.4);
        assert!(close(heavy.precip_intensity, 7.0));
        assert!(close(heavy.noise_multiplier, 4.0));
    }

    #[test]
    fn precipitation_is_continuous_at_shared_boundaries() {
        let eps = 1e-9;
        for boundary in [0.03, 0.2] {
            let below = precipitation_turbulence(boundary - eps);
            let above = precipitation_turbulence(boundary);
            assert!(
                (below.precip_intensity - above.precip_intensity).abs() < 1e-4,
                "precip jump at {boundary}"
            );
        }
        let below = precipitation_turbulence(0.2 - eps);
        let above = precipitation_turbulence(0.2);
        assert!((below.noise_multiplier - above.noise_multiplier).abs() < 1e-4);
    }

    #[test]
    fn light_precipitation_jumps_from_calm() {
        assert_eq!(precipitation_turbulence(0.0).precip_intensity, 1.0);
        assert!(precipitation_turbulence(1e-6).precip_intensity > 2.79);
    }

    #[test]
    fn wind_bands() {
        assert_eq!(wind_frequency(0.0), 0.0);
        assert!(close(wind_frequency(7.5), 0.35));
        assert!(close(wind_frequency(15.0), 0.725));
        assert!(close(wind_frequency(25.0), 1.75));
        assert!(close(wind_frequency(30.0), 3.5));
        assert!(close(wind_frequency(60.0), 7.0));
    }

    #[test]
    fn wind_is_continuous_at_shared_boundaries() {
        for boundary in [5.0, 10.0, 20.0] {
            let below = wind_frequency(boundary - 1e-9);
            let above = wind_frequency(boundary);
            assert!((below - above).abs() < 1e-6, "wind jump at {boundary}");
        }
    }

    #[test]
    fn background_lightness_endpoints() {
        assert_eq!(background_lightness(0.0), 95);
        assert_eq!(background_lightness(1.0), 0);
        assert_eq!(background_lightness(0.5), 48);
    }

    #[test]
    fn out_of_range_temperature_surfaces() {
        let snapshot = WeatherSnapshot {
            temperature: 104.0,
            cloud_cover: 0.0,
            precip_intensity: 0.0,
            wind_speed: 0.0,
        };
        assert_eq!(
            map_weather(&snapshot, &night_reading()),
            Err(PaletteError::OutOfRange { temperature: 104.0 })
        );
    }
}
