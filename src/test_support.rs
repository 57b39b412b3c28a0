use crate::domain::{
    daylight::DayPhase,
    visual::VisualParameters,
    weather::{Location, WeatherSnapshot},
};

pub(crate) fn iowa_city() -> Location {
    Location::from_coords(41.6734, -91.75705)
}

pub(crate) fn sample_snapshot() -> WeatherSnapshot {
    WeatherSnapshot {
        temperature: 35.54,
        cloud_cover: 0.9,
        precip_intensity: 0.0,
        wind_speed: 3.49,
    }
}

pub(crate) fn sample_parameters() -> VisualParameters {
    VisualParameters {
        hue_angle: 0.48,
        saturation: 0.7,
        daylight_value: 1.2,
        precip_intensity: 1.0,
        noise_multiplier: 1.0,
        wind_speed: 0.174,
        background_lightness: 10,
        phase: DayPhase::GoldenHourMorning,
    }
}
