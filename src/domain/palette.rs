//! Temperature to colour lookup used for the orb's base hue.
//!
//! Entries sit every 10 °F. Anything between two entries is blended in RGB
//! space before the hue is extracted.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[must_use]
    pub fn mix(self, other: Rgb, t: f64) -> Rgb {
        let mix = |x: u8, y: u8| -> u8 {
            (f64::from(x) + (f64::from(y) - f64::from(x)) * t)
                .round()
                .clamp(0.0, 255.0) as u8
        };
        Rgb::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
        )
    }

    #[must_use]
    pub fn to_hsl(self) -> Hsl {
        let r = f64::from(self.r) / 255.0;
        let g = f64::from(self.g) / 255.0;
        let b = f64::from(self.b) / 255.0;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;
        let lightness = (max + min) / 2.0;

        if delta == 0.0 {
            return Hsl {
                hue: 0.0,
                saturation: 0.0,
                lightness,
            };
        }

        let sector = if max == r {
            (g - b) / delta
        } else if max == g {
            2.0 + (b - r) / delta
        } else {
            4.0 + (r - g) / delta
        };
        let hue = (sector * 60.0).rem_euclid(360.0);
        let saturation = if lightness <= 0.5 {
            delta / (max + min)
        } else {
            delta / (2.0 - max - min)
        };

        Hsl {
            hue,
            saturation,
            lightness,
        }
    }
}

/// Hue in degrees `[0, 360)`, saturation and lightness in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteEntry {
    pub temperature_f: i32,
    pub color: Rgb,
}

const fn entry(temperature_f: i32, r: u8, g: u8, b: u8) -> PaletteEntry {
    PaletteEntry {
        temperature_f,
        color: Rgb::new(r, g, b),
    }
}

pub const TEMPERATURE_PALETTE: &[PaletteEntry] = &[
    entry(-40, 0xba, 0x00, 0x99),
    entry(-30, 0xff, 0x00, 0xdd),
    entry(-20, 0xff, 0x46, 0xfd),
    entry(-10, 0xd5, 0xa8, 0xe4),
    entry(0, 0x2c, 0x00, 0x84),
    entry(10, 0x7f, 0x36, 0xfd),
    entry(20, 0x92, 0xb7, 0xfe),
    entry(30, 0x00, 0x9f, 0xff),
    entry(40, 0x00, 0xff, 0x88),
    entry(50, 0x00, 0xbc, 0x00),
    entry(60, 0xf1, 0xde, 0x00),
    entry(70, 0xed, 0x66, 0x00),
    entry(80, 0xb8, 0x00, 0x98),
    entry(90, 0xdb, 0x00, 0x00),
    entry(100, 0x7e, 0x00, 0x00),
];

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PaletteError {
    #[error("temperature {temperature}°F is outside the palette range")]
    OutOfRange { temperature: f64 },
}

#[must_use]
pub fn palette_color(temperature_f: i32) -> Option<Rgb> {
    TEMPERATURE_PALETTE
        .iter()
        .find_map(|entry| (entry.temperature_f == temperature_f).then_some(entry.color))
}

/// Colour for `temperature`, blended between the surrounding deciles.
pub fn color_for_temperature(temperature: f64) -> Result<Rgb, PaletteError> {
    let out_of_range = PaletteError::OutOfRange { temperature };
    if !temperature.is_finite() {
        return Err(out_of_range);
    }

    let floor = (temperature / 10.0).floor() * 10.0;
    let ceil = (temperature / 10.0).ceil() * 10.0;
    let low = palette_color(floor as i32).ok_or(out_of_range)?;
    let high = palette_color(ceil as i32).ok_or(out_of_range)?;

    Ok(low.mix(high, (temperature - floor) / 10.0))
}

/// Hue of the temperature colour, normalised to `[0, 1)`.
pub fn hue_for_temperature(temperature: f64) -> Result<f64, PaletteError> {
    let hsl = color_for_temperature(temperature)?.to_hsl();
    Ok((hsl.hue / 360.0).rem_euclid(1.0))
}
