//! Solar event times for a date and location.
//!
//! Low-precision solar position formulas (Julian cycle, solar transit and
//! hour angle at fixed sun altitudes). Accurate to roughly a minute outside
//! polar regions, which is plenty for choosing a lighting phase.

use std::f64::consts::PI;

use chrono::{DateTime, Utc};
use serde::Serialize;

const RAD: f64 = PI / 180.0;
const DAY_MS: f64 = 1000.0 * 60.0 * 60.0 * 24.0;
const J1970: f64 = 2_440_588.0;
const J2000: f64 = 2_451_545.0;
const J0: f64 = 0.0009;
const OBLIQUITY: f64 = RAD * 23.4397;

const SUNRISE_ALTITUDE: f64 = -0.833;
const SUNRISE_END_ALTITUDE: f64 = -0.3;
const CIVIL_ALTITUDE: f64 = -6.0;
const NAUTICAL_ALTITUDE: f64 = -12.0;
const ASTRONOMICAL_ALTITUDE: f64 = -18.0;
const GOLDEN_HOUR_ALTITUDE: f64 = 6.0;

/// `None` marks an event the sun never reaches on that date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolarTimes {
    pub solar_noon: Option<DateTime<Utc>>,
    pub nadir: Option<DateTime<Utc>>,
    pub night_end: Option<DateTime<Utc>>,
    pub nautical_dawn: Option<DateTime<Utc>>,
    pub dawn: Option<DateTime<Utc>>,
    pub sunrise: Option<DateTime<Utc>>,
    pub sunrise_end: Option<DateTime<Utc>>,
    pub golden_hour_end: Option<DateTime<Utc>>,
    pub golden_hour: Option<DateTime<Utc>>,
    pub sunset_start: Option<DateTime<Utc>>,
    pub sunset: Option<DateTime<Utc>>,
    pub dusk: Option<DateTime<Utc>>,
    pub nautical_dusk: Option<DateTime<Utc>>,
    pub night: Option<DateTime<Utc>>,
}

impl SolarTimes {
    /// The eleven boundaries used for phase classification, in day order.
    #[must_use]
    pub fn phase_boundaries(&self) -> [Option<DateTime<Utc>>; 11] {
        [
            self.night_end,
            self.dawn,
            self.sunrise,
            self.sunrise_end,
            self.golden_hour_end,
            self.solar_noon,
            self.golden_hour,
            self.sunset_start,
            self.sunset,
            self.dusk,
            self.night,
        ]
    }
}

struct SolarDay {
    lw: f64,
    phi: f64,
    n: f64,
    m: f64,
    l: f64,
    dec: f64,
    j_noon: f64,
}

impl SolarDay {
    fn new(at: DateTime<Utc>, latitude: f64, longitude: f64) -> Self {
        let lw = RAD * -longitude;
        let phi = RAD * latitude;
        let d = to_days(at);
        let n = julian_cycle(d, lw);
        let ds = approx_transit(0.0, lw, n);
        let m = solar_mean_anomaly(ds);
        let l = ecliptic_longitude(m);
        let dec = declination(l);
        let j_noon = solar_transit_j(ds, m, l);
        Self {
            lw,
            phi,
            n,
            m,
            l,
            dec,
            j_noon,
        }
    }

    fn rise_and_set(&self, altitude_deg: f64) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
        let Some(w) = hour_angle(altitude_deg * RAD, self.phi, self.dec) else {
            return (None, None);
        };
        let a = approx_transit(w, self.lw, self.n);
        let j_set = solar_transit_j(a, self.m, self.l);
        let j_rise = self.j_noon - (j_set - self.j_noon);
        (from_julian(j_rise), from_julian(j_set))
    }
}

#[must_use]
pub fn solar_times(at: DateTime<Utc>, latitude: f64, longitude: f64) -> SolarTimes {
    let day = SolarDay::new(at, latitude, longitude);
    let (sunrise, sunset) = day.rise_and_set(SUNRISE_ALTITUDE);
    let (sunrise_end, sunset_start) = day.rise_and_set(SUNRISE_END_ALTITUDE);
    let (dawn, dusk) = day.rise_and_set(CIVIL_ALTITUDE);
    let (nautical_dawn, nautical_dusk) = day.rise_and_set(NAUTICAL_ALTITUDE);
    let (night_end, night) = day.rise_and_set(ASTRONOMICAL_ALTITUDE);
    let (golden_hour_end, golden_hour) = day.rise_and_set(GOLDEN_HOUR_ALTITUDE);

    SolarTimes {
        solar_noon: from_julian(day.j_noon),
        nadir: from_julian(day.j_noon - 0.5),
        night_end,
        nautical_dawn,
        dawn,
        sunrise,
        sunrise_end,
        golden_hour_end,
        golden_hour,
        sunset_start,
        sunset,
        dusk,
        nautical_dusk,
        night,
    }
}

fn to_julian(at: DateTime<Utc>) -> f64 {
    at.timestamp_millis() as f64 / DAY_MS - 0.5 + J1970
}

fn from_julian(j: f64) -> Option<DateTime<Utc>> {
    if !j.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis(((j + 0.5 - J1970) * DAY_MS) as i64)
}

fn to_days(at: DateTime<Utc>) -> f64 {
    to_julian(at) - J2000
}

fn declination(l: f64) -> f64 {
    (OBLIQUITY.sin() * l.sin()).asin()
}

fn solar_mean_anomaly(d: f64) -> f64 {
    RAD * (357.5291 + 0.985_600_28 * d)
}

fn ecliptic_longitude(m: f64) -> f64 {
    let center = RAD * (1.9148 * m.sin() + 0.02 * (2.0 * m).sin() + 0.0003 * (3.0 * m).sin());
    let perihelion = RAD * 102.9372;
    m + center + perihelion + PI
}

fn julian_cycle(d: f64, lw: f64) -> f64 {
    (d - J0 - lw / (2.0 * PI)).round()
}

fn approx_transit(ht: f64, lw: f64, n: f64) -> f64 {
    J0 + (ht + lw) / (2.0 * PI) + n
}

fn solar_transit_j(ds: f64, m: f64, l: f64) -> f64 {
    J2000 + ds + 0.0053 * m.sin() - 0.0069 * (2.0 * l).sin()
}

fn hour_angle(h: f64, phi: f64, dec: f64) -> Option<f64> {
    let cos_w = (h.sin() - phi.sin() * dec.sin()) / (phi.cos() * dec.cos());
    let w = cos_w.acos();
    w.is_finite().then_some(w)
}
