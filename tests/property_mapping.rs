use proptest::prelude::*;
use weather_orb::domain::{
    palette::{color_for_temperature, hue_for_temperature, palette_color},
    visual::{background_lightness, precipitation_turbulence, wind_frequency},
};

proptest! {
    #[test]
    fn hue_stays_in_unit_range(temperature in -40.0f64..=100.0) {
        let hue = hue_for_temperature(temperature).expect("mapped temperature");
        prop_assert!((0.0..1.0).contains(&hue));
    }

    #[test]
    fn blended_color_lies_between_neighbouring_deciles(temperature in -40.0f64..=100.0) {
        let floor = (temperature / 10.0).floor() * 10.0;
        let ceil = (temperature / 10.0).ceil() * 10.0;
        let low = palette_color(floor as i32).expect("decile entry");
        let high = palette_color(ceil as i32).expect("decile entry");
        let blended = color_for_temperature(temperature).expect("mapped temperature");

        for (channel, a, b) in [
            (blended.r, low.r, high.r),
            (blended.g, low.g, high.g),
            (blended.b, low.b, high.b),
        ] {
            prop_assert!(a.min(b) <= channel && channel <= a.max(b));
        }
    }

    #[test]
    fn out_of_range_temperatures_are_rejected(temperature in prop_oneof![-500.0f64..-40.01, 100.01f64..500.0]) {
        prop_assert!(hue_for_temperature(temperature).is_err());
    }

    #[test]
    fn background_darkens_as_clouds_thicken(a in 0.0f64..=1.0, b in 0.0f64..=1.0) {
        let (thin, thick) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(background_lightness(thin) >= background_lightness(thick));
        prop_assert!(background_lightness(thick) <= 95);
    }

    #[test]
    fn wind_frequency_never_decreases_below_thirty(a in 0.0f64..30.0, b in 0.0f64..30.0) {
        let (slow, fast) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(wind_frequency(slow) <= wind_frequency(fast) + 1e-12);
        prop_assert!(wind_frequency(fast) <= 2.5);
    }

    #[test]
    fn turbulence_is_positive(intensity in 0.0f64..2.0) {
        let turbulence = precipitation_turbulence(intensity);
        prop_assert!(turbulence.precip_intensity >= 1.0);
        prop_assert!(turbulence.noise_multiplier >= 1.0);
    }
}
