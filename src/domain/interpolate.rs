#[must_use]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Fraction of the way `current` sits between `min` and `max`. Not clamped.
#[must_use]
pub fn progress_between(min: f64, max: f64, current: f64) -> f64 {
    (current - min) / (max - min)
}

#[must_use]
pub fn cubic_in(t: f64) -> f64 {
    t * t * t
}

#[must_use]
pub fn cubic_out(t: f64) -> f64 {
    let f = t - 1.0;
    f * f * f + 1.0
}
