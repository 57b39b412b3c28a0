pub mod daylight;
pub mod interpolate;
pub mod palette;
pub mod solar;
pub mod visual;
pub mod weather;
