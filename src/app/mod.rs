pub mod refresh;
pub mod render;
pub mod settings;
