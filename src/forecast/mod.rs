pub mod fields;
pub mod normalize;
pub mod visualcrossing;

pub use normalize::{normalize, WeatherRecord};
