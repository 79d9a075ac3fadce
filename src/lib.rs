mod accumulator;
mod brush;
mod cadence;
mod color;
mod config;
mod engine;
mod error;
mod field;
mod renderer;
mod types;

pub mod export;

pub use accumulator::Accumulator;
pub use brush::Brush;
pub use cadence::{FrameStats, RenderLoop};
pub use color::{heat_hue, heat_rgba, hsl_to_rgb};
pub use config::{
    Config, INTENSITY_MAX, INTENSITY_MIN, INTENSITY_SCALE, Params, RADIUS_MAX, RADIUS_MIN,
};
pub use engine::HeatmapEngine;
pub use error::Error;
pub use field::IntensityField;
pub use renderer::{Renderer, composite_over};
pub use types::{FrameBuffer, Position};
