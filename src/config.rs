// Brush parameters (live, host-controlled) and startup configuration.

use std::path::PathBuf;

use crate::error::Error;
use crate::export::DEFAULT_FILE_NAME;

pub const INTENSITY_MIN: u32 = 1;
pub const INTENSITY_MAX: u32 = 100;
pub const RADIUS_MIN: u32 = 5;
pub const RADIUS_MAX: u32 = 100;

/// Slider intensity is divided by this before it is deposited.
/// At the top of the slider a single dab adds at most 0.1 heat.
pub const INTENSITY_SCALE: f32 = 1000.0;

/// Brush parameters. Always within range: the only way in is `Params::new`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Params {
    intensity: u32,
    radius: u32,
}

impl Params {
    pub fn new(intensity: u32, radius: u32) -> Result<Self, Error> {
        check_range("intensity", intensity, INTENSITY_MIN, INTENSITY_MAX)?;
        check_range("radius", radius, RADIUS_MIN, RADIUS_MAX)?;
        Ok(Self { intensity, radius })
    }

    pub fn intensity(&self) -> u32 {
        self.intensity
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// Heat added at the brush center per dab.
    pub fn intensity_factor(&self) -> f32 {
        self.intensity as f32 / INTENSITY_SCALE
    }

    /// Falloff radius in pixels.
    pub fn radius_px(&self) -> f32 {
        self.radius as f32
    }

    /// Step intensity by `delta`, clamped to the valid range.
    pub fn nudge_intensity(self, delta: i32) -> Self {
        Self {
            intensity: nudge(self.intensity, delta, INTENSITY_MIN, INTENSITY_MAX),
            ..self
        }
    }

    /// Step radius by `delta`, clamped to the valid range.
    pub fn nudge_radius(self, delta: i32) -> Self {
        Self {
            radius: nudge(self.radius, delta, RADIUS_MIN, RADIUS_MAX),
            ..self
        }
    }
}

impl Default for Params {
    fn default() -> Self {
        Self {
            intensity: 50,
            radius: 25,
        }
    }
}

fn check_range(name: &'static str, value: u32, min: u32, max: u32) -> Result<(), Error> {
    if value < min || value > max {
        return Err(Error::InvalidParam {
            name,
            value,
            min,
            max,
        });
    }
    Ok(())
}

fn nudge(value: u32, delta: i32, min: u32, max: u32) -> u32 {
    (value as i64 + delta as i64).clamp(min as i64, max as i64) as u32
}

/// Startup configuration for the window host.
#[derive(Debug, Clone)]
pub struct Config {
    pub width: usize,
    pub height: usize,
    /// Render loop rate (frames per second).
    pub fps: u32,
    pub params: Params,
    /// Page color the heat overlay is composited onto, `0x00RRGGBB`.
    pub background: u32,
    pub export_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            fps: 60,
            params: Params::default(),
            background: 0x00_FF_FF_FF,
            export_path: PathBuf::from(DEFAULT_FILE_NAME),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), Error> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.fps == 0 || self.fps > 1000 {
            return Err(Error::InvalidConfig(format!(
                "fps must be in [1, 1000], got {}",
                self.fps
            )));
        }
        if self.background > 0x00_FF_FF_FF {
            return Err(Error::InvalidConfig(format!(
                "background {:#010x} is not a 0x00RRGGBB color",
                self.background
            )));
        }
        if self.export_path.as_os_str().is_empty() {
            return Err(Error::InvalidConfig("export path is empty".into()));
        }
        Ok(())
    }
}
