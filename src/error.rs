// One error type for the whole crate.
// Every variant states *where* things went wrong.

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("window init error: {0}")]
    WindowInit(String),
    #[error("window update error: {0}")]
    WindowUpdate(String),
    #[error("invalid surface dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    #[error("could not allocate a {width}x{height} intensity field")]
    Allocation { width: usize, height: usize },
    #[error("{name} = {value} is outside [{min}, {max}]")]
    InvalidParam {
        name: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("pointer position ({x}, {y}) is not finite")]
    NonFinitePosition { x: f32, y: f32 },
    #[error("failed to encode image: {0}")]
    Encode(#[from] image::ImageError),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
