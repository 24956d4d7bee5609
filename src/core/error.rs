//! Error types for Tussock

use thiserror::Error;

/// Main error type for the crate
#[derive(Debug, Error)]
pub enum Error {
    #[error("deviation bounds unsatisfiable: base={base}, upper={upper}, lower={lower}")]
    DeviationUnsatisfiable { base: f32, upper: f32, lower: f32 },

    #[error("no drawing surface available")]
    MissingSurface,

    #[error("no frame scheduler available")]
    MissingScheduler,

    #[error("invalid surface size {width}x{height}")]
    SurfaceSize { width: u32, height: u32 },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
