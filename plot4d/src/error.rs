//! Module containing the universal error type
use thiserror::Error;

/// Universal error type for `plot4d`
#[derive(Error, Debug)]
pub enum Error {
    /// The sampling domain is malformed
    #[error("invalid domain: {0}")]
    InvalidDomain(String),

    /// The sampled function failed (or produced a non-finite value)
    #[error("evaluation failed at ({x}, {y}, {z}): {reason}")]
    Evaluation {
        /// X coordinate of the failing sample
        x: f64,
        /// Y coordinate of the failing sample
        y: f64,
        /// Z coordinate of the failing sample
        z: f64,
        /// Human-readable failure reason
        reason: String,
    },

    /// An animation was requested without any z-values
    #[error("empty z-value sequence; cannot build an animation")]
    EmptySequence,

    /// A color scale is malformed
    #[error("invalid color scale: {0}")]
    InvalidScale(String),

    /// Playback rate must be positive and finite
    #[error("invalid playback rate {0}; must be positive and finite")]
    InvalidRate(f64),

    /// A scatter plot was requested without any samples
    #[error("point cloud is empty")]
    EmptyPointCloud,

    /// A point sample is malformed
    #[error("invalid point cloud: {0}")]
    InvalidPointCloud(String),

    /// The plotting backend failed to draw
    #[error("render error: {0}")]
    RenderError(String),

    /// IO error; see inner code for details
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),

    /// Image codec or animation encoder error; see inner code for details
    #[error("image error: {0}")]
    ImageError(#[from] image::ImageError),

    /// Rhai error; see inner code for details
    #[cfg(feature = "rhai")]
    #[error("Rhai parse error: {0}")]
    RhaiParseError(#[from] ::rhai::ParseError),
}

impl<E> From<plotters::drawing::DrawingAreaErrorKind<E>> for Error
where
    E: std::error::Error + Send + Sync,
{
    fn from(e: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        Error::RenderError(e.to_string())
    }
}
