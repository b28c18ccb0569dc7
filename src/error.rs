use std::path::PathBuf;

/// Errors surfaced by the detection core and its image collaborators.
///
/// A pipeline that runs to completion without finding a region is not an
/// error; see [`crate::DetectionResult::NotFound`].
#[derive(Debug, thiserror::Error)]
pub enum DetectError {
    /// The source image could not be read or decoded.
    #[error("failed to decode image {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The result image could not be written.
    #[error("failed to write image {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// A configuration value is out of range.
    #[error("invalid detector configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be read or parsed.
    #[error("failed to load configuration {path:?}: {message}")]
    ConfigFile { path: PathBuf, message: String },

    /// Detection was requested before any image was loaded.
    #[error("no image loaded")]
    NoImage,

    /// Anything that went wrong inside a pipeline stage.
    #[error("detection failed: {0}")]
    PipelineFailure(String),
}

pub type Result<T> = std::result::Result<T, DetectError>;
