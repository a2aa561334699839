//! Crate-level error types.

use std::fmt;

use crate::gpu::render_context::RenderContextError;

/// Errors produced by the hexglobe crate.
#[derive(Debug)]
pub enum GlobeError {
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// Failed to retrieve a remote or local asset.
    Fetch(String),
    /// Point data was structurally unusable (missing column, bad record).
    Data(String),
    /// Failed to decode a texture image.
    Texture(String),
    /// WGSL shader composition failure.
    Shader(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML/JSON options parsing/serialization failure.
    OptionsParse(String),
    /// Viewer event-loop failure.
    Viewer(String),
    /// Browser API failure (stringified JS exception).
    Platform(String),
}

impl fmt::Display for GlobeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::Fetch(msg) => write!(f, "fetch error: {msg}"),
            Self::Data(msg) => write!(f, "point data error: {msg}"),
            Self::Texture(msg) => write!(f, "texture error: {msg}"),
            Self::Shader(msg) => write!(f, "shader error: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
            Self::Platform(msg) => write!(f, "platform error: {msg}"),
        }
    }
}

impl std::error::Error for GlobeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderContextError> for GlobeError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<std::io::Error> for GlobeError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<csv::Error> for GlobeError {
    fn from(e: csv::Error) -> Self {
        Self::Data(e.to_string())
    }
}

impl From<image::ImageError> for GlobeError {
    fn from(e: image::ImageError) -> Self {
        Self::Texture(e.to_string())
    }
}
