/// Convenience result type used across framecomp.
pub type FrameResult<T> = Result<T, FrameError>;

/// Top-level error taxonomy used at the crate's boundaries.
///
/// Interactive geometry never produces errors (it is clamped instead), and asset failures
/// inside a render degrade to an omitted layer. These variants only surface when parsing
/// input, touching the filesystem, or encoding output.
#[derive(thiserror::Error, Debug)]
pub enum FrameError {
    /// Invalid user-provided layout or scene data.
    #[error("validation error: {0}")]
    Validation(String),

    /// An asset could not be read or decoded.
    #[error("asset error: {0}")]
    Asset(String),

    /// Errors raised by the raster backend or output encoding.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FrameError {
    /// Build a [`FrameError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FrameError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`FrameError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`FrameError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
