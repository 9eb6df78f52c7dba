/// Convenience result type used across the crate.
pub type DoodleResult<T> = Result<T, DoodleError>;

/// Top-level error taxonomy used by rendering and compositing APIs.
#[derive(thiserror::Error, Debug)]
pub enum DoodleError {
    /// Invalid caller-provided data (aspect ratio names, shape names, sizes).
    #[error("validation error: {0}")]
    Validation(String),

    /// Drawing surface or rasterization failures.
    #[error("render error: {0}")]
    Render(String),

    /// Font discovery or text shaping failures.
    #[error("font error: {0}")]
    Font(String),

    /// Image encoding failures.
    #[error("encode error: {0}")]
    Encode(String),

    /// Configuration loading or validation failures.
    #[error("config error: {0}")]
    Config(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DoodleError {
    /// Build a [`DoodleError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`DoodleError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`DoodleError::Font`] value.
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    /// Build a [`DoodleError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`DoodleError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
