/// Convenience result type used across backdrop.
pub type BackdropResult<T> = Result<T, BackdropError>;

/// Top-level error taxonomy used by the library APIs.
#[derive(thiserror::Error, Debug)]
pub enum BackdropError {
    /// Invalid user-provided data (surface sizes, CLI arguments).
    #[error("validation error: {0}")]
    Validation(String),

    /// An option could not be read or assigned (unknown name, wrong value type).
    #[error("config error: {0}")]
    Config(String),

    /// The target surface or its 2D drawing context is not available.
    #[error("missing surface: {0}")]
    MissingSurface(String),

    /// Errors raised by a drawing target while rasterizing or presenting a frame.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BackdropError {
    /// Build a [`BackdropError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BackdropError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`BackdropError::MissingSurface`] value.
    pub fn missing_surface(msg: impl Into<String>) -> Self {
        Self::MissingSurface(msg.into())
    }

    /// Build a [`BackdropError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`BackdropError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
