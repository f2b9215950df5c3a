/// Convenience result type used across strokepose.
pub type StrokeposeResult<T> = Result<T, StrokeposeError>;

/// Top-level error taxonomy used by pipeline APIs.
#[derive(thiserror::Error, Debug)]
pub enum StrokeposeError {
    /// Invalid configuration or malformed input (including vector dimension mismatches).
    #[error("validation error: {0}")]
    Validation(String),

    /// Catalog loading, alignment, or index range failures.
    #[error("catalog error: {0}")]
    Catalog(String),

    /// Failures reported by the external stroke encoder or pose decoder.
    #[error("model error: {0}")]
    Model(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StrokeposeError {
    /// Build a [`StrokeposeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`StrokeposeError::Catalog`] value.
    pub fn catalog(msg: impl Into<String>) -> Self {
        Self::Catalog(msg.into())
    }

    /// Build a [`StrokeposeError::Model`] value.
    pub fn model(msg: impl Into<String>) -> Self {
        Self::Model(msg.into())
    }

    /// Build a [`StrokeposeError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for StrokeposeError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
