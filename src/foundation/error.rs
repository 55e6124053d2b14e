/// Convenience result type used across Hilligoss.
pub type HilligossResult<T> = Result<T, HilligossError>;

/// Top-level error taxonomy for the boundary APIs.
///
/// The conversion core itself never fails; these errors come from building grids out of caller
/// buffers, validating parameters, decoding sources, and writing sinks.
#[derive(thiserror::Error, Debug)]
pub enum HilligossError {
    /// Invalid user-provided parameters or buffers.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while reading or decoding an input frame.
    #[error("decode error: {0}")]
    Decode(String),

    /// Errors while writing samples to an output.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HilligossError {
    /// Build a [`HilligossError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`HilligossError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`HilligossError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
