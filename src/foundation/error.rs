/// Crate-wide result alias.
pub type SnapstripResult<T> = Result<T, SnapstripError>;

/// Errors produced while preparing, composing or exporting a collage.
#[derive(thiserror::Error, Debug)]
pub enum SnapstripError {
    /// Invalid configuration, filter text or caller input.
    #[error("validation error: {0}")]
    Validation(String),

    /// One photo of the sequence could not be decoded.
    #[error("decode error: photo {index}: {message}")]
    Decode {
        /// Capture-order index of the failing photo.
        index: usize,
        /// Decoder message.
        message: String,
    },

    /// Surface sizing or rasterization failure.
    #[error("render error: {0}")]
    Render(String),

    /// Final image encoding failure.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped I/O or third-party error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SnapstripError {
    /// Build a [`SnapstripError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SnapstripError::Decode`] for photo `index`.
    pub fn decode(index: usize, msg: impl Into<String>) -> Self {
        Self::Decode {
            index,
            message: msg.into(),
        }
    }

    /// Build a [`SnapstripError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`SnapstripError::Encode`].
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
