pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A malformed edge-list line. `line` is 1-based.
    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("graph has no edges; spectral analysis needs at least one node")]
    EmptyGraph,

    #[error("decomposition failed: {message}")]
    Decomposition { message: String },

    #[error("invariant violated: {message}")]
    InvariantViolation { message: String },
}

impl Error {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    pub fn decomposition(message: impl Into<String>) -> Self {
        Self::Decomposition {
            message: message.into(),
        }
    }

    pub(crate) fn invariant(message: impl Into<String>) -> Self {
        Self::InvariantViolation {
            message: message.into(),
        }
    }
}
