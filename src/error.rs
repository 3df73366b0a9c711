use std::error;

/// The error type for identifier construction, conversion, and decoding.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A malformed string, a byte buffer of the wrong length, non-hex or
    /// non-decimal input, or an out-of-range node or clock-sequence value.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An accessor was invoked on an identifier whose version does not
    /// define the requested field.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(&'static str),

    /// The dispatcher could not classify a 16-byte buffer for a reason other
    /// than simple length or format problems.
    #[error("unable to build identifier")]
    UnableToBuild {
        #[source]
        source: Box<Error>,
    },

    /// A failure reported by an injected random, time, or node collaborator,
    /// propagated verbatim.
    #[error("collaborator failure")]
    Collaborator(#[source] Box<dyn error::Error + Send + Sync>),
}

impl Error {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Error::InvalidArgument(message.into())
    }

    pub(crate) fn unable_to_build(cause: Error) -> Self {
        Error::UnableToBuild {
            source: Box::new(cause),
        }
    }
}
