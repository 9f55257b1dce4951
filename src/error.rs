use thiserror::Error;

/// Everything that can go wrong in the profile/reviews core.
///
/// Validation and not-found errors are synchronous and happen before any
/// state is touched. Storage and serialization errors come out of the
/// record store; callers decide whether they are fatal (the explicit
/// profile save) or logged and swallowed (loads and background saves).
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid {field}: {message}")]
    Validation {
        field: &'static str,
        message: &'static str,
    },

    #[error("no review with id {id}")]
    NotFound { id: i64 },

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn missing(field: &'static str) -> Self {
        Error::Validation {
            field,
            message: "must not be empty",
        }
    }
}
