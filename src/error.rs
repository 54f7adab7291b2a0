use thiserror::Error;

use crate::media::ImageError;

pub type Result<T> = std::result::Result<T, FieldMarkError>;

#[derive(Debug, Error)]
pub enum FieldMarkError {
    #[error("missing fields for turn: expected {expected:?} but got {actual:?}")]
    MissingField {
        expected: Vec<String>,
        actual: Vec<String>,
    },
    #[error("completion fields mismatch: expected {expected:?} but got {actual:?}")]
    Parse {
        expected: Vec<String>,
        actual: Vec<String>,
    },
    #[error("failed to encode image for field `{field}`: {source}")]
    ImageEncode {
        field: String,
        #[source]
        source: ImageError,
    },
    #[error("configuration error: {0}")]
    Config(String),
}
