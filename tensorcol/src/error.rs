use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Type mismatch: {0}")]
    TypeMismatch(String),

    #[error("Shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    #[error("Index {index} is out of bounds for length {len}")]
    IndexError { index: isize, len: usize },

    #[error("Invalid indexer: {0}")]
    InvalidIndexer(String),

    #[error("Unsupported key: {0}")]
    UnsupportedKey(String),

    #[error("Not implemented: {0}")]
    NotImplemented(String),

    #[error("dtype {0} cannot represent a missing value")]
    NoMissingValue(&'static str),

    #[error("Need at least one column to concatenate")]
    EmptyConcat,

    #[error("Integer division by zero")]
    DivisionByZero,

    #[cfg(feature = "serde")]
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    pub(crate) fn shape_mismatch(expected: &[usize], actual: &[usize]) -> Self {
        Error::ShapeMismatch {
            expected: expected.to_vec(),
            actual: actual.to_vec(),
        }
    }

    pub(crate) fn out_of_bounds(index: usize, len: usize) -> Self {
        Error::IndexError {
            index: index as isize,
            len,
        }
    }
}

#[cfg(feature = "serde")]
impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error::Serialization(value.to_string())
    }
}
