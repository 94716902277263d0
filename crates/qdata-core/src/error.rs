//! Error type shared by every qdata crate.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataError {
    /// Requested or inferred shape is not a pair of positive extents.
    #[error("shape must be a 2-tuple of positive ints, got {0:?}")]
    InvalidShape(Vec<isize>),

    #[error("invalid shape {shape:?} for input data with size {size}")]
    ShapeSizeMismatch { shape: (usize, usize), size: usize },

    /// Operands of a binary kernel disagree on shape.
    #[error("incompatible shapes {left:?} and {right:?}")]
    ShapeMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },

    #[error("matrix of shape {0:?} is not square")]
    NotSquare((usize, usize)),

    #[error("invalid sparse structure: {0}")]
    InvalidStructure(&'static str),

    #[error("index {index} out of bounds for dimension {bound}")]
    IndexOutOfBounds { index: i64, bound: usize },

    #[error("value {0} does not fit in the index dtype")]
    IndexOverflow(usize),
}

pub type Result<T> = std::result::Result<T, DataError>;
