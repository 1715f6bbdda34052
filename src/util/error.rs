//! Error types for detpost.

use thiserror::Error;

/// Result alias for detpost operations.
pub type DetPostResult<T> = std::result::Result<T, DetPostError>;

/// Errors that can occur when post-processing detector output.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DetPostError {
    /// A tensor was described with impossible dimensions.
    #[error("invalid tensor dimensions: {rows}x{cols}")]
    InvalidDimensions {
        /// Requested row count.
        rows: usize,
        /// Requested row length.
        cols: usize,
    },
    /// A row stride smaller than the row length was requested.
    #[error("row stride {stride} is smaller than row length {cols}")]
    InvalidStride {
        /// Requested row length.
        cols: usize,
        /// Requested stride.
        stride: usize,
    },
    /// The backing buffer is too short for the described tensor.
    #[error("buffer too small: needed {needed} elements, got {got}")]
    BufferTooSmall {
        /// Minimum number of elements required.
        needed: usize,
        /// Number of elements provided.
        got: usize,
    },
    /// The prediction tensor does not have one row per anchor.
    #[error("prediction rows ({rows}) do not match anchor count ({anchors})")]
    AnchorCountMismatch {
        /// Number of anchors enumerated for the padded canvas.
        anchors: usize,
        /// Number of rows in the prediction tensor.
        rows: usize,
    },
    /// A prediction row does not hold the expected number of values.
    #[error("prediction row length mismatch: expected {expected}, got {got}")]
    RowLengthMismatch {
        /// Expected row length (`4 * reg_max + num_classes`).
        expected: usize,
        /// Actual row length.
        got: usize,
    },
    /// A class logit was NaN or infinite, indicating corrupted input.
    #[error("non-finite class score at row {row}")]
    NonFiniteScore {
        /// Tensor row holding the offending logit.
        row: usize,
    },
    /// The pipeline configuration is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}
