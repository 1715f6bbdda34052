//! Borrowed views over raw prediction tensors.
//!
//! `TensorView` is a borrowed 2D row-major view into a flat `f32` buffer
//! with an explicit stride. The stride counts elements between the starts of
//! consecutive rows, so engines that pad their output rows can be viewed
//! without copying. A view with zero rows is legal and describes the empty
//! tensor a detector produces for a degenerate input.

use crate::util::{DetPostError, DetPostResult};

/// Borrowed 2D `f32` tensor view with an explicit row stride.
#[derive(Copy, Clone)]
pub struct TensorView<'a> {
    data: &'a [f32],
    rows: usize,
    cols: usize,
    stride: usize,
}

impl<'a> TensorView<'a> {
    /// Creates a contiguous view with `stride == cols`.
    pub fn from_slice(data: &'a [f32], rows: usize, cols: usize) -> DetPostResult<Self> {
        Self::new(data, rows, cols, cols)
    }

    /// Creates a view with an explicit stride.
    ///
    /// `rows == 0` is accepted; `cols == 0` is rejected because a prediction
    /// row always carries at least one value.
    pub fn new(data: &'a [f32], rows: usize, cols: usize, stride: usize) -> DetPostResult<Self> {
        if cols == 0 {
            return Err(DetPostError::InvalidDimensions { rows, cols });
        }
        if stride < cols {
            return Err(DetPostError::InvalidStride { cols, stride });
        }
        if rows > 0 {
            let needed = (rows - 1)
                .checked_mul(stride)
                .and_then(|v| v.checked_add(cols))
                .ok_or(DetPostError::InvalidDimensions { rows, cols })?;
            if data.len() < needed {
                return Err(DetPostError::BufferTooSmall {
                    needed,
                    got: data.len(),
                });
            }
        }
        Ok(Self {
            data,
            rows,
            cols,
            stride,
        })
    }

    /// Returns the number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the dense row length.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the stride in elements between row starts.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the backing slice including any row padding.
    pub fn as_slice(&self) -> &'a [f32] {
        self.data
    }

    /// Returns the dense slice for row `i` with length `cols`.
    pub fn row(&self, i: usize) -> Option<&'a [f32]> {
        if i >= self.rows {
            return None;
        }
        let start = i.checked_mul(self.stride)?;
        let end = start.checked_add(self.cols)?;
        self.data.get(start..end)
    }

    /// Iterates the dense rows in order.
    pub fn rows_iter(&self) -> impl Iterator<Item = &'a [f32]> + '_ {
        (0..self.rows).filter_map(move |i| self.row(i))
    }
}
