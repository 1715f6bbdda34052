//! Anchor enumeration across feature-map strides.

/// One spatial location on a feature-map level, in grid units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridAndStride {
    /// Column index on the feature-map grid.
    pub grid_x: usize,
    /// Row index on the feature-map grid.
    pub grid_y: usize,
    /// Downsampling factor of the level.
    pub stride: u32,
}

impl GridAndStride {
    /// Center of the anchor cell on the padded canvas, in pixels.
    pub fn center(&self) -> (f32, f32) {
        let stride = self.stride as f32;
        (
            (self.grid_x as f32 + 0.5) * stride,
            (self.grid_y as f32 + 0.5) * stride,
        )
    }
}

/// Enumerates anchor points for every stride over the padded input canvas.
///
/// For each stride `s`, the grid covers `floor(width / s) x floor(height / s)`
/// positions in row-major order (y outer, x inner); the per-stride grids are
/// concatenated in the order the strides are given. The index of an anchor in
/// the returned vector is the row index used to address the prediction
/// tensor, so the iteration order is part of the decoder contract.
///
/// Strides must be nonzero; the pipeline configuration enforces this before
/// calling in.
pub fn generate_grid_strides(width: usize, height: usize, strides: &[u32]) -> Vec<GridAndStride> {
    let mut anchors = Vec::new();
    for &stride in strides {
        debug_assert!(stride > 0, "strides must be nonzero");
        let s = stride as usize;
        let num_grid_w = width / s;
        let num_grid_h = height / s;
        anchors.reserve(num_grid_w * num_grid_h);
        for grid_y in 0..num_grid_h {
            for grid_x in 0..num_grid_w {
                anchors.push(GridAndStride {
                    grid_x,
                    grid_y,
                    stride,
                });
            }
        }
    }
    anchors
}
