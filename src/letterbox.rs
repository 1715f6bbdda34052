//! Letterbox geometry and mapping back to original-image coordinates.
//!
//! The preprocessing stage resizes an image preserving aspect ratio and pads
//! it onto a stride-aligned canvas before inference. `Letterbox` records that
//! geometry so decoded boxes can be rewritten into original-image pixels.

use crate::detection::{Detection, Rect};

/// Canvas alignment required by the detector's coarsest stride.
const CANVAS_ALIGN: u32 = 32;

/// Geometry of an aspect-preserving resize plus padding to an aligned canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Letterbox {
    /// Original image width in pixels.
    pub width: u32,
    /// Original image height in pixels.
    pub height: u32,
    /// Scale factor applied when resizing to the network input size.
    pub scale: f32,
    /// Padding added on the left (half of the total, rounded down).
    pub pad_x: u32,
    /// Padding added on the top (half of the total, rounded down).
    pub pad_y: u32,
    /// Padded canvas width fed to the network.
    pub padded_width: u32,
    /// Padded canvas height fed to the network.
    pub padded_height: u32,
}

impl Letterbox {
    /// Computes the geometry for fitting `width x height` into a square
    /// `target_size` canvas.
    ///
    /// The long side scales to `target_size`; the short side scales by the
    /// same factor, truncated to whole pixels. Both sides then pad up to the
    /// next multiple of 32, with the leading (left/top) offset being half the
    /// total padding rounded down.
    pub fn fit(width: u32, height: u32, target_size: u32) -> Self {
        let (scale, resized_w, resized_h) = if width > height {
            let scale = target_size as f32 / width as f32;
            (scale, target_size, (height as f32 * scale) as u32)
        } else {
            let scale = target_size as f32 / height as f32;
            (scale, (width as f32 * scale) as u32, target_size)
        };

        let padded_w = resized_w.div_ceil(CANVAS_ALIGN) * CANVAS_ALIGN;
        let padded_h = resized_h.div_ceil(CANVAS_ALIGN) * CANVAS_ALIGN;

        Self {
            width,
            height,
            scale,
            pad_x: (padded_w - resized_w) / 2,
            pad_y: (padded_h - resized_h) / 2,
            padded_width: padded_w,
            padded_height: padded_h,
        }
    }

    /// Rewrites boxes from padded-canvas coordinates into original-image
    /// pixel coordinates, in place.
    ///
    /// Each corner is unpadded, unscaled and clamped independently to
    /// `[0, dimension - 1]`; width and height are re-derived from the clamped
    /// corners so they can never go negative. Labels and scores are left
    /// untouched.
    pub fn map_to_image(&self, objects: &mut [Detection]) {
        let max_x = self.width.saturating_sub(1) as f32;
        let max_y = self.height.saturating_sub(1) as f32;
        let pad_x = self.pad_x as f32;
        let pad_y = self.pad_y as f32;

        for obj in objects.iter_mut() {
            let x0 = ((obj.rect.x - pad_x) / self.scale).clamp(0.0, max_x);
            let y0 = ((obj.rect.y - pad_y) / self.scale).clamp(0.0, max_y);
            let x1 = ((obj.rect.right() - pad_x) / self.scale).clamp(0.0, max_x);
            let y1 = ((obj.rect.bottom() - pad_y) / self.scale).clamp(0.0, max_y);
            obj.rect = Rect::from_corners(x0, y0, x1, y1);
        }
    }
}
