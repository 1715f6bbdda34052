//! End-to-end post-processing pipeline.
//!
//! `PostProcessor` wires the stages together in data-flow order: anchor
//! enumeration, proposal decoding, score sorting, non-maximum suppression,
//! mapping back to original-image coordinates and the final area ordering.

use crate::anchor::generate_grid_strides;
use crate::candidate::nms::nms_sorted_boxes;
use crate::candidate::sort::{sort_by_area_desc, sort_by_score_desc};
#[cfg(not(feature = "rayon"))]
use crate::decode::generate_proposals;
#[cfg(feature = "rayon")]
use crate::decode::generate_proposals_par;
use crate::detection::Detection;
use crate::letterbox::Letterbox;
use crate::tensor::TensorView;
use crate::trace::{trace_event, trace_span};
use crate::util::{DetPostError, DetPostResult};

/// Configuration for the post-processing pipeline.
#[derive(Clone, Debug)]
pub struct PostProcessConfig {
    /// Minimum class confidence for a proposal to survive decoding.
    pub prob_threshold: f32,
    /// IoU above which a lower-scoring box is suppressed.
    pub nms_threshold: f32,
    /// Feature-map strides, in tensor row order.
    pub strides: Vec<u32>,
    /// Number of distribution bins per box side.
    pub reg_max: usize,
    /// Number of object classes.
    pub num_classes: usize,
}

impl Default for PostProcessConfig {
    fn default() -> Self {
        Self {
            prob_threshold: 0.45,
            nms_threshold: 0.8,
            strides: vec![8, 16, 32],
            reg_max: 16,
            num_classes: 2,
        }
    }
}

impl PostProcessConfig {
    fn validate(&self) -> DetPostResult<()> {
        if self.strides.is_empty() {
            return Err(DetPostError::InvalidConfig("strides must not be empty"));
        }
        if self.strides.iter().any(|&s| s == 0) {
            return Err(DetPostError::InvalidConfig("strides must be nonzero"));
        }
        if self.reg_max == 0 {
            return Err(DetPostError::InvalidConfig("reg_max must be positive"));
        }
        if self.num_classes == 0 {
            return Err(DetPostError::InvalidConfig("num_classes must be positive"));
        }
        if !(0.0..=1.0).contains(&self.prob_threshold) {
            return Err(DetPostError::InvalidConfig(
                "prob_threshold must lie in [0, 1]",
            ));
        }
        if !(0.0..=1.0).contains(&self.nms_threshold) {
            return Err(DetPostError::InvalidConfig(
                "nms_threshold must lie in [0, 1]",
            ));
        }
        Ok(())
    }
}

/// Post-processing pipeline with a fixed configuration.
///
/// The processor is a plain owned value: callers construct one next to their
/// model handle and feed predictions through it. Swapping models means
/// constructing a new processor and dropping the old one; there is no
/// process-wide state, and calls share nothing across invocations.
#[derive(Clone, Debug)]
pub struct PostProcessor {
    cfg: PostProcessConfig,
}

impl Default for PostProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl PostProcessor {
    /// Creates a processor with the default configuration.
    pub fn new() -> Self {
        Self {
            cfg: PostProcessConfig::default(),
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, cfg: PostProcessConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &PostProcessConfig {
        &self.cfg
    }

    /// Runs the full pipeline over one prediction tensor.
    ///
    /// `letterbox` must describe the same preprocessing geometry that
    /// produced the tensor: anchors are enumerated over its padded canvas,
    /// and surviving boxes are mapped back into its original image bounds.
    /// The result is ordered by descending box area.
    pub fn process(
        &self,
        pred: TensorView<'_>,
        letterbox: &Letterbox,
    ) -> DetPostResult<Vec<Detection>> {
        self.cfg.validate()?;

        let _span = trace_span!("postprocess", rows = pred.rows()).entered();

        let anchors = generate_grid_strides(
            letterbox.padded_width as usize,
            letterbox.padded_height as usize,
            &self.cfg.strides,
        );

        #[cfg(feature = "rayon")]
        let mut proposals = generate_proposals_par(
            &anchors,
            pred,
            self.cfg.reg_max,
            self.cfg.num_classes,
            self.cfg.prob_threshold,
        )?;
        #[cfg(not(feature = "rayon"))]
        let mut proposals = generate_proposals(
            &anchors,
            pred,
            self.cfg.reg_max,
            self.cfg.num_classes,
            self.cfg.prob_threshold,
        )?;

        trace_event!("proposals", count = proposals.len());

        sort_by_score_desc(&mut proposals);
        let picked = nms_sorted_boxes(&proposals, self.cfg.nms_threshold);

        let mut objects: Vec<Detection> = picked.iter().map(|&idx| proposals[idx]).collect();
        letterbox.map_to_image(&mut objects);
        sort_by_area_desc(&mut objects);

        trace_event!("detections", count = objects.len());
        Ok(objects)
    }
}
