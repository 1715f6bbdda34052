//! Detpost is a CPU-first post-processing library for single-stage
//! anchor-free object detectors.
//!
//! Given the raw `[N, 4 * reg_max + num_classes]` tensor an inference engine
//! produces, the crate decodes labeled, scored bounding boxes via
//! distribution-focal-loss expectation, suppresses duplicates with greedy
//! IoU-based NMS and maps survivors back into original-image pixel
//! coordinates, with optional parallelism via the `rayon` feature.

pub mod anchor;
mod candidate;
pub mod decode;
pub mod detection;
pub mod letterbox;
pub mod pipeline;
pub mod tensor;
mod trace;
pub mod util;

pub use anchor::{generate_grid_strides, GridAndStride};
pub use candidate::nms::nms_sorted_boxes;
pub use candidate::sort::{sort_by_area_desc, sort_by_score_desc};
pub use decode::generate_proposals;
#[cfg(feature = "rayon")]
pub use decode::generate_proposals_par;
pub use detection::{Detection, Rect};
pub use letterbox::Letterbox;
pub use pipeline::{PostProcessConfig, PostProcessor};
pub use tensor::TensorView;
pub use util::{DetPostError, DetPostResult};
