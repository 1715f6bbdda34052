//! Candidate ordering and pruning utilities.
//!
//! Includes score/area sorting and greedy IoU suppression.

pub(crate) mod nms;
pub(crate) mod sort;
