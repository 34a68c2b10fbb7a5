//! Voxline SMS SDK
//!
//! Phone-number normalization to E.164 and message segmentation matching
//! carrier billing rules. All functions are pure and never panic.

pub mod phone;
pub mod segments;


pub use phone::{normalize_to_e164, normalize_to_e164_with_country, validate_e164};
pub use segments::{count_segments, segment_info, SegmentEncoding, SegmentInfo};
