//! SMS segment counting
//!
//! Must match how the carrier bills and splits messages: GSM-7 capacities for
//! pure 7-bit ASCII text, UCS-2 capacities once any non-ASCII character is
//! present. Multipart capacities are smaller because each segment reserves
//! room for concatenation headers.

use serde::{Deserialize, Serialize};

const GSM7_SINGLE_SEGMENT: usize = 160;
const GSM7_MULTI_SEGMENT: usize = 153;
const UCS2_SINGLE_SEGMENT: usize = 70;
const UCS2_MULTI_SEGMENT: usize = 67;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentEncoding {
    Gsm7,
    Ucs2,
}

/// Encoding, billed length, and segment count for one message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentInfo {
    pub encoding: SegmentEncoding,
    /// Billed length: bytes for GSM-7, UTF-16 code units for UCS-2
    pub length: usize,
    pub single_segment_capacity: usize,
    pub multi_segment_capacity: usize,
    pub segments: u32,
}

/// Number of billed segments for a message. Always at least 1.
pub fn count_segments(message: &str) -> u32 {
    segment_info(message).segments
}

/// Full segmentation breakdown, used for cost estimation and UI character
/// counters.
pub fn segment_info(message: &str) -> SegmentInfo {
    let encoding = if message.is_ascii() {
        SegmentEncoding::Gsm7
    } else {
        SegmentEncoding::Ucs2
    };

    let (length, single, multi) = match encoding {
        SegmentEncoding::Gsm7 => (message.len(), GSM7_SINGLE_SEGMENT, GSM7_MULTI_SEGMENT),
        // Carriers bill UCS-2 in 16-bit code units, so astral characters
        // (emoji) count twice
        SegmentEncoding::Ucs2 => (
            message.encode_utf16().count(),
            UCS2_SINGLE_SEGMENT,
            UCS2_MULTI_SEGMENT,
        ),
    };

    let segments = if length <= single {
        1
    } else {
        length.div_ceil(multi) as u32
    };

    SegmentInfo {
        encoding,
        length,
        single_segment_capacity: single,
        multi_segment_capacity: multi,
        segments,
    }
}
