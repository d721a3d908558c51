use crate::domain::model::{Segment, SegmentSet};
use Segment::{A, B, C, D, E, F, G};

/// Lit segments for '0'..='9', indexed by digit value.
pub const DIGIT_SEGMENTS: [SegmentSet; 10] = [
    SegmentSet::of(&[A, B, C, D, E, F]),
    SegmentSet::of(&[B, C]),
    SegmentSet::of(&[A, B, G, E, D]),
    SegmentSet::of(&[A, B, G, C, D]),
    SegmentSet::of(&[F, G, B, C]),
    SegmentSet::of(&[A, F, G, C, D]),
    SegmentSet::of(&[A, F, E, D, C, G]),
    SegmentSet::of(&[A, B, C]),
    SegmentSet::of(&[A, B, C, D, E, F, G]),
    SegmentSet::of(&[A, B, C, D, F, G]),
];

/// Segments to light for `ch`. Anything that is not an ASCII digit
/// lights nothing.
pub fn lit_segments(ch: char) -> SegmentSet {
    ch.to_digit(10)
        .map(|d| DIGIT_SEGMENTS[d as usize])
        .unwrap_or(SegmentSet::EMPTY)
}
