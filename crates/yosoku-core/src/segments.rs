//! Segment/candidate containers shared between the predictor and its
//! converter collaborators.
//!
//! A `Segments` holds an ordered history prefix (already committed) and a
//! conversion suffix (being composed). Candidate 0 of a segment is the
//! current best.

use bitflags::bitflags;

/// What kind of output the client asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestType {
    Conversion,
    Suggestion,
    Prediction,
    PartialSuggestion,
    PartialPrediction,
    ReverseConversion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SegmentType {
    /// Boundary and value both open.
    #[default]
    Free,
    /// Boundary fixed by the user, value still open.
    FixedBoundary,
    /// Value committed; eligible for usage-stat recording.
    FixedValue,
    /// Submitted to the application.
    Submitted,
    /// Already part of the context history.
    History,
}

bitflags! {
    /// Per-candidate attribute bits surfaced to the session layer.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct CandidateAttrs: u16 {
        const SPELLING_CORRECTION = 1 << 0;
        const USER_DICTIONARY = 1 << 1;
        const TYPING_CORRECTION = 1 << 2;
        const REALTIME_CONVERSION = 1 << 3;
        const NO_VARIANTS_EXPANSION = 1 << 4;
        const NO_EXTRA_DESCRIPTION = 1 << 5;
        const PARTIALLY_KEY_CONSUMED = 1 << 6;
        const AUTO_PARTIAL_SUGGESTION = 1 << 7;
    }
}

bitflags! {
    /// Provenance tags consumed by usage statistics on commit.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct SourceInfo: u8 {
        const ZERO_QUERY_NONE = 1 << 0;
        const ZERO_QUERY_NUMBER_SUFFIX = 1 << 1;
        const ZERO_QUERY_EMOTICON = 1 << 2;
        const ZERO_QUERY_EMOJI = 1 << 3;
        const ZERO_QUERY_BIGRAM = 1 << 4;
        const ZERO_QUERY_SUFFIX = 1 << 5;
    }
}

#[derive(Debug, Clone, Default)]
pub struct Candidate {
    pub key: String,
    pub value: String,
    pub content_key: String,
    pub content_value: String,
    /// Dictionary word cost, before transition.
    pub wcost: i32,
    /// Final ranking cost.
    pub cost: i32,
    pub lid: u16,
    pub rid: u16,
    pub attributes: CandidateAttrs,
    pub source_info: SourceInfo,
    /// Key bytes consumed when `PARTIALLY_KEY_CONSUMED` is set.
    pub consumed_key_size: usize,
    /// Packed per-segment lengths; see [`encode_lengths`].
    pub inner_segment_boundary: Vec<u32>,
    pub description: String,
}

#[derive(Debug, Clone, Default)]
pub struct Segment {
    key: String,
    pub segment_type: SegmentType,
    candidates: Vec<Candidate>,
}

impl Segment {
    pub fn new(key: impl Into<String>) -> Self {
        Segment {
            key: key.into(),
            ..Segment::default()
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn set_key(&mut self, key: impl Into<String>) {
        self.key = key.into();
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn candidate(&self, index: usize) -> Option<&Candidate> {
        self.candidates.get(index)
    }

    pub fn candidates_len(&self) -> usize {
        self.candidates.len()
    }

    pub fn push_candidate(&mut self, candidate: Candidate) {
        self.candidates.push(candidate);
    }

    /// Drop every candidate from `from` onward; used when a converter wrote
    /// scratch candidates into this segment.
    pub fn truncate_candidates(&mut self, from: usize) {
        self.candidates.truncate(from);
    }

    pub fn clear_candidates(&mut self) {
        self.candidates.clear();
    }
}

#[derive(Debug, Clone)]
pub struct Segments {
    pub request_type: RequestType,
    history: Vec<Segment>,
    conversion: Vec<Segment>,
    pub max_prediction_candidates: usize,
    pub max_conversion_candidates: usize,
}

impl Segments {
    pub fn new(request_type: RequestType) -> Self {
        Segments {
            request_type,
            history: Vec::new(),
            conversion: Vec::new(),
            max_prediction_candidates: 10,
            max_conversion_candidates: 20,
        }
    }

    pub fn history_segments(&self) -> &[Segment] {
        &self.history
    }

    pub fn conversion_segments(&self) -> &[Segment] {
        &self.conversion
    }

    pub fn conversion_segment(&self, index: usize) -> Option<&Segment> {
        self.conversion.get(index)
    }

    pub fn mutable_conversion_segment(&mut self, index: usize) -> Option<&mut Segment> {
        self.conversion.get_mut(index)
    }

    pub fn last_history_segment(&self) -> Option<&Segment> {
        self.history.last()
    }

    pub fn add_history_segment(&mut self, mut segment: Segment) {
        segment.segment_type = SegmentType::History;
        self.history.push(segment);
    }

    pub fn add_conversion_segment(&mut self, segment: Segment) {
        self.conversion.push(segment);
    }

    /// Replace the conversion suffix wholesale; converters use this to
    /// publish a fresh segmentation.
    pub fn set_conversion_segments(&mut self, segments: Vec<Segment>) {
        self.conversion = segments;
    }
}

/// Pack the four lengths describing one inner segment into a u32,
/// one byte each: key, value, content key, content value.
/// Returns `None` when any length does not fit in a byte.
pub fn encode_lengths(
    key_len: usize,
    value_len: usize,
    content_key_len: usize,
    content_value_len: usize,
) -> Option<u32> {
    if key_len > 255 || value_len > 255 || content_key_len > 255 || content_value_len > 255 {
        return None;
    }
    Some(
        (key_len as u32) << 24
            | (value_len as u32) << 16
            | (content_key_len as u32) << 8
            | content_value_len as u32,
    )
}

/// Inverse of [`encode_lengths`].
pub fn decode_lengths(encoded: u32) -> (usize, usize, usize, usize) {
    (
        (encoded >> 24) as usize,
        ((encoded >> 16) & 0xFF) as usize,
        ((encoded >> 8) & 0xFF) as usize,
        (encoded & 0xFF) as usize,
    )
}
