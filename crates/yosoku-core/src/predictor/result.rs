use bitflags::bitflags;

use crate::dict::{Token, TokenAttrs};
use crate::segments::{CandidateAttrs, SourceInfo};

use super::zero_query::ZeroQueryType;

/// Sentinel treated as positive infinity by the ranking stage. Deliberately
/// far below `i32::MAX` so later penalties cannot overflow past it and
/// resurrect a rejected candidate.
pub const INFINITY_COST: i32 = 2 << 20;

bitflags! {
    /// Which producer(s) a result came from. The empty set marks a dead
    /// result: filter passes mark rather than erase.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PredictionTypes: u8 {
        const UNIGRAM = 1 << 0;
        const BIGRAM = 1 << 1;
        const REALTIME = 1 << 2;
        /// The exact top conversion result; always also `REALTIME`.
        const REALTIME_TOP = 1 << 3;
        const SUFFIX = 1 << 4;
        const ENGLISH = 1 << 5;
        const TYPING_CORRECTION = 1 << 6;
    }
}

/// One candidate inside a single prediction call. Created, ranked and
/// consumed within `predict_for_request`; never outlives it.
#[derive(Debug, Clone, Default)]
pub struct PredictionResult {
    pub key: String,
    pub value: String,
    pub wcost: i32,
    pub cost: i32,
    pub lid: u16,
    pub rid: u16,
    pub types: PredictionTypes,
    pub candidate_attributes: CandidateAttrs,
    pub source_info: SourceInfo,
    pub consumed_key_size: usize,
    pub inner_segment_boundary: Vec<u32>,
}

impl PredictionResult {
    pub fn from_token(token: &Token, types: PredictionTypes) -> Self {
        let mut result = PredictionResult {
            key: token.key.clone(),
            value: token.value.clone(),
            wcost: token.cost,
            lid: token.lid,
            rid: token.rid,
            ..PredictionResult::default()
        };
        result.set_types_and_token_attributes(types, token.attributes);
        result
    }

    /// Set the type bitset and derive candidate attributes from it plus the
    /// source token's attributes.
    pub fn set_types_and_token_attributes(
        &mut self,
        types: PredictionTypes,
        token_attrs: TokenAttrs,
    ) {
        self.types = types;
        self.candidate_attributes = CandidateAttrs::empty();
        if types.contains(PredictionTypes::TYPING_CORRECTION) {
            self.candidate_attributes |= CandidateAttrs::TYPING_CORRECTION;
        }
        if types.intersects(PredictionTypes::REALTIME | PredictionTypes::REALTIME_TOP) {
            self.candidate_attributes |= CandidateAttrs::REALTIME_CONVERSION;
        }
        if token_attrs.contains(TokenAttrs::SPELLING_CORRECTION) {
            self.candidate_attributes |= CandidateAttrs::SPELLING_CORRECTION;
        }
        if token_attrs.contains(TokenAttrs::USER_DICTIONARY) {
            self.candidate_attributes |=
                CandidateAttrs::USER_DICTIONARY | CandidateAttrs::NO_VARIANTS_EXPANSION;
        }
    }

    pub fn set_zero_query_source(&mut self, zero_query_type: ZeroQueryType) {
        self.source_info |= match zero_query_type {
            ZeroQueryType::None => SourceInfo::ZERO_QUERY_NONE,
            ZeroQueryType::NumberSuffix => SourceInfo::ZERO_QUERY_NUMBER_SUFFIX,
            ZeroQueryType::Emoticon => SourceInfo::ZERO_QUERY_EMOTICON,
            ZeroQueryType::Emoji => SourceInfo::ZERO_QUERY_EMOJI,
            ZeroQueryType::Bigram => SourceInfo::ZERO_QUERY_BIGRAM,
            ZeroQueryType::Suffix => SourceInfo::ZERO_QUERY_SUFFIX,
        };
    }

    /// A dead result survives in the vector but is never emitted.
    pub fn is_dead(&self) -> bool {
        self.types.is_empty()
    }

    pub fn kill(&mut self) {
        self.types = PredictionTypes::empty();
    }
}
