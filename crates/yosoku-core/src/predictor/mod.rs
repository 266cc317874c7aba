//! Dictionary-based prediction and suggestion.
//!
//! One `predict_for_request` call fans out over up to six candidate sources
//! (realtime conversion, unigram, bigram, suffix/zero-query, English,
//! typing correction), funnels everything into one result vector, assigns a
//! language-model cost, filters, and emits the top candidates onto the
//! first conversion segment. The call is self-contained: no state survives
//! it except the usage-statistics counters.

mod aggregate;
mod callback;
mod cost;
mod emit;
mod result;
pub mod zero_query;

#[cfg(test)]
mod tests;

use tracing::{debug, debug_span};

use crate::converter::{Converter, ImmutableConverter, Segmenter};
use crate::dict::{Connector, Dictionary};
use crate::filter::SuggestionFilter;
use crate::request::ConversionRequest;
use crate::segments::{Candidate, RequestType, SegmentType, Segments, SourceInfo};
use crate::settings::settings;
use crate::stats::{self, StatsSink};
use crate::unicode;

pub use result::{PredictionResult, PredictionTypes, INFINITY_COST};
pub use zero_query::ZeroQueryType;

/// Above this many characters the lattice converter is asked for fewer
/// candidates, since long-key realtime results are rarely useful.
const FEW_RESULT_KEY_THRESHOLD: usize = 8;

/// Minimum zip-code-shaped key length that still triggers suggestion.
const ZIP_CODE_SUGGEST_MIN_CHARS: usize = 6;

/// The prediction engine. Borrows every collaborator; all of them are
/// expected to be re-entrant, read-only references with process lifetime.
pub struct DictionaryPredictor<'a> {
    converter: &'a dyn Converter,
    immutable_converter: &'a dyn ImmutableConverter,
    dictionary: &'a dyn Dictionary,
    suffix_dictionary: &'a dyn Dictionary,
    connector: &'a dyn Connector,
    segmenter: &'a dyn Segmenter,
    suggestion_filter: &'a dyn SuggestionFilter,
    stats: &'a dyn StatsSink,
    /// Connection ID reserved for numeric counter words (個, 月, ...).
    counter_suffix_word_id: u16,
}

impl<'a> DictionaryPredictor<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        converter: &'a dyn Converter,
        immutable_converter: &'a dyn ImmutableConverter,
        dictionary: &'a dyn Dictionary,
        suffix_dictionary: &'a dyn Dictionary,
        connector: &'a dyn Connector,
        segmenter: &'a dyn Segmenter,
        suggestion_filter: &'a dyn SuggestionFilter,
        stats: &'a dyn StatsSink,
        counter_suffix_word_id: u16,
    ) -> Self {
        DictionaryPredictor {
            converter,
            immutable_converter,
            dictionary,
            suffix_dictionary,
            connector,
            segmenter,
            suggestion_filter,
            stats,
            counter_suffix_word_id,
        }
    }

    /// Run prediction and append the ranked candidates to the first
    /// conversion segment. Returns whether anything was emitted.
    pub fn predict_for_request(
        &self,
        request: &ConversionRequest<'_>,
        segments: &mut Segments,
    ) -> bool {
        let _span = debug_span!("predict_for_request").entered();

        let mut results = Vec::new();
        if !self.aggregate_prediction(request, segments, &mut results) {
            return false;
        }

        self.set_cost(request, segments, &mut results);
        self.remove_prediction(request, segments, &mut results);

        self.add_prediction_to_candidates(request, segments, &mut results)
    }

    /// Record which zero-query category the committed candidate came from.
    /// Call after the user fixes a value produced by this predictor.
    pub fn finish(&self, _request: &ConversionRequest<'_>, segments: &Segments) {
        if segments.request_type == RequestType::ReverseConversion {
            return;
        }

        let Some(segment) = segments.conversion_segment(0) else {
            return;
        };
        let Some(candidate) = segment.candidate(0) else {
            debug!("no candidate to record");
            return;
        };
        if segment.segment_type != SegmentType::FixedValue {
            debug!(value = %candidate.value, "segment not fixed, skipping stats");
            return;
        }

        self.record_usage_stats(candidate);
    }

    fn record_usage_stats(&self, candidate: &Candidate) {
        static CATEGORIES: &[(SourceInfo, &str)] = &[
            (SourceInfo::ZERO_QUERY_NONE, stats::COMMIT_ZERO_QUERY_NONE),
            (
                SourceInfo::ZERO_QUERY_NUMBER_SUFFIX,
                stats::COMMIT_ZERO_QUERY_NUMBER_SUFFIX,
            ),
            (
                SourceInfo::ZERO_QUERY_EMOTICON,
                stats::COMMIT_ZERO_QUERY_EMOTICON,
            ),
            (SourceInfo::ZERO_QUERY_EMOJI, stats::COMMIT_ZERO_QUERY_EMOJI),
            (
                SourceInfo::ZERO_QUERY_BIGRAM,
                stats::COMMIT_ZERO_QUERY_BIGRAM,
            ),
            (
                SourceInfo::ZERO_QUERY_SUFFIX,
                stats::COMMIT_ZERO_QUERY_SUFFIX,
            ),
        ];
        for &(bit, name) in CATEGORIES {
            if candidate.source_info.contains(bit) {
                self.stats.increment(name);
            }
        }
    }

    /// Decide which candidate sources this request enables.
    pub(super) fn prediction_types_for(
        &self,
        request: &ConversionRequest<'_>,
        segments: &Segments,
    ) -> PredictionTypes {
        if segments.request_type == RequestType::Conversion {
            debug!("request type is CONVERSION");
            return PredictionTypes::empty();
        }
        let Some(conversion_segment) = segments.conversion_segment(0) else {
            debug!("no conversion segment");
            return PredictionTypes::empty();
        };

        let mut types = PredictionTypes::empty();
        if Self::should_enable_realtime_conversion(request, segments) {
            types |= PredictionTypes::REALTIME;
        }

        let zero_query = request.request.zero_query_suggestion;
        if request.is_latin_input_mode() && !zero_query {
            if request.config.use_dictionary_suggest {
                types |= PredictionTypes::ENGLISH;
            }
            // Return regardless of use_dictionary_suggest to avoid
            // full-width kana candidates for English composition.
            return types;
        }

        if !request.config.use_dictionary_suggest
            && segments.request_type == RequestType::Suggestion
        {
            debug!("dictionary suggest disabled");
            return types;
        }

        let key = conversion_segment.key();
        let key_len = key.chars().count();
        if key_len == 0 && !zero_query {
            return types;
        }

        // Never trigger suggestion while the key looks like a zip code.
        if segments.request_type == RequestType::Suggestion
            && is_zip_code_key(key)
            && key_len < ZIP_CODE_SUGGEST_MIN_CHARS
        {
            return types;
        }

        // Suggestions from a very short key are more annoying than helpful.
        let min_unigram_key_len = if zero_query { 1 } else { 3 };
        if (segments.request_type == RequestType::Prediction && key_len >= 1)
            || key_len >= min_unigram_key_len
        {
            types |= PredictionTypes::UNIGRAM;
        }

        if let Some(history_segment) = segments.last_history_segment() {
            let min_history_key_len = if zero_query { 2 } else { 3 };
            if let Some(candidate) = history_segment.candidate(0) {
                if candidate.key.chars().count() >= min_history_key_len {
                    types |= PredictionTypes::BIGRAM;
                }
            }
        }

        if segments.last_history_segment().is_some() && zero_query {
            types |= PredictionTypes::SUFFIX;
        }

        if request.config.use_typing_correction && key_len >= 3 {
            types |= PredictionTypes::TYPING_CORRECTION;
        }

        types
    }

    fn should_enable_realtime_conversion(
        request: &ConversionRequest<'_>,
        segments: &Segments,
    ) -> bool {
        let Some(segment) = segments.conversion_segment(0) else {
            return false;
        };
        let key = segment.key();
        // An empty key has nothing to convert; an overlong one would make
        // the lattice converter too slow.
        if key.is_empty() || key.len() >= settings().limits.realtime_key_bytes_max {
            return false;
        }

        segments.request_type == RequestType::PartialSuggestion
            || request.config.use_realtime_conversion
            || request.is_mixed_conversion()
    }

    /// Last history segment's committed key and value.
    pub(super) fn history_key_value(&self, segments: &Segments) -> Option<(String, String)> {
        let candidate = segments.last_history_segment()?.candidate(0)?;
        Some((candidate.key.clone(), candidate.value.clone()))
    }
}

/// Digits and hyphens only, e.g. "0123" or "154-0002".
fn is_zip_code_key(key: &str) -> bool {
    !key.is_empty() && key.chars().all(|c| c.is_ascii_digit() || c == '-')
}

/// Half-width form of the last committed value when it is an arabic number
/// (full-width digits included).
fn number_history(segments: &Segments) -> Option<String> {
    let candidate = segments.last_history_segment()?.candidate(0)?;
    if !unicode::is_arabic_number(&candidate.value) {
        return None;
    }
    Some(unicode::full_width_to_half_width(&candidate.value))
}
