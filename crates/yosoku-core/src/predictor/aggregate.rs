//! The six candidate aggregators.
//!
//! Every aggregator is a no-op when its bit is missing from the type mask,
//! appends `PredictionResult`s to the shared vector otherwise, and never
//! fails hard: an empty lookup simply contributes nothing.

use tracing::{debug, warn};

use crate::dict::Dictionary;
use crate::request::{ConversionRequest, InputMode, KeySelection};
use crate::segments::{encode_lengths, CandidateAttrs, RequestType, Segments};
use crate::settings::settings;
use crate::unicode::{self, Script};

use super::callback::{BigramLookupCallback, FindValueCallback, PredictiveLookupCallback};
use super::result::{PredictionResult, PredictionTypes};
use super::zero_query::{self, ZeroQueryType};
use super::{number_history, DictionaryPredictor, FEW_RESULT_KEY_THRESHOLD};

impl DictionaryPredictor<'_> {
    pub(super) fn aggregate_prediction(
        &self,
        request: &ConversionRequest<'_>,
        segments: &mut Segments,
        results: &mut Vec<PredictionResult>,
    ) -> bool {
        let types = self.prediction_types_for(request, segments);
        if types.is_empty() {
            return false;
        }

        if matches!(
            segments.request_type,
            RequestType::PartialSuggestion | RequestType::PartialPrediction
        ) {
            // Partial requests ask for conversion of the text before the
            // cursor, so only candidates whose key exactly matches the query
            // are wanted; that is the realtime path alone.
            self.aggregate_realtime_conversion(types, request, segments, results);
        } else {
            self.aggregate_realtime_conversion(types, request, segments, results);
            self.aggregate_unigram_prediction(types, request, segments, results);
            self.aggregate_bigram_prediction(types, request, segments, results);
            self.aggregate_suffix_prediction(types, request, segments, results);
            self.aggregate_english_prediction(types, request, segments, results);
            self.aggregate_typing_correction_prediction(types, request, segments, results);
        }

        if results.is_empty() {
            debug!("no aggregator produced results");
            return false;
        }
        true
    }

    // ----- realtime ------------------------------------------------------

    fn aggregate_realtime_conversion(
        &self,
        types: PredictionTypes,
        request: &ConversionRequest<'_>,
        segments: &mut Segments,
        results: &mut Vec<PredictionResult>,
    ) {
        if !types.contains(PredictionTypes::REALTIME) {
            return;
        }

        if request.use_actual_converter_for_realtime_conversion
            && !self.push_top_conversion_result(request, segments, results)
        {
            warn!("realtime conversion with the actual converter failed");
        }

        let Some(segment) = segments.conversion_segment(0) else {
            return;
        };
        let prev_candidates_len = segment.candidates_len();
        let prev_max_prediction = segments.max_prediction_candidates;

        let budget = prev_max_prediction.saturating_sub(prev_candidates_len);
        let realtime_size =
            realtime_candidate_max_size(segments, request.is_mixed_conversion(), budget);
        if realtime_size == 0 {
            return;
        }

        // The first conversion segment doubles as a scratch buffer for the
        // lattice converter; its extra candidates are copied out and erased
        // below, and the prediction cap is restored either way.
        segments.max_prediction_candidates = prev_candidates_len + realtime_size;
        let converted = self.immutable_converter.convert_for_request(request, segments);
        segments.max_prediction_candidates = prev_max_prediction;

        let Some(segment) = segments.mutable_conversion_segment(0) else {
            return;
        };
        if !converted || segment.candidates_len() <= prev_candidates_len {
            warn!("realtime conversion produced no candidates");
            return;
        }

        for candidate in &segment.candidates()[prev_candidates_len..] {
            let mut result = PredictionResult {
                key: candidate.key.clone(),
                value: candidate.value.clone(),
                wcost: candidate.wcost,
                lid: candidate.lid,
                rid: candidate.rid,
                inner_segment_boundary: candidate.inner_segment_boundary.clone(),
                consumed_key_size: candidate.consumed_key_size,
                ..PredictionResult::default()
            };
            result.set_types_and_token_attributes(
                PredictionTypes::REALTIME,
                crate::dict::TokenAttrs::empty(),
            );
            result.candidate_attributes |= candidate.attributes;
            results.push(result);
        }
        segment.truncate_candidates(prev_candidates_len);
    }

    /// Run the actual converter once and push its concatenated top result,
    /// so the best prediction agrees with what conversion would produce.
    fn push_top_conversion_result(
        &self,
        request: &ConversionRequest<'_>,
        segments: &Segments,
        results: &mut Vec<PredictionResult>,
    ) -> bool {
        let mut tmp_request = request.clone();
        tmp_request.composer_key_selection = KeySelection::Prediction;
        // Some rewriters cost more than this path is worth, and partial
        // candidates would break the concatenation below.
        tmp_request.skip_slow_rewriters = true;
        tmp_request.create_partial_candidates = false;

        let mut tmp_segments = segments.clone();
        tmp_segments.max_conversion_candidates = 20;
        if !self
            .converter
            .start_conversion_for_request(&tmp_request, &mut tmp_segments)
        {
            return false;
        }

        let converted = tmp_segments.conversion_segments();
        let (Some(first), Some(last)) = (
            converted.first().and_then(|s| s.candidate(0)),
            converted.last().and_then(|s| s.candidate(0)),
        ) else {
            return false;
        };

        let mut result = PredictionResult {
            key: segments
                .conversion_segment(0)
                .map(|s| s.key().to_string())
                .unwrap_or_default(),
            lid: first.lid,
            rid: last.rid,
            ..PredictionResult::default()
        };
        result.set_types_and_token_attributes(
            PredictionTypes::REALTIME | PredictionTypes::REALTIME_TOP,
            crate::dict::TokenAttrs::empty(),
        );
        result.candidate_attributes |= CandidateAttrs::NO_VARIANTS_EXPANSION;

        // The converter ran in conversion mode, which leaves the
        // inner-segment boundary unset; reconstruct it from the per-segment
        // top candidates while concatenating them.
        let mut boundary_ok = true;
        for segment in converted {
            let Some(candidate) = segment.candidate(0) else {
                return false;
            };
            result.value.push_str(&candidate.value);
            result.wcost += candidate.cost;
            if boundary_ok {
                match encode_lengths(
                    candidate.key.len(),
                    candidate.value.len(),
                    candidate.content_key.len(),
                    candidate.content_value.len(),
                ) {
                    Some(encoded) => result.inner_segment_boundary.push(encoded),
                    None => boundary_ok = false,
                }
            }
        }
        if !boundary_ok {
            warn!("failed to construct inner segment boundary");
            result.inner_segment_boundary.clear();
        }

        results.push(result);
        true
    }

    // ----- unigram -------------------------------------------------------

    fn aggregate_unigram_prediction(
        &self,
        types: PredictionTypes,
        request: &ConversionRequest<'_>,
        segments: &Segments,
        results: &mut Vec<PredictionResult>,
    ) {
        if !types.contains(PredictionTypes::UNIGRAM) {
            return;
        }

        if request.is_mixed_conversion() {
            self.aggregate_unigram_for_mixed_conversion(request, segments, results);
        } else {
            self.aggregate_unigram_candidate(request, segments, results);
        }
    }

    fn aggregate_unigram_candidate(
        &self,
        request: &ConversionRequest<'_>,
        segments: &Segments,
        results: &mut Vec<PredictionResult>,
    ) {
        let cutoff = cutoff_threshold(segments);
        let prev_len = results.len();
        self.predictive_results(
            self.dictionary,
            "",
            request,
            segments,
            PredictionTypes::UNIGRAM,
            cutoff,
            results,
        );
        // Hitting the cutoff means the prefix fans out too widely for the
        // results to disambiguate anything; drop the whole pass.
        if results.len() - prev_len >= cutoff {
            results.truncate(prev_len);
        }
    }

    /// Mixed-conversion unigram: look up everything, then keep low-cost
    /// representatives while parking results that merely extend them.
    fn aggregate_unigram_for_mixed_conversion(
        &self,
        request: &ConversionRequest<'_>,
        segments: &Segments,
        results: &mut Vec<PredictionResult>,
    ) {
        let mut raw_results = Vec::new();
        self.predictive_results(
            self.dictionary,
            "",
            request,
            segments,
            PredictionTypes::UNIGRAM,
            settings().limits.prediction_cutoff,
            &mut raw_results,
        );
        let keep = partition_redundant_results(&mut raw_results);
        results.extend(raw_results.drain(..keep));
    }

    // ----- bigram --------------------------------------------------------

    fn aggregate_bigram_prediction(
        &self,
        types: PredictionTypes,
        request: &ConversionRequest<'_>,
        segments: &Segments,
        results: &mut Vec<PredictionResult>,
    ) {
        if !types.contains(PredictionTypes::BIGRAM) {
            return;
        }

        let Some((history_key, history_value)) = self.history_key_value(segments) else {
            return;
        };
        self.add_bigram_results_from_history(
            &history_key,
            &history_value,
            request,
            segments,
            results,
        );
    }

    fn add_bigram_results_from_history(
        &self,
        history_key: &str,
        history_value: &str,
        request: &ConversionRequest<'_>,
        segments: &Segments,
        results: &mut Vec<PredictionResult>,
    ) {
        // The history pair must exist in the dictionary. When it doesn't,
        // the user built it from transliteration or manual segment
        // operations, and guessing continuations off it would be noise.
        let mut find_history = FindValueCallback::new(history_value);
        self.dictionary
            .lookup_prefix(history_key, request, &mut find_history);
        let Some(history_token) = find_history.into_token() else {
            debug!("history value not in dictionary, skipping bigram");
            return;
        };

        let cutoff = cutoff_threshold(segments);
        let prev_len = results.len();
        self.predictive_results_for_bigram(
            self.dictionary,
            history_key,
            history_value,
            request,
            segments,
            PredictionTypes::BIGRAM,
            cutoff,
            results,
        );
        if results.len() - prev_len >= cutoff {
            results.truncate(prev_len);
            return;
        }

        let Some(last_char) = history_value.chars().last() else {
            return;
        };
        let history_script = unicode::script_type(history_value);
        let last_history_script = unicode::char_script(last_char);
        for result in results[prev_len..].iter_mut() {
            self.check_bigram_result(
                &history_token,
                history_script,
                last_history_script,
                request,
                result,
            );
        }
    }

    /// Filter out irrelevant bigrams, e.g. "リカ" after the history "アメ".
    fn check_bigram_result(
        &self,
        history_token: &crate::dict::Token,
        history_script: Script,
        last_history_script: Script,
        request: &ConversionRequest<'_>,
        result: &mut PredictionResult,
    ) {
        let history_key = &history_token.key;
        let history_value = &history_token.value;
        let key = result.key.get(history_key.len()..).unwrap_or("");
        let value = result.value.get(history_value.len()..).unwrap_or("");

        if key.is_empty() || value.is_empty() {
            result.kill();
            return;
        }

        let next_script = value.chars().next().map(unicode::char_script);
        let Some(next_script) = next_script else {
            result.kill();
            return;
        };

        // Kanji followed by katakana is a productive compound boundary
        // ("六本木" + "ヒルズ"); keep unconditionally.
        if history_script == Script::Kanji && next_script == Script::Katakana {
            return;
        }

        // If the history word is rarer than the full compound, the compound
        // already surfaces as a unigram suggestion for the shorter key.
        if next_script != Script::Kanji && history_token.cost > result.wcost {
            result.kill();
            return;
        }

        // An unchanged script class often means this is not a word boundary
        // at all. Hiragana is never trusted; katakana only when the whole
        // key is reasonably long.
        if next_script == last_history_script
            && (next_script == Script::Hiragana
                || (next_script == Script::Katakana && result.key.chars().count() <= 5))
        {
            result.kill();
            return;
        }

        // Kanji compounds of length >= 2 are productive enough to keep even
        // when the dictionary has no entry for the remainder.
        if next_script == Script::Kanji && value.chars().count() >= 2 {
            return;
        }

        // Otherwise the suggested remainder must itself be a dictionary
        // entry ("ターネット" after "イン" is not).
        let mut find = FindValueCallback::new(value);
        self.dictionary.lookup_prefix(key, request, &mut find);
        if !find.found() {
            result.kill();
        }
    }

    // ----- suffix / zero-query -------------------------------------------

    fn aggregate_suffix_prediction(
        &self,
        types: PredictionTypes,
        request: &ConversionRequest<'_>,
        segments: &Segments,
        results: &mut Vec<PredictionResult>,
    ) {
        if !types.contains(PredictionTypes::SUFFIX) {
            return;
        }

        let is_zero_query = segments
            .conversion_segment(0)
            .map(|s| s.key().is_empty())
            .unwrap_or(false);
        if is_zero_query && !self.aggregate_number_zero_query(request, segments, results) {
            self.aggregate_zero_query(request, segments, results);
        }

        self.predictive_results(
            self.suffix_dictionary,
            "",
            request,
            segments,
            PredictionTypes::SUFFIX,
            cutoff_threshold(segments),
            results,
        );
    }

    /// Counter-word continuations of a committed number ("12" → 月, 時, ...).
    fn aggregate_number_zero_query(
        &self,
        request: &ConversionRequest<'_>,
        segments: &Segments,
        results: &mut Vec<PredictionResult>,
    ) -> bool {
        let Some(number_key) = number_history(segments) else {
            return false;
        };

        let key_candidates = zero_query::candidates_for_key(
            request,
            &number_key,
            zero_query::data::ZERO_QUERY_NUMBER_RULES,
        );
        let default_candidates = zero_query::candidates_for_key(
            request,
            "default",
            zero_query::data::ZERO_QUERY_NUMBER_RULES,
        );

        append_zero_query_results(
            &key_candidates,
            self.counter_suffix_word_id,
            self.counter_suffix_word_id,
            results,
        );
        append_zero_query_results(
            &default_candidates,
            self.counter_suffix_word_id,
            self.counter_suffix_word_id,
            results,
        );
        true
    }

    /// Table-driven reactions to the committed value (emoji, emoticons).
    fn aggregate_zero_query(
        &self,
        request: &ConversionRequest<'_>,
        segments: &Segments,
        results: &mut Vec<PredictionResult>,
    ) -> bool {
        let Some(candidate) = segments.last_history_segment().and_then(|s| s.candidate(0)) else {
            return false;
        };

        let candidates = zero_query::candidates_for_key(
            request,
            &candidate.value,
            zero_query::data::ZERO_QUERY_RULES,
        );
        if candidates.is_empty() {
            return false;
        }

        // Zero-query reactions connect to EOS.
        append_zero_query_results(&candidates, 0, 0, results);
        true
    }

    // ----- english -------------------------------------------------------

    fn aggregate_english_prediction(
        &self,
        types: PredictionTypes,
        request: &ConversionRequest<'_>,
        segments: &Segments,
        results: &mut Vec<PredictionResult>,
    ) {
        if !types.contains(PredictionTypes::ENGLISH) {
            return;
        }

        let cutoff = cutoff_threshold(segments);
        let prev_len = results.len();
        self.predictive_results_for_english(
            self.dictionary,
            request,
            PredictionTypes::ENGLISH,
            cutoff,
            results,
        );
        if results.len() - prev_len >= cutoff {
            results.truncate(prev_len);
        }
    }

    fn predictive_results_for_english(
        &self,
        dictionary: &dyn Dictionary,
        request: &ConversionRequest<'_>,
        types: PredictionTypes,
        lookup_limit: usize,
        results: &mut Vec<PredictionResult>,
    ) {
        let Some(composer) = request.composer else {
            return;
        };
        let input_key = composer.query_for_prediction();
        // One-letter keys would fan out over the whole alphabet.
        if input_key.chars().count() < 2 {
            return;
        }

        let prev_len = results.len();
        if unicode::is_upper_ascii(&input_key) {
            let key = input_key.to_ascii_lowercase();
            let mut callback = PredictiveLookupCallback::new(
                types,
                lookup_limit,
                key.len(),
                None,
                false,
                results,
            );
            dictionary.lookup_predictive(&key, request, &mut callback);
            for result in results[prev_len..].iter_mut() {
                result.value = result.value.to_ascii_uppercase();
            }
        } else if unicode::is_capitalized_ascii(&input_key) {
            let key = input_key.to_ascii_lowercase();
            let mut callback = PredictiveLookupCallback::new(
                types,
                lookup_limit,
                key.len(),
                None,
                false,
                results,
            );
            dictionary.lookup_predictive(&key, request, &mut callback);
            for result in results[prev_len..].iter_mut() {
                result.value = unicode::capitalize_ascii(&result.value);
            }
        } else {
            let mut callback = PredictiveLookupCallback::new(
                types,
                lookup_limit,
                input_key.len(),
                None,
                false,
                results,
            );
            dictionary.lookup_predictive(&input_key, request, &mut callback);
        }

        if composer.input_mode() == InputMode::FullAscii {
            for result in results[prev_len..].iter_mut() {
                result.value = unicode::half_width_to_full_width(&result.value);
            }
        }
    }

    // ----- typing correction ---------------------------------------------

    fn aggregate_typing_correction_prediction(
        &self,
        types: PredictionTypes,
        request: &ConversionRequest<'_>,
        segments: &Segments,
        results: &mut Vec<PredictionResult>,
    ) {
        if !types.contains(PredictionTypes::TYPING_CORRECTION) {
            return;
        }

        let prev_len = results.len();
        if prev_len > settings().limits.typing_correction_results_guard {
            return;
        }

        let cutoff = cutoff_threshold(segments);
        self.predictive_results_with_typing_correction(
            self.dictionary,
            "",
            request,
            PredictionTypes::TYPING_CORRECTION,
            cutoff,
            results,
        );
        if results.len() - prev_len >= cutoff {
            results.truncate(prev_len);
        }
    }

    fn predictive_results_with_typing_correction(
        &self,
        dictionary: &dyn Dictionary,
        history_key: &str,
        request: &ConversionRequest<'_>,
        types: PredictionTypes,
        lookup_limit: usize,
        results: &mut Vec<PredictionResult>,
    ) {
        let Some(composer) = request.composer else {
            return;
        };

        let mut remaining = lookup_limit;
        for query in composer.type_corrected_queries() {
            let input_key = format!("{history_key}{}", query.base);
            let prev_len = results.len();
            let subsequent = (!query.expanded.is_empty()).then_some(query.expanded.as_slice());
            let mut callback = PredictiveLookupCallback::new(
                types,
                remaining,
                input_key.len(),
                subsequent,
                false,
                results,
            );
            dictionary.lookup_predictive(&input_key, request, &mut callback);

            for result in results[prev_len..].iter_mut() {
                result.wcost += query.cost;
            }

            let found = results.len() - prev_len;
            match remaining.checked_sub(found) {
                Some(left) if left > 0 => remaining = left,
                _ => break,
            }
        }
    }

    // ----- shared lookup plumbing ----------------------------------------

    #[allow(clippy::too_many_arguments)]
    fn predictive_results(
        &self,
        dictionary: &dyn Dictionary,
        history_key: &str,
        request: &ConversionRequest<'_>,
        segments: &Segments,
        types: PredictionTypes,
        lookup_limit: usize,
        results: &mut Vec<PredictionResult>,
    ) {
        let query_key = segments
            .conversion_segment(0)
            .map(|s| s.key().to_string())
            .unwrap_or_default();

        let use_expansion = request.composer.is_some() && request.config.use_ambiguity_expansion;
        if !use_expansion {
            let input_key = format!("{history_key}{query_key}");
            let mut callback = PredictiveLookupCallback::new(
                types,
                lookup_limit,
                input_key.len(),
                None,
                query_key.is_empty(),
                results,
            );
            dictionary.lookup_predictive(&input_key, request, &mut callback);
            return;
        }

        // With input ambiguity ("あk"), look up the unambiguous base and let
        // the callback admit only the expanded continuations.
        let composer = request.composer.expect("checked above");
        let (base, expanded) = composer.queries_for_prediction();
        let input_key = format!("{history_key}{base}");
        let subsequent = (!expanded.is_empty()).then_some(expanded.as_slice());
        let mut callback = PredictiveLookupCallback::new(
            types,
            lookup_limit,
            input_key.len(),
            subsequent,
            base.is_empty(),
            results,
        );
        dictionary.lookup_predictive(&input_key, request, &mut callback);
    }

    #[allow(clippy::too_many_arguments)]
    fn predictive_results_for_bigram(
        &self,
        dictionary: &dyn Dictionary,
        history_key: &str,
        history_value: &str,
        request: &ConversionRequest<'_>,
        segments: &Segments,
        types: PredictionTypes,
        lookup_limit: usize,
        results: &mut Vec<PredictionResult>,
    ) {
        let query_key = segments
            .conversion_segment(0)
            .map(|s| s.key().to_string())
            .unwrap_or_default();

        let use_expansion = request.composer.is_some() && request.config.use_ambiguity_expansion;
        if !use_expansion {
            let input_key = format!("{history_key}{query_key}");
            let mut callback = BigramLookupCallback::new(
                types,
                lookup_limit,
                input_key.len(),
                None,
                history_value,
                query_key.is_empty(),
                results,
            );
            dictionary.lookup_predictive(&input_key, request, &mut callback);
            return;
        }

        let composer = request.composer.expect("checked above");
        let (base, expanded) = composer.queries_for_prediction();
        let input_key = format!("{history_key}{base}");
        let subsequent = (!expanded.is_empty()).then_some(expanded.as_slice());
        let mut callback = BigramLookupCallback::new(
            types,
            lookup_limit,
            input_key.len(),
            subsequent,
            history_value,
            base.is_empty(),
            results,
        );
        dictionary.lookup_predictive(&input_key, request, &mut callback);
    }
}

/// Per-aggregator result cap. PREDICTION explicitly asks for volume;
/// SUGGESTION must stay cheap because it runs on every keystroke.
pub(super) fn cutoff_threshold(segments: &Segments) -> usize {
    if segments.request_type == RequestType::Prediction {
        settings().limits.prediction_cutoff
    } else {
        settings().limits.suggestion_cutoff
    }
}

/// How many candidates to request from the lattice converter.
fn realtime_candidate_max_size(
    segments: &Segments,
    mixed_conversion: bool,
    max_size: usize,
) -> usize {
    let mut max_size = max_size;
    let mut default_size = 10;
    if let Some(segment) = segments.conversion_segment(0) {
        if segment.key().chars().count() >= FEW_RESULT_KEY_THRESHOLD {
            // Long keys rarely benefit from many realtime alternatives.
            max_size = max_size.min(8);
            default_size = 5;
        }
    }

    let size = match segments.request_type {
        RequestType::Prediction => {
            if mixed_conversion {
                max_size
            } else {
                default_size
            }
        }
        // On mixed conversion, suggestion doubles as the conversion surface
        // and needs conversion-like depth; otherwise one is enough.
        RequestType::Suggestion => {
            if mixed_conversion {
                default_size
            } else {
                1
            }
        }
        // Partial prediction wants richer output than partial suggestion.
        RequestType::PartialPrediction => max_size,
        RequestType::PartialSuggestion => default_size,
        _ => 0,
    };

    size.min(max_size)
}

/// Keep-low-cost / drop-redundant refinement for mixed-conversion unigram.
///
/// Up to `redundancy_trial_max` times: take the cheapest remaining result as
/// a reference and park every result whose value merely extends it at the
/// tail. Afterwards revive the cheapest few parked results. Returns how many
/// results to keep from the front of the vector.
fn partition_redundant_results(results: &mut [PredictionResult]) -> usize {
    let limits = &settings().limits;

    let mut lo = 0;
    let mut hi = results.len();
    for _ in 0..limits.redundancy_trial_max {
        if lo == hi {
            break;
        }
        let min_index = (lo..hi)
            .min_by_key(|&i| results[i].wcost)
            .expect("range non-empty");
        results.swap(lo, min_index);
        let reference_value = results[lo].value.clone();
        lo += 1;

        let mut i = lo;
        while i < hi {
            if results[i].value.starts_with(&reference_value) {
                hi -= 1;
                results.swap(i, hi);
            } else {
                i += 1;
            }
        }
    }

    // [0, lo): references; [lo, hi): untouched; [hi, len): parked.
    let parked = results.len() - hi;
    if parked >= limits.redundancy_revival_max {
        results[hi..].sort_by_key(|result| result.wcost);
        hi + limits.redundancy_revival_max
    } else {
        results.len()
    }
}

/// Materialize table candidates as SUFFIX results, spacing their costs so
/// the table order survives ranking.
fn append_zero_query_results(
    candidates: &[(String, ZeroQueryType)],
    lid: u16,
    rid: u16,
    results: &mut Vec<PredictionResult>,
) {
    let step = settings().cost.zero_query_cost_step;
    for (index, (value, zero_query_type)) in candidates.iter().enumerate() {
        let mut result = PredictionResult {
            key: value.clone(),
            value: value.clone(),
            wcost: index as i32 * step,
            lid,
            rid,
            ..PredictionResult::default()
        };
        result
            .set_types_and_token_attributes(PredictionTypes::SUFFIX, crate::dict::TokenAttrs::empty());
        result.set_zero_query_source(*zero_query_type);
        results.push(result);
    }
}
