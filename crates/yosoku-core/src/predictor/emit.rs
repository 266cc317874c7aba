//! Heap-based candidate emission.
//!
//! Builds a min-heap over final cost once (linear time) and pops at most
//! `max_prediction_candidates` entries, so the 100k-result worst case never
//! pays for a full sort.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};

use crate::request::ConversionRequest;
use crate::segments::{Candidate, CandidateAttrs, Segments};
use crate::settings::settings;

use super::cost::miss_spelled_position;
use super::result::{PredictionResult, PredictionTypes, INFINITY_COST};
use super::DictionaryPredictor;

impl DictionaryPredictor<'_> {
    /// Pop results in ascending cost order and append the survivors to the
    /// first conversion segment. Returns whether anything was emitted.
    pub(super) fn add_prediction_to_candidates(
        &self,
        request: &ConversionRequest<'_>,
        segments: &mut Segments,
        results: &mut Vec<PredictionResult>,
    ) -> bool {
        let mixed_conversion = request.is_mixed_conversion();
        let input_key = segments
            .conversion_segment(0)
            .map(|s| s.key().to_string())
            .unwrap_or_default();
        let input_key_chars = input_key.chars().count();

        let (history_key, history_value) = self.history_key_value(segments).unwrap_or_default();
        // For exact matching only, so without ambiguity expansion.
        let exact_bigram_key = format!("{history_key}{input_key}");

        let emit_limit = segments.max_prediction_candidates.min(results.len());
        let suffix_limit = settings().limits.suffix_candidates_max;
        let cursor_at_tail = request
            .composer
            .map(|c| c.cursor() == c.length())
            .unwrap_or(false);

        let mut heap: BinaryHeap<Reverse<(i32, usize)>> = results
            .iter()
            .enumerate()
            .map(|(index, result)| Reverse((result.cost, index)))
            .collect();

        let mut added = 0;
        let mut added_suffix = 0;
        let mut seen_values = HashSet::new();

        while let Some(Reverse((cost, index))) = heap.pop() {
            if added >= emit_limit || cost >= INFINITY_COST {
                break;
            }

            let result = &results[index];
            if result.is_dead() {
                continue;
            }

            // Mixed conversion already demoted filtered words by cost, and
            // the exact key's candidates double as the conversion surface,
            // so the hard drop only applies off-key in non-mixed mode.
            if !mixed_conversion
                && result.key != input_key
                && self.suggestion_filter.is_bad_suggestion(&result.value)
            {
                continue;
            }

            // Suggesting exactly what the user typed is useless on desktop.
            if !mixed_conversion
                && !result.types.contains(PredictionTypes::REALTIME)
                && ((result.types.contains(PredictionTypes::BIGRAM)
                    && exact_bigram_key == result.value)
                    || (!result.types.contains(PredictionTypes::BIGRAM)
                        && input_key == result.value))
            {
                continue;
            }

            // Bigram results carry the history prefix internally; only the
            // continuation is shown.
            let (key, value) = if result.types.contains(PredictionTypes::BIGRAM) {
                (
                    result.key.get(history_key.len()..).unwrap_or("").to_string(),
                    result
                        .value
                        .get(history_value.len()..)
                        .unwrap_or("")
                        .to_string(),
                )
            } else {
                (result.key.clone(), result.value.clone())
            };

            if !seen_values.insert(value.clone()) {
                continue;
            }

            // A spelling correction only helps while the user has not typed
            // past the point where the spellings diverge.
            // input "おーすとり" (5 chars), key/value "おーすとりら" /
            // "オーストラリア" (divergence at 4): keep. One more typed
            // character and it is dropped.
            if result
                .candidate_attributes
                .contains(CandidateAttrs::SPELLING_CORRECTION)
                && key != input_key
                && input_key_chars <= miss_spelled_position(&key, &value) + 1
            {
                continue;
            }

            if result.types == PredictionTypes::SUFFIX {
                added_suffix += 1;
                if added_suffix > suffix_limit {
                    continue;
                }
            }

            let mut candidate = Candidate {
                key: key.clone(),
                value: value.clone(),
                content_key: key,
                content_value: value,
                lid: result.lid,
                rid: result.rid,
                wcost: result.wcost,
                cost: result.cost,
                attributes: result.candidate_attributes,
                source_info: result.source_info,
                ..Candidate::default()
            };

            if (!candidate
                .attributes
                .contains(CandidateAttrs::SPELLING_CORRECTION)
                && request.is_latin_input_mode())
                || result.types.contains(PredictionTypes::SUFFIX)
            {
                candidate.attributes |=
                    CandidateAttrs::NO_VARIANTS_EXPANSION | CandidateAttrs::NO_EXTRA_DESCRIPTION;
            }

            if candidate
                .attributes
                .contains(CandidateAttrs::PARTIALLY_KEY_CONSUMED)
            {
                candidate.consumed_key_size = result.consumed_key_size;
                // A partial result with the cursor at the composition tail
                // was produced by auto partial suggestion rather than by the
                // user moving the cursor.
                if cursor_at_tail {
                    candidate.attributes |= CandidateAttrs::AUTO_PARTIAL_SUGGESTION;
                }
            }

            if result.types.contains(PredictionTypes::REALTIME) {
                candidate.inner_segment_boundary = result.inner_segment_boundary.clone();
            }
            if result.types.contains(PredictionTypes::TYPING_CORRECTION) {
                candidate.attributes |= CandidateAttrs::TYPING_CORRECTION;
            }

            set_description(result.types, candidate.attributes, &mut candidate.description);
            #[cfg(debug_assertions)]
            set_debug_description(result.types, &mut candidate.description);

            if let Some(segment) = segments.mutable_conversion_segment(0) {
                segment.push_candidate(candidate);
            }
            added += 1;
        }

        added > 0
    }
}

fn append_description(description: &mut String, text: &str) {
    if !description.is_empty() {
        description.push(' ');
    }
    description.push_str(text);
}

fn set_description(types: PredictionTypes, attributes: CandidateAttrs, description: &mut String) {
    if types.contains(PredictionTypes::TYPING_CORRECTION) {
        append_description(description, "補正");
    }
    if attributes.contains(CandidateAttrs::AUTO_PARTIAL_SUGGESTION) {
        append_description(description, "部分");
    }
}

/// Compact per-type mnemonic shown in debug builds.
#[cfg(debug_assertions)]
fn set_debug_description(types: PredictionTypes, description: &mut String) {
    let mut mnemonic = String::new();
    if types.contains(PredictionTypes::UNIGRAM) {
        mnemonic.push('U');
    }
    if types.contains(PredictionTypes::BIGRAM) {
        mnemonic.push('B');
    }
    if types.contains(PredictionTypes::REALTIME_TOP) {
        mnemonic.push_str("R1");
    } else if types.contains(PredictionTypes::REALTIME) {
        mnemonic.push('R');
    }
    if types.contains(PredictionTypes::SUFFIX) {
        mnemonic.push('S');
    }
    if types.contains(PredictionTypes::ENGLISH) {
        mnemonic.push('E');
    }
    // TYPING_CORRECTION is already described by set_description.
    if !mnemonic.is_empty() {
        append_description(description, &mnemonic);
    }
}
