//! Final-cost assignment and result filtering.
//!
//! Two formulas share `lm_cost`: the desktop one discounts longer keys by
//! the typing they save, the mixed-conversion one favors exact-length
//! matches and rebases bigram continuations on a default transition.

use crate::request::ConversionRequest;
use crate::segments::{CandidateAttrs, RequestType, Segments};
use crate::settings::settings;
use crate::unicode::{self, Script};

use super::result::{PredictionResult, PredictionTypes, INFINITY_COST};
use super::DictionaryPredictor;

/// Aggressive-suggestion guard: a sentence-length completion of a short
/// query is suppressed unless the candidate pool is tiny or the candidate
/// itself is very frequent.
const AGGRESSIVE_MIN_TOTAL_CANDIDATES: usize = 10;
const AGGRESSIVE_MIN_KEY_CHARS: usize = 8;
const AGGRESSIVE_MIN_COST: i32 = 5000;
const AGGRESSIVE_QUERY_RATIO: f64 = 0.4;

impl DictionaryPredictor<'_> {
    pub(super) fn set_cost(
        &self,
        request: &ConversionRequest<'_>,
        segments: &Segments,
        results: &mut [PredictionResult],
    ) {
        if request.is_mixed_conversion() {
            self.set_mixed_conversion_cost(segments, results);
        } else {
            self.set_prediction_cost(segments, results);
        }

        self.apply_key_expansion_penalty(segments, results);
    }

    pub(super) fn remove_prediction(
        &self,
        request: &ConversionRequest<'_>,
        segments: &Segments,
        results: &mut [PredictionResult],
    ) {
        if request.is_mixed_conversion() {
            // Spelling correction is not offered on mixed conversion, so the
            // miss-spelled de-dup has nothing to do.
            return;
        }
        let input_key_chars = segments
            .conversion_segment(0)
            .map(|s| s.key().chars().count())
            .unwrap_or(0);
        remove_miss_spelled_candidates(input_key_chars, results);
    }

    /// Word cost plus the cheaper of the real and the BOS transition.
    ///
    /// Taking the minimum guards against degenerate transition rows that
    /// would otherwise demote perfectly common words after certain history.
    pub(super) fn lm_cost(&self, result: &PredictionResult, rid: u16) -> i32 {
        let history_transition = self.connector.transition_cost(rid, result.lid);
        let bos_transition = self.connector.transition_cost(0, result.lid);
        let mut lm_cost = history_transition.min(bos_transition) + result.wcost;
        if !result.types.contains(PredictionTypes::REALTIME) {
            // Realtime conversion already carries its boundary penalties.
            lm_cost += self.segmenter.suffix_penalty(result.rid);
        }
        lm_cost
    }

    /// Desktop formula: `cost = lm_cost - 500 * ln(1 + saved_chars)`, where
    /// `saved_chars` is how much typing the candidate saves over the query.
    /// Keeping the discount key-length-only keeps prediction consistent with
    /// conversion: same key, same relative order.
    fn set_prediction_cost(&self, segments: &Segments, results: &mut [PredictionResult]) {
        let rid = segments
            .last_history_segment()
            .and_then(|s| s.candidate(0))
            .map(|c| c.rid)
            .unwrap_or(0);

        let input_key = segments
            .conversion_segment(0)
            .map(|s| s.key().to_string())
            .unwrap_or_default();
        let (history_key, _) = self.history_key_value(segments).unwrap_or_default();
        let bigram_key = format!("{history_key}{input_key}");
        let bigram_key_chars = bigram_key.chars().count();
        let unigram_key_chars = input_key.chars().count();
        let is_suggestion = segments.request_type == RequestType::Suggestion;
        let total = results.len();
        let cost_factor = settings().cost.cost_factor as f64;

        let mut realtime_cost_min = INFINITY_COST;
        let mut realtime_top_index = None;
        for index in 0..results.len() {
            if results[index].types.contains(PredictionTypes::REALTIME_TOP) {
                // Its cost is pinned after the loop, below the realtime
                // minimum found here.
                realtime_top_index = Some(index);
                continue;
            }

            let lm_cost = self.lm_cost(&results[index], rid);
            let query_chars = if results[index].types.contains(PredictionTypes::BIGRAM) {
                bigram_key_chars
            } else {
                unigram_key_chars
            };
            let key_chars = results[index].key.chars().count();

            if is_aggressive_suggestion(query_chars, key_chars, lm_cost, is_suggestion, total) {
                results[index].cost = INFINITY_COST;
                continue;
            }

            let saved_chars = key_chars.saturating_sub(query_chars);
            results[index].cost =
                (lm_cost as f64 - cost_factor * (1.0 + saved_chars as f64).ln()) as i32;

            if results[index].types.contains(PredictionTypes::REALTIME)
                && results[index].cost < realtime_cost_min
                && results[index].key.len() == input_key.len()
            {
                realtime_cost_min = results[index].cost;
            }
        }

        if let Some(index) = realtime_top_index {
            results[index].cost = (realtime_cost_min - settings().cost.realtime_top_margin).max(0);
        }
    }

    /// Mixed-conversion formula, tuned for suggestion-as-conversion clients.
    fn set_mixed_conversion_cost(&self, segments: &Segments, results: &mut [PredictionResult]) {
        let cost_settings = &settings().cost;

        let mut rid = 0;
        let mut prev_cost = 0;
        if let Some(candidate) = segments.last_history_segment().and_then(|s| s.candidate(0)) {
            rid = candidate.rid;
            prev_cost = candidate.cost;
            if prev_cost == 0 {
                prev_cost = cost_settings.default_history_cost;
            }
        }

        let input_key_chars = segments
            .conversion_segment(0)
            .map(|s| s.key().chars().count())
            .unwrap_or(0);

        for result in results.iter_mut() {
            let mut cost = self.lm_cost(result, rid);

            // Filtered words are not dropped for exact matches, but they
            // must never rank high.
            if self.suggestion_filter.is_bad_suggestion(&result.value) {
                cost += cost_settings.bad_suggestion_penalty;
            }

            // Exact-length matches first: on these clients suggestion is the
            // primary surface and users look for the key they typed.
            if result
                .types
                .intersects(PredictionTypes::UNIGRAM | PredictionTypes::TYPING_CORRECTION)
                && result.key.chars().count() > input_key_chars
            {
                cost += cost_settings.not_exact_penalty;
            }

            // The boundary between history and continuation has no usable
            // transition, so rebase on a default noun-noun transition and a
            // continuation bonus instead of the committed candidate's cost.
            if result.types.contains(PredictionTypes::BIGRAM) {
                cost += cost_settings.bigram_default_transition - cost_settings.bigram_bonus
                    - prev_cost;
            }

            result.cost = cost;
        }
    }

    /// Demote results whose key came from an ambiguity-expansion branch
    /// rather than what the user literally typed.
    fn apply_key_expansion_penalty(&self, segments: &Segments, results: &mut [PredictionResult]) {
        let Some(segment) = segments.conversion_segment(0) else {
            return;
        };
        let conversion_key = segment.key();
        let penalty = settings().cost.key_expansion_penalty;
        for result in results.iter_mut() {
            if result.types.contains(PredictionTypes::TYPING_CORRECTION) {
                continue;
            }
            if !result.key.starts_with(conversion_key) {
                result.cost += penalty;
            }
        }
    }
}

fn is_aggressive_suggestion(
    query_chars: usize,
    key_chars: usize,
    cost: i32,
    is_suggestion: bool,
    total_candidates: usize,
) -> bool {
    is_suggestion
        && total_candidates >= AGGRESSIVE_MIN_TOTAL_CANDIDATES
        && key_chars >= AGGRESSIVE_MIN_KEY_CHARS
        && cost >= AGGRESSIVE_MIN_COST
        && query_chars <= (AGGRESSIVE_QUERY_RATIO * key_chars as f64) as usize
}

/// First character position where the value (normalized to hiragana)
/// diverges from the key, or the key length when they agree.
pub(super) fn miss_spelled_position(key: &str, value: &str) -> usize {
    let hiragana_value = unicode::katakana_to_hiragana(value);
    // Mixed-script values have no usable per-character alignment.
    if unicode::script_type(&hiragana_value) != Script::Hiragana {
        return key.chars().count();
    }

    let mut position = 0;
    let mut key_chars = key.chars();
    for value_char in hiragana_value.chars() {
        match key_chars.next() {
            Some(key_char) => {
                if key_char != value_char {
                    return position;
                }
                position += 1;
            }
            None => break,
        }
    }
    position + key_chars.count()
}

/// De-duplicate spelling-corrected results against their correctly-spelled
/// peers. Scans a bounded number of corrected results so a pathological set
/// where everything is a correction stays cheap.
pub(super) fn remove_miss_spelled_candidates(
    request_key_chars: usize,
    results: &mut [PredictionResult],
) {
    if results.len() <= 1 {
        return;
    }

    let mut scan_budget = settings().limits.spelling_correction_scan_max;
    for index in 0..results.len() {
        if !results[index]
            .candidate_attributes
            .contains(CandidateAttrs::SPELLING_CORRECTION)
        {
            continue;
        }

        scan_budget -= 1;
        if scan_budget == 0 {
            return;
        }

        let mut same_key_peers = Vec::new();
        let mut same_value_peers = Vec::new();
        for (peer_index, peer) in results.iter().enumerate() {
            if peer_index == index
                || peer
                    .candidate_attributes
                    .contains(CandidateAttrs::SPELLING_CORRECTION)
            {
                continue;
            }
            if peer.key == results[index].key {
                same_key_peers.push(peer_index);
            }
            if peer.value == results[index].value {
                same_value_peers.push(peer_index);
            }
        }

        match (!same_key_peers.is_empty(), !same_value_peers.is_empty()) {
            (true, true) => {
                results[index].kill();
                for peer_index in same_key_peers {
                    results[peer_index].kill();
                }
            }
            (false, true) => results[index].kill(),
            (true, false) => {
                for &peer_index in &same_key_peers {
                    results[peer_index].kill();
                }
                if request_key_chars
                    <= miss_spelled_position(&results[index].key, &results[index].value)
                {
                    results[index].kill();
                }
            }
            (false, false) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spelling_corrected(key: &str, value: &str) -> PredictionResult {
        PredictionResult {
            key: key.to_string(),
            value: value.to_string(),
            types: PredictionTypes::UNIGRAM,
            candidate_attributes: CandidateAttrs::SPELLING_CORRECTION,
            ..PredictionResult::default()
        }
    }

    fn plain(key: &str, value: &str) -> PredictionResult {
        PredictionResult {
            key: key.to_string(),
            value: value.to_string(),
            types: PredictionTypes::UNIGRAM,
            ..PredictionResult::default()
        }
    }

    #[test]
    fn test_miss_spelled_position() {
        // Key diverges from the hiragana reading of the value at index 4.
        assert_eq!(miss_spelled_position("おーすとりら", "オーストラリア"), 4);
        assert_eq!(miss_spelled_position("すいか", "スイカ"), 3);
        assert_eq!(miss_spelled_position("すいか", "すいんか"), 2);
        // Mixed-script value: position is the key length.
        assert_eq!(miss_spelled_position("とうきょう", "東京"), 5);
        assert_eq!(miss_spelled_position("", "すいか"), 0);
    }

    #[test]
    fn test_aggressive_suggestion_boundary() {
        // 4 <= 0.4 * 10, so a 4-char query completing to 10 chars fires.
        assert!(is_aggressive_suggestion(4, 10, 6000, true, 20));
        assert!(!is_aggressive_suggestion(5, 10, 6000, true, 20));
        // Cheap candidates and small pools are allowed through.
        assert!(!is_aggressive_suggestion(4, 10, 4000, true, 20));
        assert!(!is_aggressive_suggestion(4, 10, 6000, true, 5));
        assert!(!is_aggressive_suggestion(4, 10, 6000, false, 20));
        assert!(!is_aggressive_suggestion(4, 7, 6000, true, 20));
    }

    #[test]
    fn test_remove_miss_spelled_same_key_and_value_peers() {
        let mut results = vec![
            spelling_corrected("ばっぐ", "バッグ"),
            plain("ばっぐ", "バッグ"),
            plain("ばっく", "バッグ"),
        ];
        remove_miss_spelled_candidates(3, &mut results);
        // Same-key and same-value peers exist: the correction and its
        // same-key peer die, the same-value-only peer survives.
        assert!(results[0].is_dead());
        assert!(results[1].is_dead());
        assert!(!results[2].is_dead());
    }

    #[test]
    fn test_remove_miss_spelled_value_only_peer() {
        let mut results = vec![
            spelling_corrected("てすと", "テスト"),
            plain("てST", "テスト"),
        ];
        remove_miss_spelled_candidates(3, &mut results);
        assert!(results[0].is_dead());
        assert!(!results[1].is_dead());
    }

    #[test]
    fn test_remove_miss_spelled_key_only_peer() {
        // Correction "すいか"→"スイガ" shares a key with the plain "スイカ".
        let mut results = vec![
            spelling_corrected("すいか", "スイガ"),
            plain("すいか", "スイカ"),
        ];
        remove_miss_spelled_candidates(3, &mut results);
        // Same-key peer dies; miss_spelled_position("すいか","スイガ") = 2
        // < request length 3, so the correction itself survives.
        assert!(!results[0].is_dead());
        assert!(results[1].is_dead());

        let mut results = vec![
            spelling_corrected("すい", "スイガ"),
            plain("すい", "スイカ"),
        ];
        remove_miss_spelled_candidates(2, &mut results);
        // Now the divergence is at/after the typed length: both die.
        assert!(results[0].is_dead());
        assert!(results[1].is_dead());
    }

    #[test]
    fn test_remove_miss_spelled_scan_budget() {
        // More corrections than the scan budget: later ones are left alone.
        let mut results = Vec::new();
        for i in 0..8 {
            results.push(spelling_corrected(&format!("きー{i}"), &format!("ちがう{i}")));
            results.push(plain(&format!("きー{i}"), &format!("あう{i}")));
        }
        remove_miss_spelled_candidates(1, &mut results);
        let killed = results.iter().filter(|r| r.is_dead()).count();
        // Each processed correction kills its same-key peer (and possibly
        // itself); with a budget of 5 only 4 corrections are processed.
        assert!(killed > 0);
        assert!(!results[14].is_dead() && !results[15].is_dead());
    }

    #[test]
    fn test_single_result_untouched() {
        let mut results = vec![spelling_corrected("すいか", "スイガ")];
        remove_miss_spelled_candidates(3, &mut results);
        assert!(!results[0].is_dead());
    }
}
