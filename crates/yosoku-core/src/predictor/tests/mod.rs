mod emission;

use crate::converter::{Converter, ImmutableConverter, Segmenter};
use crate::dict::{
    Connector, Dictionary, LookupCallback, Token, TokenAttrs, Traverse,
};
use crate::filter::WordSetFilter;
use crate::request::{
    Composer, ConversionRequest, InputMode, TypeCorrectedQuery,
};
use crate::segments::{Candidate, RequestType, Segment, Segments};
use crate::stats::InMemoryStats;

use super::DictionaryPredictor;

pub(super) const COUNTER_SUFFIX_WORD_ID: u16 = 2585;

// ---------------------------------------------------------------------------
// Mock dictionary honoring the callback traversal protocol
// ---------------------------------------------------------------------------

pub(super) struct MockDictionary {
    /// (key, tokens) pairs, sorted by key.
    entries: Vec<(String, Vec<Token>)>,
}

impl MockDictionary {
    pub fn new(mut entries: Vec<(String, Vec<Token>)>) -> Self {
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        MockDictionary { entries }
    }

    pub fn empty() -> Self {
        MockDictionary {
            entries: Vec::new(),
        }
    }

    fn run_callback(
        entries: &[(String, Vec<Token>)],
        callback: &mut dyn LookupCallback,
    ) {
        'keys: for (entry_key, tokens) in entries {
            match callback.on_key(entry_key) {
                Traverse::Continue => {}
                Traverse::NextKey | Traverse::Cull => continue,
                Traverse::Done => break,
            }
            match callback.on_actual_key(entry_key, entry_key, false) {
                Traverse::Done => break,
                _ => {}
            }
            for token in tokens {
                match callback.on_token(entry_key, entry_key, token) {
                    Traverse::Continue => {}
                    Traverse::NextKey | Traverse::Cull => continue 'keys,
                    Traverse::Done => return,
                }
            }
        }
    }
}

impl Dictionary for MockDictionary {
    fn lookup_predictive(
        &self,
        key: &str,
        _request: &ConversionRequest<'_>,
        callback: &mut dyn LookupCallback,
    ) {
        let matched: Vec<_> = self
            .entries
            .iter()
            .filter(|(entry_key, _)| entry_key.starts_with(key))
            .cloned()
            .collect();
        Self::run_callback(&matched, callback);
    }

    fn lookup_prefix(
        &self,
        key: &str,
        _request: &ConversionRequest<'_>,
        callback: &mut dyn LookupCallback,
    ) {
        let matched: Vec<_> = self
            .entries
            .iter()
            .filter(|(entry_key, _)| key.starts_with(entry_key.as_str()))
            .cloned()
            .collect();
        Self::run_callback(&matched, callback);
    }

    fn has_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(entry_key, _)| entry_key == key)
    }

    fn has_value(&self, value: &str) -> bool {
        self.entries
            .iter()
            .any(|(_, tokens)| tokens.iter().any(|t| t.value == value))
    }
}

pub(super) fn token(key: &str, value: &str, cost: i32, lid: u16, rid: u16) -> Token {
    Token {
        key: key.to_string(),
        value: value.to_string(),
        cost,
        lid,
        rid,
        attributes: TokenAttrs::empty(),
    }
}

/// System dictionary shared by most scenarios.
pub(super) fn make_system_dict() -> MockDictionary {
    MockDictionary::new(vec![
        (
            "ぐーぐる".to_string(),
            vec![token("ぐーぐる", "グーグル", 3000, 10, 10)],
        ),
        (
            "ぐーぐるあーす".to_string(),
            vec![token("ぐーぐるあーす", "グーグルアース", 4500, 10, 10)],
        ),
        (
            "ぐーぐるあどせんす".to_string(),
            vec![token("ぐーぐるあどせんす", "グーグルアドセンス", 4000, 10, 10)],
        ),
        (
            "あどせんす".to_string(),
            vec![token("あどせんす", "アドセンス", 4500, 10, 10)],
        ),
        (
            "あーす".to_string(),
            vec![token("あーす", "アース", 4800, 10, 10)],
        ),
        (
            "てすと".to_string(),
            vec![token("てすと", "テスト", 4000, 20, 20)],
        ),
        (
            "てすとだい".to_string(),
            vec![token("てすとだい", "テスト台", 4600, 20, 20)],
        ),
        (
            "いん".to_string(),
            vec![token("いん", "イン", 3000, 10, 10)],
        ),
        (
            "いんたーねっと".to_string(),
            vec![token("いんたーねっと", "インターネット", 4000, 10, 10)],
        ),
        (
            "converge".to_string(),
            vec![token("converge", "converge", 3000, 30, 30)],
        ),
        (
            "converged".to_string(),
            vec![token("converged", "converged", 3500, 30, 30)],
        ),
        (
            "convergent".to_string(),
            vec![token("convergent", "convergent", 4000, 30, 30)],
        ),
    ])
}

/// Suffix dictionary with particle/auxiliary continuations.
pub(super) fn make_suffix_dict() -> MockDictionary {
    MockDictionary::new(vec![
        ("です".to_string(), vec![token("です", "です", 2000, 40, 40)]),
        ("ます".to_string(), vec![token("ます", "ます", 2500, 40, 40)]),
        (
            "かもしれません".to_string(),
            vec![token("かもしれません", "かもしれません", 5000, 40, 40)],
        ),
    ])
}

// ---------------------------------------------------------------------------
// Scripted converters
// ---------------------------------------------------------------------------

/// Actual-converter stand-in: publishes a fixed list of converted segments.
pub(super) struct ScriptedConverter {
    /// (key, value, cost, lid, rid) per output segment.
    pub segments: Vec<(String, String, i32, u16, u16)>,
    pub succeed: bool,
}

impl ScriptedConverter {
    pub fn failing() -> Self {
        ScriptedConverter {
            segments: Vec::new(),
            succeed: false,
        }
    }
}

impl Converter for ScriptedConverter {
    fn start_conversion_for_request(
        &self,
        _request: &ConversionRequest<'_>,
        segments: &mut Segments,
    ) -> bool {
        if !self.succeed {
            return false;
        }
        let converted = self
            .segments
            .iter()
            .map(|(key, value, cost, lid, rid)| {
                let mut segment = Segment::new(key.clone());
                segment.push_candidate(Candidate {
                    key: key.clone(),
                    value: value.clone(),
                    content_key: key.clone(),
                    content_value: value.clone(),
                    cost: *cost,
                    lid: *lid,
                    rid: *rid,
                    ..Candidate::default()
                });
                segment
            })
            .collect();
        segments.set_conversion_segments(converted);
        true
    }
}

/// Immutable-converter stand-in: appends scripted candidates to the first
/// conversion segment, respecting the prediction cap like the real one.
pub(super) struct ScriptedImmutableConverter {
    pub candidates: Vec<Candidate>,
    pub succeed: bool,
}

impl ScriptedImmutableConverter {
    pub fn with_values(key: &str, values: &[&str]) -> Self {
        let candidates = values
            .iter()
            .enumerate()
            .map(|(i, value)| Candidate {
                key: key.to_string(),
                value: value.to_string(),
                content_key: key.to_string(),
                content_value: value.to_string(),
                wcost: 5000 + 100 * i as i32,
                lid: 5,
                rid: 5,
                ..Candidate::default()
            })
            .collect();
        ScriptedImmutableConverter {
            candidates,
            succeed: true,
        }
    }

    pub fn failing() -> Self {
        ScriptedImmutableConverter {
            candidates: Vec::new(),
            succeed: false,
        }
    }
}

impl ImmutableConverter for ScriptedImmutableConverter {
    fn convert_for_request(
        &self,
        _request: &ConversionRequest<'_>,
        segments: &mut Segments,
    ) -> bool {
        if !self.succeed {
            return false;
        }
        let cap = segments.max_prediction_candidates;
        let Some(segment) = segments.mutable_conversion_segment(0) else {
            return false;
        };
        for candidate in &self.candidates {
            if segment.candidates_len() >= cap {
                break;
            }
            segment.push_candidate(candidate.clone());
        }
        true
    }
}

// ---------------------------------------------------------------------------
// Connector / segmenter / composer stand-ins
// ---------------------------------------------------------------------------

/// Sparse transition table; unlisted pairs cost zero.
#[derive(Default)]
pub(super) struct TableConnector {
    pub costs: std::collections::HashMap<(u16, u16), i32>,
}

impl Connector for TableConnector {
    fn transition_cost(&self, rid: u16, lid: u16) -> i32 {
        self.costs.get(&(rid, lid)).copied().unwrap_or(0)
    }
}

#[derive(Default)]
pub(super) struct FlatSegmenter {
    pub penalty: i32,
}

impl Segmenter for FlatSegmenter {
    fn suffix_penalty(&self, _rid: u16) -> i32 {
        self.penalty
    }
}

#[derive(Default)]
pub(super) struct TestComposer {
    pub mode: InputMode,
    pub query: String,
    pub cursor: usize,
    pub length: usize,
    pub base: String,
    pub expanded: Vec<String>,
    pub corrected: Vec<TypeCorrectedQuery>,
}

impl TestComposer {
    pub fn with_query(query: &str) -> Self {
        let length = query.chars().count();
        TestComposer {
            query: query.to_string(),
            base: query.to_string(),
            cursor: length,
            length,
            ..TestComposer::default()
        }
    }
}

impl Composer for TestComposer {
    fn input_mode(&self) -> InputMode {
        self.mode
    }
    fn cursor(&self) -> usize {
        self.cursor
    }
    fn length(&self) -> usize {
        self.length
    }
    fn query_for_prediction(&self) -> String {
        self.query.clone()
    }
    fn queries_for_prediction(&self) -> (String, Vec<String>) {
        (self.base.clone(), self.expanded.clone())
    }
    fn type_corrected_queries(&self) -> Vec<TypeCorrectedQuery> {
        self.corrected.clone()
    }
}

// ---------------------------------------------------------------------------
// Predictor assembly
// ---------------------------------------------------------------------------

pub(super) struct TestStack {
    pub dictionary: MockDictionary,
    pub suffix_dictionary: MockDictionary,
    pub converter: ScriptedConverter,
    pub immutable_converter: ScriptedImmutableConverter,
    pub connector: TableConnector,
    pub segmenter: FlatSegmenter,
    pub filter: WordSetFilter,
    pub stats: InMemoryStats,
}

impl Default for TestStack {
    fn default() -> Self {
        TestStack {
            dictionary: make_system_dict(),
            suffix_dictionary: make_suffix_dict(),
            converter: ScriptedConverter::failing(),
            immutable_converter: ScriptedImmutableConverter::failing(),
            connector: TableConnector::default(),
            segmenter: FlatSegmenter::default(),
            filter: WordSetFilter::default(),
            stats: InMemoryStats::default(),
        }
    }
}

impl TestStack {
    pub fn predictor(&self) -> DictionaryPredictor<'_> {
        DictionaryPredictor::new(
            &self.converter,
            &self.immutable_converter,
            &self.dictionary,
            &self.suffix_dictionary,
            &self.connector,
            &self.segmenter,
            &self.filter,
            &self.stats,
            COUNTER_SUFFIX_WORD_ID,
        )
    }
}

// ---------------------------------------------------------------------------
// Segments helpers
// ---------------------------------------------------------------------------

pub(super) fn make_segments(request_type: RequestType, key: &str) -> Segments {
    let mut segments = Segments::new(request_type);
    segments.add_conversion_segment(Segment::new(key));
    segments
}

pub(super) fn add_history(segments: &mut Segments, key: &str, value: &str) {
    let mut segment = Segment::new(key);
    segment.push_candidate(Candidate {
        key: key.to_string(),
        value: value.to_string(),
        content_key: key.to_string(),
        content_value: value.to_string(),
        ..Candidate::default()
    });
    segments.add_history_segment(segment);
}

pub(super) fn emitted_values(segments: &Segments) -> Vec<String> {
    segments
        .conversion_segment(0)
        .map(|segment| {
            segment
                .candidates()
                .iter()
                .map(|c| c.value.clone())
                .collect()
        })
        .unwrap_or_default()
}

pub(super) fn candidate_by_value<'a>(segments: &'a Segments, value: &str) -> Option<&'a Candidate> {
    segments
        .conversion_segment(0)?
        .candidates()
        .iter()
        .find(|c| c.value == value)
}

// Re-exported so scenario modules can assert on attributes tersely.
pub(super) use crate::segments::CandidateAttrs as Attrs;
