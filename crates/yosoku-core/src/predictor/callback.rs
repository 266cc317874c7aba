//! Lookup callbacks feeding the aggregation stage.
//!
//! `PredictiveLookupCallback` accumulates tokens into the shared result
//! vector; `BigramLookupCallback` wraps it (composition, not inheritance)
//! adding the history-value prefix filter; `FindValueCallback` answers
//! "does this key have exactly this value" probes.

use crate::dict::{LookupCallback, Token, Traverse};
use crate::settings::settings;

use super::result::{PredictionResult, PredictionTypes};
use super::zero_query::ZeroQueryType;

pub(super) struct PredictiveLookupCallback<'a> {
    types: PredictionTypes,
    /// Penalty carried from the most recent `on_actual_key`, applied to
    /// every token under that key.
    penalty: i32,
    limit: usize,
    /// Byte length of the lookup key, for slicing off the matched prefix.
    original_key_len: usize,
    /// Accepted continuations after the base key, from ambiguity expansion.
    /// Rarely more than ten entries, so a linear scan beats building a trie.
    subsequent_chars: Option<&'a [String]>,
    is_zero_query: bool,
    results: &'a mut Vec<PredictionResult>,
}

impl<'a> PredictiveLookupCallback<'a> {
    pub fn new(
        types: PredictionTypes,
        limit: usize,
        original_key_len: usize,
        subsequent_chars: Option<&'a [String]>,
        is_zero_query: bool,
        results: &'a mut Vec<PredictionResult>,
    ) -> Self {
        PredictiveLookupCallback {
            types,
            penalty: 0,
            limit,
            original_key_len,
            subsequent_chars,
            is_zero_query,
            results,
        }
    }
}

impl LookupCallback for PredictiveLookupCallback<'_> {
    fn on_key(&mut self, key: &str) -> Traverse {
        let Some(subsequent) = self.subsequent_chars else {
            return Traverse::Continue;
        };
        // Check that the part of |key| after the original lookup key starts
        // with one of the accepted expansions. For base "へ" and key "へんじ",
        // traversal continues only when "ん", "んじ", ... is accepted.
        let rest = key.get(self.original_key_len..).unwrap_or("");
        if subsequent.iter().any(|s| rest.starts_with(s.as_str())) {
            Traverse::Continue
        } else {
            Traverse::NextKey
        }
    }

    fn on_actual_key(&mut self, _key: &str, _actual_key: &str, is_expanded: bool) -> Traverse {
        self.penalty = if is_expanded {
            settings().cost.kana_modifier_insensitive_penalty
        } else {
            0
        };
        Traverse::Continue
    }

    fn on_token(&mut self, _key: &str, _actual_key: &str, token: &Token) -> Traverse {
        let mut result = PredictionResult::from_token(token, self.types);
        result.wcost += self.penalty;
        if self.is_zero_query && self.types.contains(PredictionTypes::SUFFIX) {
            result.set_zero_query_source(ZeroQueryType::Suffix);
        }
        self.results.push(result);
        if self.results.len() < self.limit {
            Traverse::Continue
        } else {
            Traverse::Done
        }
    }
}

/// Predictive lookup restricted to continuations of the committed history
/// value. Tokens whose value is not a strict extension of it are skipped
/// before they reach the inner callback.
pub(super) struct BigramLookupCallback<'a> {
    inner: PredictiveLookupCallback<'a>,
    history_value: &'a str,
}

impl<'a> BigramLookupCallback<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        types: PredictionTypes,
        limit: usize,
        original_key_len: usize,
        subsequent_chars: Option<&'a [String]>,
        history_value: &'a str,
        is_zero_query: bool,
        results: &'a mut Vec<PredictionResult>,
    ) -> Self {
        BigramLookupCallback {
            inner: PredictiveLookupCallback::new(
                types,
                limit,
                original_key_len,
                subsequent_chars,
                is_zero_query,
                results,
            ),
            history_value,
        }
    }
}

impl LookupCallback for BigramLookupCallback<'_> {
    fn on_key(&mut self, key: &str) -> Traverse {
        self.inner.on_key(key)
    }

    fn on_actual_key(&mut self, key: &str, actual_key: &str, is_expanded: bool) -> Traverse {
        self.inner.on_actual_key(key, actual_key, is_expanded)
    }

    fn on_token(&mut self, key: &str, actual_key: &str, token: &Token) -> Traverse {
        if !token.value.starts_with(self.history_value)
            || token.value.len() <= self.history_value.len()
        {
            return Traverse::Continue;
        }
        let control = self.inner.on_token(key, actual_key, token);
        if self.inner.is_zero_query {
            if let Some(result) = self.inner.results.last_mut() {
                result.set_zero_query_source(ZeroQueryType::Bigram);
            }
        }
        control
    }
}

/// Stops at the first token whose value equals the target.
pub(super) struct FindValueCallback<'a> {
    target_value: &'a str,
    token: Option<Token>,
}

impl<'a> FindValueCallback<'a> {
    pub fn new(target_value: &'a str) -> Self {
        FindValueCallback {
            target_value,
            token: None,
        }
    }

    pub fn found(&self) -> bool {
        self.token.is_some()
    }

    pub fn into_token(self) -> Option<Token> {
        self.token
    }
}

impl LookupCallback for FindValueCallback<'_> {
    fn on_token(&mut self, _key: &str, _actual_key: &str, token: &Token) -> Traverse {
        if token.value != self.target_value {
            return Traverse::Continue;
        }
        self.token = Some(token.clone());
        Traverse::Done
    }
}
