//! Zero-query candidate tables.
//!
//! Two static sorted tables map a committed history value (or a digit run)
//! to follow-up candidates: emoji/emoticon reactions and counter suffixes.
//! The tables are binary-searched by key; emoji entries are expanded
//! according to the carriers the client declared.

use bitflags::bitflags;

use crate::request::{ConversionRequest, EmojiCarriers};

pub(super) mod data;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZeroQueryType {
    None,
    NumberSuffix,
    Emoticon,
    Emoji,
    Bigram,
    Suffix,
}

bitflags! {
    /// Which carrier glyph sets an emoji entry exists in.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct EmojiPlatforms: u8 {
        const UNICODE = 1 << 0;
        const DOCOMO = 1 << 1;
        const SOFTBANK = 1 << 2;
        const KDDI = 1 << 3;
    }
}

pub(super) struct ZeroQueryEntry {
    pub entry_type: ZeroQueryType,
    /// UTF-8 value; for carrier-only emoji this may be empty and the PUA
    /// code point is used instead.
    pub value: &'static str,
    pub platforms: EmojiPlatforms,
    /// Android private-use-area code point for carrier emoji.
    pub android_pua: u32,
}

pub(super) struct ZeroQueryRule {
    pub key: &'static str,
    pub entries: &'static [ZeroQueryEntry],
}

/// Look up `key` in a sorted rule table and expand the matching entries for
/// the request's emoji carriers. Returns an empty vector when the key has no
/// rule or every entry was filtered out.
pub(super) fn candidates_for_key(
    request: &ConversionRequest<'_>,
    key: &str,
    rules: &[ZeroQueryRule],
) -> Vec<(String, ZeroQueryType)> {
    let carriers = request.request.available_emoji_carriers;

    let Ok(index) = rules.binary_search_by(|rule| rule.key.cmp(key)) else {
        return Vec::new();
    };

    let mut candidates = Vec::new();
    for entry in rules[index].entries {
        if entry.entry_type != ZeroQueryType::Emoji {
            candidates.push((entry.value.to_string(), entry.entry_type));
            continue;
        }
        if carriers.contains(EmojiCarriers::UNICODE)
            && entry.platforms.contains(EmojiPlatforms::UNICODE)
        {
            candidates.push((entry.value.to_string(), entry.entry_type));
            continue;
        }
        let carrier_match = (carriers.contains(EmojiCarriers::DOCOMO)
            && entry.platforms.contains(EmojiPlatforms::DOCOMO))
            || (carriers.contains(EmojiCarriers::SOFTBANK)
                && entry.platforms.contains(EmojiPlatforms::SOFTBANK))
            || (carriers.contains(EmojiCarriers::KDDI)
                && entry.platforms.contains(EmojiPlatforms::KDDI));
        if carrier_match {
            if let Some(pua) = char::from_u32(entry.android_pua) {
                candidates.push((pua.to_string(), entry.entry_type));
            }
        }
    }
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::ClientRequest;

    fn request_with_carriers(carriers: EmojiCarriers) -> ConversionRequest<'static> {
        ConversionRequest {
            request: ClientRequest {
                available_emoji_carriers: carriers,
                ..ClientRequest::default()
            },
            ..ConversionRequest::default()
        }
    }

    #[test]
    fn tables_are_sorted_for_binary_search() {
        for table in [data::ZERO_QUERY_RULES, data::ZERO_QUERY_NUMBER_RULES] {
            for pair in table.windows(2) {
                assert!(pair[0].key < pair[1].key, "table out of order at {}", pair[1].key);
            }
        }
    }

    #[test]
    fn test_number_rule_lookup() {
        let request = request_with_carriers(EmojiCarriers::empty());
        let candidates = candidates_for_key(&request, "12", data::ZERO_QUERY_NUMBER_RULES);
        assert!(candidates.iter().any(|(value, _)| value == "月"));
        assert!(candidates
            .iter()
            .all(|(_, entry_type)| *entry_type == ZeroQueryType::NumberSuffix));

        let default = candidates_for_key(&request, "default", data::ZERO_QUERY_NUMBER_RULES);
        assert!(!default.is_empty());
    }

    #[test]
    fn test_missing_key_yields_nothing() {
        let request = request_with_carriers(EmojiCarriers::all());
        assert!(candidates_for_key(&request, "99", data::ZERO_QUERY_NUMBER_RULES).is_empty());
        assert!(candidates_for_key(&request, "そんなきーはない", data::ZERO_QUERY_RULES).is_empty());
    }

    #[test]
    fn test_emoji_carrier_filtering() {
        // ありがとう carries a Unicode emoji entry plus an emoticon.
        let none = request_with_carriers(EmojiCarriers::empty());
        let candidates = candidates_for_key(&none, "ありがとう", data::ZERO_QUERY_RULES);
        assert!(candidates
            .iter()
            .all(|(_, entry_type)| *entry_type != ZeroQueryType::Emoji));

        let unicode = request_with_carriers(EmojiCarriers::UNICODE);
        let candidates = candidates_for_key(&unicode, "ありがとう", data::ZERO_QUERY_RULES);
        assert!(candidates
            .iter()
            .any(|(_, entry_type)| *entry_type == ZeroQueryType::Emoji));
    }

    #[test]
    fn test_carrier_emoji_uses_pua_codepoint() {
        let docomo = request_with_carriers(EmojiCarriers::DOCOMO);
        let candidates = candidates_for_key(&docomo, "おめでとう", data::ZERO_QUERY_RULES);
        let emoji: Vec<_> = candidates
            .iter()
            .filter(|(_, entry_type)| *entry_type == ZeroQueryType::Emoji)
            .collect();
        assert!(!emoji.is_empty());
        for (value, _) in emoji {
            let c = value.chars().next().unwrap();
            assert!(('\u{FE000}'..='\u{FEFFF}').contains(&c), "expected PUA, got {value}");
        }
    }
}
