//! Static zero-query tables, sorted by key for binary search.
//!
//! Produced offline from commit logs; the values here are the trimmed
//! shipping set. Keep each table sorted by byte order when editing.

use super::{EmojiPlatforms, ZeroQueryEntry, ZeroQueryRule, ZeroQueryType};

const NONE: EmojiPlatforms = EmojiPlatforms::empty();
const UNI: EmojiPlatforms = EmojiPlatforms::UNICODE;
const ALL_CARRIERS: EmojiPlatforms = EmojiPlatforms::DOCOMO
    .union(EmojiPlatforms::SOFTBANK)
    .union(EmojiPlatforms::KDDI);
const UNI_AND_CARRIERS: EmojiPlatforms = UNI.union(ALL_CARRIERS);

const fn emoticon(value: &'static str) -> ZeroQueryEntry {
    ZeroQueryEntry {
        entry_type: ZeroQueryType::Emoticon,
        value,
        platforms: NONE,
        android_pua: 0,
    }
}

const fn emoji(
    value: &'static str,
    platforms: EmojiPlatforms,
    android_pua: u32,
) -> ZeroQueryEntry {
    ZeroQueryEntry {
        entry_type: ZeroQueryType::Emoji,
        value,
        platforms,
        android_pua,
    }
}

const fn number_suffix(value: &'static str) -> ZeroQueryEntry {
    ZeroQueryEntry {
        entry_type: ZeroQueryType::NumberSuffix,
        value,
        platforms: NONE,
        android_pua: 0,
    }
}

/// History-value keyed reactions.
pub(in crate::predictor) static ZERO_QUERY_RULES: &[ZeroQueryRule] = &[
    ZeroQueryRule {
        key: "あけましておめでとう",
        entries: &[
            emoji("🎍", UNI_AND_CARRIERS, 0xFE03C),
            emoticon("(^o^)/"),
            emoticon("m(_ _)m"),
        ],
    },
    ZeroQueryRule {
        key: "ありがとう",
        entries: &[
            emoji("😊", UNI_AND_CARRIERS, 0xFE330),
            emoticon("(^^)"),
            emoticon("m(_ _)m"),
        ],
    },
    ZeroQueryRule {
        key: "おつかれさま",
        entries: &[emoticon("(^^)/"), emoji("🍵", UNI, 0)],
    },
    ZeroQueryRule {
        key: "おはよう",
        entries: &[
            emoji("☀", UNI_AND_CARRIERS, 0xFE000),
            emoticon("(^o^)"),
        ],
    },
    ZeroQueryRule {
        key: "おめでとう",
        entries: &[
            emoji("🎉", ALL_CARRIERS, 0xFE31F),
            emoticon("\\(^o^)/"),
        ],
    },
    ZeroQueryRule {
        key: "こんにちは",
        entries: &[emoticon("(^_^)/"), emoji("👋", UNI, 0)],
    },
    ZeroQueryRule {
        key: "こんばんは",
        entries: &[
            emoji("🌙", UNI_AND_CARRIERS, 0xFE014),
            emoticon("(^_^)/"),
        ],
    },
    ZeroQueryRule {
        key: "さようなら",
        entries: &[emoticon("(;_;)/~~~"), emoji("👋", UNI, 0)],
    },
    ZeroQueryRule {
        key: "すごい",
        entries: &[emoticon("(*_*)"), emoji("✨", UNI_AND_CARRIERS, 0xFE32E)],
    },
    ZeroQueryRule {
        key: "よろしく",
        entries: &[emoticon("m(_ _)m"), emoji("🙏", UNI, 0)],
    },
];

/// Digit-run keyed counter suffixes. "default" applies to any number
/// history; digit-specific keys add the readings that only make sense for
/// that value (month and day-of-month ranges, clock hours).
pub(in crate::predictor) static ZERO_QUERY_NUMBER_RULES: &[ZeroQueryRule] = &[
    ZeroQueryRule {
        key: "1",
        entries: &[
            number_suffix("月"),
            number_suffix("日"),
            number_suffix("時"),
            number_suffix("番"),
        ],
    },
    ZeroQueryRule {
        key: "10",
        entries: &[
            number_suffix("月"),
            number_suffix("日"),
            number_suffix("時"),
        ],
    },
    ZeroQueryRule {
        key: "11",
        entries: &[
            number_suffix("月"),
            number_suffix("日"),
            number_suffix("時"),
        ],
    },
    ZeroQueryRule {
        key: "12",
        entries: &[
            number_suffix("月"),
            number_suffix("日"),
            number_suffix("時"),
            number_suffix("分"),
        ],
    },
    ZeroQueryRule {
        key: "2",
        entries: &[
            number_suffix("月"),
            number_suffix("日"),
            number_suffix("時"),
        ],
    },
    ZeroQueryRule {
        key: "3",
        entries: &[
            number_suffix("月"),
            number_suffix("日"),
            number_suffix("時"),
        ],
    },
    ZeroQueryRule {
        key: "4",
        entries: &[
            number_suffix("月"),
            number_suffix("日"),
            number_suffix("時"),
        ],
    },
    ZeroQueryRule {
        key: "5",
        entries: &[
            number_suffix("月"),
            number_suffix("日"),
            number_suffix("時"),
        ],
    },
    ZeroQueryRule {
        key: "6",
        entries: &[
            number_suffix("月"),
            number_suffix("日"),
            number_suffix("時"),
        ],
    },
    ZeroQueryRule {
        key: "7",
        entries: &[
            number_suffix("月"),
            number_suffix("日"),
            number_suffix("時"),
        ],
    },
    ZeroQueryRule {
        key: "8",
        entries: &[
            number_suffix("月"),
            number_suffix("日"),
            number_suffix("時"),
        ],
    },
    ZeroQueryRule {
        key: "9",
        entries: &[
            number_suffix("月"),
            number_suffix("日"),
            number_suffix("時"),
        ],
    },
    ZeroQueryRule {
        key: "default",
        entries: &[
            number_suffix("個"),
            number_suffix("円"),
            number_suffix("人"),
            number_suffix("回"),
            number_suffix("分"),
            number_suffix("年"),
        ],
    },
];
