//! Global ranking/capacity settings loaded from TOML.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::sync::OnceLock;

use serde::Deserialize;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub cost: CostSettings,
    pub limits: LimitSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CostSettings {
    /// The -500 of -500*ln(prob); scales the typing-savings discount.
    pub cost_factor: i32,
    /// Added to candidates reached through an ambiguity-expanded key.
    pub key_expansion_penalty: i32,
    /// Added to unigram/typing-correction results longer than the input key.
    pub not_exact_penalty: i32,
    /// Added to values the suggestion filter flags (mixed conversion only).
    pub bad_suggestion_penalty: i32,
    /// Stand-in transition cost when the bigram boundary has no history rid.
    pub bigram_default_transition: i32,
    /// Promotion applied to bigram continuations.
    pub bigram_bonus: i32,
    /// Used when the committed history candidate carries no cost.
    pub default_history_cost: i32,
    /// How far below the cheapest same-length realtime result the top
    /// conversion result is pinned.
    pub realtime_top_margin: i32,
    /// Cost spacing between consecutive zero-query table entries.
    pub zero_query_cost_step: i32,
    /// Added when a token was reached through kana-modifier-insensitive
    /// expansion.
    pub kana_modifier_insensitive_penalty: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LimitSettings {
    pub suggestion_cutoff: usize,
    pub prediction_cutoff: usize,
    pub suffix_candidates_max: usize,
    pub spelling_correction_scan_max: usize,
    pub redundancy_trial_max: usize,
    pub redundancy_revival_max: usize,
    pub typing_correction_results_guard: usize,
    pub realtime_key_bytes_max: usize,
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_non_negative {
        ($section:ident . $field:ident) => {
            if s.$section.$field < 0 {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must be non-negative".to_string(),
                });
            }
        };
    }
    macro_rules! check_positive_usize {
        ($section:ident . $field:ident) => {
            if s.$section.$field == 0 {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must be positive".to_string(),
                });
            }
        };
    }

    check_non_negative!(cost.cost_factor);
    check_non_negative!(cost.key_expansion_penalty);
    check_non_negative!(cost.not_exact_penalty);
    check_non_negative!(cost.bad_suggestion_penalty);
    check_non_negative!(cost.bigram_default_transition);
    check_non_negative!(cost.bigram_bonus);
    check_non_negative!(cost.default_history_cost);
    check_non_negative!(cost.realtime_top_margin);
    check_non_negative!(cost.zero_query_cost_step);
    check_non_negative!(cost.kana_modifier_insensitive_penalty);

    check_positive_usize!(limits.suggestion_cutoff);
    check_positive_usize!(limits.prediction_cutoff);
    check_positive_usize!(limits.suffix_candidates_max);
    check_positive_usize!(limits.spelling_correction_scan_max);
    check_positive_usize!(limits.redundancy_trial_max);
    check_positive_usize!(limits.typing_correction_results_guard);
    check_positive_usize!(limits.realtime_key_bytes_max);

    if s.limits.suggestion_cutoff > s.limits.prediction_cutoff {
        return Err(SettingsError::InvalidValue {
            field: "limits.suggestion_cutoff".to_string(),
            reason: "must not exceed limits.prediction_cutoff".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_default_toml() {
        let s = parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap();
        assert_eq!(s.cost.cost_factor, 500);
        assert_eq!(s.cost.key_expansion_penalty, 1151);
        assert_eq!(s.cost.not_exact_penalty, 1956);
        assert_eq!(s.cost.bad_suggestion_penalty, 3453);
        assert_eq!(s.cost.bigram_default_transition, 1347);
        assert_eq!(s.cost.bigram_bonus, 800);
        assert_eq!(s.cost.default_history_cost, 5000);
        assert_eq!(s.cost.realtime_top_margin, 10);
        assert_eq!(s.cost.zero_query_cost_step, 10);
        assert_eq!(s.cost.kana_modifier_insensitive_penalty, 3000);
        assert_eq!(s.limits.suggestion_cutoff, 256);
        assert_eq!(s.limits.prediction_cutoff, 100_000);
        assert_eq!(s.limits.suffix_candidates_max, 20);
        assert_eq!(s.limits.spelling_correction_scan_max, 5);
        assert_eq!(s.limits.redundancy_trial_max, 5);
        assert_eq!(s.limits.redundancy_revival_max, 5);
        assert_eq!(s.limits.typing_correction_results_guard, 10_000);
        assert_eq!(s.limits.realtime_key_bytes_max, 300);
    }

    #[test]
    fn error_negative_penalty() {
        let toml = DEFAULT_SETTINGS_TOML.replace(
            "key_expansion_penalty = 1151",
            "key_expansion_penalty = -1",
        );
        let err = parse_settings_toml(&toml).unwrap_err();
        assert!(err.to_string().contains("cost.key_expansion_penalty"));
    }

    #[test]
    fn error_zero_cutoff() {
        let toml = DEFAULT_SETTINGS_TOML.replace("suggestion_cutoff = 256", "suggestion_cutoff = 0");
        let err = parse_settings_toml(&toml).unwrap_err();
        assert!(err.to_string().contains("limits.suggestion_cutoff"));
    }

    #[test]
    fn error_cutoff_ordering() {
        let toml =
            DEFAULT_SETTINGS_TOML.replace("suggestion_cutoff = 256", "suggestion_cutoff = 200000");
        let err = parse_settings_toml(&toml).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidValue { .. }));
    }

    #[test]
    fn error_invalid_toml() {
        let err = parse_settings_toml("not valid toml {{{").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn error_missing_section() {
        let err = parse_settings_toml("[cost]\ncost_factor = 500\n").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }
}
