//! Per-request inputs: client feature block, user config, and the composer
//! seam supplying prediction queries.

use bitflags::bitflags;

/// Transliteration mode the composer is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Hiragana,
    Katakana,
    HalfKatakana,
    HalfAscii,
    FullAscii,
}

/// Which key the converter should read from the composer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeySelection {
    #[default]
    Conversion,
    Prediction,
}

bitflags! {
    /// Emoji carriers the client can render.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct EmojiCarriers: u8 {
        const UNICODE = 1 << 0;
        const DOCOMO = 1 << 1;
        const SOFTBANK = 1 << 2;
        const KDDI = 1 << 3;
    }
}

/// A typing-corrected lookup query: corrected base, ambiguity expansions of
/// its tail, and the cost of assuming the correction.
#[derive(Debug, Clone, Default)]
pub struct TypeCorrectedQuery {
    pub base: String,
    pub expanded: Vec<String>,
    pub cost: i32,
}

/// Composer state consumed by the predictor. The composition engine itself
/// lives upstream; prediction only reads queries out of it.
pub trait Composer {
    fn input_mode(&self) -> InputMode;

    /// Cursor position in characters.
    fn cursor(&self) -> usize;

    /// Composition length in characters.
    fn length(&self) -> usize;

    /// The plain query for prediction (reading up to the cursor).
    fn query_for_prediction(&self) -> String;

    /// The query split into an unambiguous base plus the expansion set of its
    /// trailing ambiguity ("あk" → "あ" + {"か", "き", ...}).
    fn queries_for_prediction(&self) -> (String, Vec<String>);

    /// Typing-corrected variants of the query, each with a correction cost.
    fn type_corrected_queries(&self) -> Vec<TypeCorrectedQuery>;
}

/// Client-side feature block attached to every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClientRequest {
    pub mixed_conversion: bool,
    pub zero_query_suggestion: bool,
    pub available_emoji_carriers: EmojiCarriers,
    pub special_romanji_table: bool,
}

/// User configuration consumed by prediction.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    pub use_dictionary_suggest: bool,
    pub use_realtime_conversion: bool,
    pub use_typing_correction: bool,
    pub use_kana_modifier_insensitive_conversion: bool,
    pub use_ambiguity_expansion: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            use_dictionary_suggest: true,
            use_realtime_conversion: false,
            use_typing_correction: false,
            use_kana_modifier_insensitive_conversion: false,
            use_ambiguity_expansion: false,
        }
    }
}

/// Everything a single prediction call needs besides the segments.
#[derive(Clone)]
pub struct ConversionRequest<'a> {
    pub composer: Option<&'a dyn Composer>,
    pub request: ClientRequest,
    pub config: Config,
    pub use_actual_converter_for_realtime_conversion: bool,
    pub composer_key_selection: KeySelection,
    pub skip_slow_rewriters: bool,
    pub create_partial_candidates: bool,
}

impl Default for ConversionRequest<'_> {
    fn default() -> Self {
        ConversionRequest {
            composer: None,
            request: ClientRequest::default(),
            config: Config::default(),
            use_actual_converter_for_realtime_conversion: false,
            composer_key_selection: KeySelection::default(),
            skip_slow_rewriters: false,
            create_partial_candidates: true,
        }
    }
}

impl<'a> ConversionRequest<'a> {
    pub fn with_composer(composer: &'a dyn Composer) -> Self {
        ConversionRequest {
            composer: Some(composer),
            ..ConversionRequest::default()
        }
    }

    pub fn is_mixed_conversion(&self) -> bool {
        self.request.mixed_conversion
    }

    /// Half- or full-width ASCII composition.
    pub fn is_latin_input_mode(&self) -> bool {
        matches!(
            self.composer.map(|c| c.input_mode()),
            Some(InputMode::HalfAscii) | Some(InputMode::FullAscii)
        )
    }
}
