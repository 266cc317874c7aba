//! Character-level Unicode classification for Japanese text.

/// Check the full Hiragana block (U+3040..U+309F). This includes a few unassigned
/// codepoints (U+3040, U+3097-3098) but these never appear in IME input or
/// dictionary readings, so the simpler block-level check is preferred over an
/// exact range.
pub fn is_hiragana(c: char) -> bool {
    ('\u{3040}'..='\u{309F}').contains(&c)
}

/// Check the full Katakana block (U+30A0..U+30FF). Includes rarely-used symbols
/// (゠ U+30A0, ヿ U+30FF) and the prolonged sound mark ー.
pub fn is_katakana(c: char) -> bool {
    ('\u{30A0}'..='\u{30FF}').contains(&c)
}

pub fn is_kanji(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
        || ('\u{3400}'..='\u{4DBF}').contains(&c)
        || ('\u{20000}'..='\u{2A6DF}').contains(&c)
}

/// ASCII or full-width (Ａ-Ｚ, ａ-ｚ) Latin letter.
pub fn is_latin(c: char) -> bool {
    c.is_ascii_alphabetic()
        || ('\u{FF21}'..='\u{FF3A}').contains(&c)
        || ('\u{FF41}'..='\u{FF5A}').contains(&c)
}

/// ASCII or full-width (０-９) arabic digit.
pub fn is_arabic_digit(c: char) -> bool {
    c.is_ascii_digit() || ('\u{FF10}'..='\u{FF19}').contains(&c)
}

/// Script class of a character or a whole string.
///
/// `Unknown` covers everything outside the four classes as well as
/// mixed-script strings and the empty string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Script {
    Hiragana,
    Katakana,
    Kanji,
    Number,
    Alphabet,
    Unknown,
}

pub fn char_script(c: char) -> Script {
    if is_hiragana(c) {
        Script::Hiragana
    } else if is_katakana(c) {
        Script::Katakana
    } else if is_kanji(c) {
        Script::Kanji
    } else if is_arabic_digit(c) {
        Script::Number
    } else if is_latin(c) {
        Script::Alphabet
    } else {
        Script::Unknown
    }
}

/// Script class of a whole string: the shared class of every character, or
/// `Unknown` when the string is empty or mixes classes.
///
/// The prolonged sound mark ー belongs to the katakana block but appears in
/// hiragana readings too ("らーめん"), so it never breaks the class of its
/// neighbors; a string of only ー is katakana.
pub fn script_type(s: &str) -> Script {
    let mut script = None;
    let mut saw_prolonged_mark = false;
    for c in s.chars() {
        if c == 'ー' {
            saw_prolonged_mark = true;
            continue;
        }
        let class = char_script(c);
        if class == Script::Unknown {
            return Script::Unknown;
        }
        match script {
            None => script = Some(class),
            Some(current) if current != class => return Script::Unknown,
            Some(_) => {}
        }
    }
    match script {
        Some(class) => class,
        None if saw_prolonged_mark => Script::Katakana,
        None => Script::Unknown,
    }
}

/// Convert a hiragana string to katakana.
/// Non-hiragana characters (ー, ASCII, etc.) are passed through unchanged.
pub fn hiragana_to_katakana(s: &str) -> String {
    s.chars()
        .map(|c| {
            if ('\u{3041}'..='\u{3096}').contains(&c) {
                char::from_u32(c as u32 + 0x60).unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}

/// Convert a katakana string to hiragana.
/// Katakana without a hiragana counterpart (ヴ..ヶ beyond U+30F6, ー) pass through.
pub fn katakana_to_hiragana(s: &str) -> String {
    s.chars()
        .map(|c| {
            if ('\u{30A1}'..='\u{30F6}').contains(&c) {
                char::from_u32(c as u32 - 0x60).unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}

/// Normalize full-width ASCII (！..～, ideographic space) to half-width.
pub fn full_width_to_half_width(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '\u{3000}' => ' ',
            '\u{FF01}'..='\u{FF5E}' => char::from_u32(c as u32 - 0xFEE0).unwrap_or(c),
            _ => c,
        })
        .collect()
}

/// Convert half-width ASCII (! .. ~, space) to full-width.
pub fn half_width_to_full_width(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            ' ' => '\u{3000}',
            '!'..='~' => char::from_u32(c as u32 + 0xFEE0).unwrap_or(c),
            _ => c,
        })
        .collect()
}

/// Check whether a string is a non-empty run of arabic digits
/// (half-width or full-width).
pub fn is_arabic_number(s: &str) -> bool {
    !s.is_empty() && s.chars().all(is_arabic_digit)
}

/// All-uppercase ASCII, e.g. "CONV".
pub fn is_upper_ascii(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_uppercase())
}

/// Capitalized ASCII: one uppercase letter followed by lowercase, e.g. "Conv".
pub fn is_capitalized_ascii(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_uppercase() => chars.all(|c| c.is_ascii_lowercase()),
        _ => false,
    }
}

/// Uppercase the first character and lowercase the rest.
pub fn capitalize_ascii(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_ascii_uppercase()
            .to_string()
            + &chars.as_str().to_ascii_lowercase(),
        None => String::new(),
    }
}
