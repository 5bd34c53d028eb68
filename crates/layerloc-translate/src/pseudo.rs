//! Pseudo-localization: accented look-alike letters plus length padding, so
//! layouts can be checked for truncation and glyph coverage before real
//! translations exist.

pub use layerloc_core::MAX_PSEUDO_RATIO as MAX_RATIO_PERCENT;
use regex::Regex;
use std::sync::OnceLock;

/// Character appended when a ratio grows the text.
const PAD_CHAR: char = '~';

fn placeholder_re() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| {
        // %name%, {name} / {0}, printf-style %s %d %1$@ %.2f
        Regex::new(r"%[A-Za-z_][A-Za-z0-9_]*%|\{[^{}]*\}|%(?:\d+\$)?[-+ 0#]*\d*(?:\.\d+)?[a-zA-Z@]")
            .expect("placeholder regex is valid")
    })
}

fn accent(c: char) -> char {
    match c {
        'a' => 'ȧ',
        'A' => 'Ȧ',
        'b' => 'ƀ',
        'B' => 'Ɓ',
        'c' => 'ƈ',
        'C' => 'Ƈ',
        'd' => 'ḓ',
        'D' => 'Ḓ',
        'e' => 'ḗ',
        'E' => 'Ḗ',
        'f' => 'ƒ',
        'F' => 'Ƒ',
        'g' => 'ɠ',
        'G' => 'Ɠ',
        'h' => 'ħ',
        'H' => 'Ħ',
        'i' => 'ī',
        'I' => 'Ī',
        'j' => 'ĵ',
        'J' => 'Ĵ',
        'k' => 'ķ',
        'K' => 'Ķ',
        'l' => 'ŀ',
        'L' => 'Ŀ',
        'm' => 'ḿ',
        'M' => 'Ḿ',
        'n' => 'ƞ',
        'N' => 'Ƞ',
        'o' => 'ǿ',
        'O' => 'Ǿ',
        'p' => 'ƥ',
        'P' => 'Ƥ',
        'q' => 'ɋ',
        'Q' => 'Ɋ',
        'r' => 'ř',
        'R' => 'Ř',
        's' => 'ş',
        'S' => 'Ş',
        't' => 'ŧ',
        'T' => 'Ŧ',
        'u' => 'ŭ',
        'U' => 'Ŭ',
        'v' => 'ṽ',
        'V' => 'Ṽ',
        'w' => 'ẇ',
        'W' => 'Ẇ',
        'x' => 'ẋ',
        'X' => 'Ẋ',
        'y' => 'ẏ',
        'Y' => 'Ẏ',
        'z' => 'ẑ',
        'Z' => 'Ẑ',
        other => other,
    }
}

/// Swap ASCII letters for accented look-alikes. Placeholders pass through.
pub fn pseudo_str(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    let mut last = 0;
    for m in placeholder_re().find_iter(text) {
        out.extend(text[last..m.start()].chars().map(accent));
        out.push_str(m.as_str());
        last = m.end();
    }
    out.extend(text[last..].chars().map(accent));
    out
}

/// Whether `ratio_percent` is a usable length ratio: finite, positive and at
/// most [`MAX_RATIO_PERCENT`].
pub fn is_valid_ratio(ratio_percent: f64) -> bool {
    ratio_percent.is_finite() && ratio_percent > 0.0 && ratio_percent <= MAX_RATIO_PERCENT
}

/// Scale the length of `text` to `round(chars * ratio)` characters: pad with
/// `~` when growing, cut from the end when shrinking. Non-empty text keeps at
/// least one character. Non-positive or non-finite ratios leave it unchanged,
/// and ratios above `MAX_RATIO_PERCENT / 100` are clamped to it.
pub fn apply_ratio(text: &str, ratio: f64) -> String {
    if !ratio.is_finite() || ratio <= 0.0 {
        return text.to_string();
    }
    let ratio = ratio.min(MAX_RATIO_PERCENT / 100.0);
    let len = text.chars().count();
    if len == 0 {
        return String::new();
    }
    let target = ((len as f64 * ratio).round() as usize).max(1);
    if target >= len {
        let pad = target.saturating_sub(len);
        let mut out = String::with_capacity(text.len().saturating_add(pad));
        out.push_str(text);
        out.extend(std::iter::repeat(PAD_CHAR).take(pad));
        out
    } else {
        text.chars().take(target).collect()
    }
}

/// Accent then scale; `ratio_percent` is a percentage (100 keeps length).
pub fn pseudo_localize(text: &str, ratio_percent: f64) -> String {
    apply_ratio(&pseudo_str(text), ratio_percent / 100.0)
}
