use layerloc_core::text::escape_newlines;
use layerloc_core::{TextTarget, TranslationSet};

pub mod pseudo;

pub use pseudo::{apply_ratio, is_valid_ratio, pseudo_localize, pseudo_str, MAX_RATIO_PERCENT};

/// First translation whose source matches `text` and whose target is
/// non-empty, scanning every key and plural variant in set order.
///
/// Sources match exactly or by their exported form, with line breaks written
/// as literal `\n`. Imported XLIFF sources have `\n` turned back into line
/// feeds, so a layer that really contains a backslash followed by `n` still
/// finds its unit.
pub fn find_target<'t>(text: &str, set: &'t TranslationSet) -> Option<&'t str> {
    if text.is_empty() {
        return None;
    }
    let exported = escape_newlines(text);
    set.units()
        .filter(|u| u.source == text || escape_newlines(&u.source) == exported)
        .find_map(|u| u.translated())
}

/// Rewrite every layer whose current text matches a translation source, then
/// resize it to fit. Layers without a match are left as they are.
///
/// Matching is on text, not on keys: keys are regenerated on every export,
/// while source text is stable. When two units share a source, the first one
/// in set order wins. Returns the number of layers changed.
pub fn apply<'l, T>(layers: impl IntoIterator<Item = &'l mut T>, set: &TranslationSet) -> usize
where
    T: TextTarget + ?Sized + 'l,
{
    let mut changed = 0usize;
    let mut seen = 0usize;
    for layer in layers {
        seen += 1;
        let Some(target) = find_target(layer.text(), set) else {
            continue;
        };
        let target = target.to_string();
        layer.set_text(target);
        layer.adjust_to_fit();
        changed += 1;
    }
    tracing::debug!(event = "translations_applied", layers = seen, changed = changed);
    changed
}

/// Pseudo-localize every layer's text with `ratio_percent` length scaling,
/// resizing each one. Returns the number of layers whose text changed.
pub fn pseudo_localize_layers<'l, T>(
    layers: impl IntoIterator<Item = &'l mut T>,
    ratio_percent: f64,
) -> usize
where
    T: TextTarget + ?Sized + 'l,
{
    let mut changed = 0usize;
    for layer in layers {
        let next = pseudo_localize(layer.text(), ratio_percent);
        if next != layer.text() {
            changed += 1;
        }
        layer.set_text(next);
        layer.adjust_to_fit();
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use layerloc_core::{Frame, TextLayer, TranslationUnit};

    fn layer(text: &str) -> TextLayer {
        TextLayer {
            id: text.into(),
            name: String::new(),
            text: text.into(),
            frame: Frame::new(0.0, 0.0, 1.0, 1.0),
            font_size: 10.0,
        }
    }

    fn set(entries: &[(&str, &str, Option<&str>)]) -> TranslationSet {
        let mut s = TranslationSet::new();
        for (key, source, target) in entries {
            s.push(*key, TranslationUnit::new(*source, *target));
        }
        s
    }

    #[test]
    fn first_match_in_set_order_wins() {
        let translations = set(&[
            ("A-0", "Hello", Some("Bonjour")),
            ("B-0", "Hello", Some("Hola")),
        ]);
        let mut layers = vec![layer("Hello")];
        assert_eq!(apply(layers.iter_mut(), &translations), 1);
        assert_eq!(layers[0].text, "Bonjour");
    }

    #[test]
    fn unmatched_layers_are_untouched() {
        let translations = set(&[("A-0", "Hello", Some("Bonjour"))]);
        let mut layers = vec![layer("Goodbye")];
        assert_eq!(apply(layers.iter_mut(), &translations), 0);
        assert_eq!(layers[0].text, "Goodbye");
        assert_eq!(layers[0].frame, Frame::new(0.0, 0.0, 1.0, 1.0));
    }

    #[test]
    fn empty_or_missing_target_falls_through_to_next_unit() {
        let translations = set(&[
            ("A-0", "Hello", None),
            ("B-0", "Hello", Some("")),
            ("C-0", "Hello", Some("Ciao")),
        ]);
        assert_eq!(find_target("Hello", &translations), Some("Ciao"));
    }

    #[test]
    fn plural_variants_are_scanned() {
        let translations = set(&[
            ("items", "1 item", Some("1 objet")),
            ("items", "2 items", Some("2 objets")),
        ]);
        let mut layers = vec![layer("2 items"), layer("1 item")];
        apply(layers.iter_mut(), &translations);
        assert_eq!(layers[0].text, "2 objets");
        assert_eq!(layers[1].text, "1 objet");
    }

    #[test]
    fn match_is_exact() {
        let translations = set(&[("A-0", "Hello", Some("Bonjour"))]);
        assert_eq!(find_target("hello", &translations), None);
        assert_eq!(find_target("Hello ", &translations), None);
    }

    #[test]
    fn literal_backslash_n_matches_unescaped_source() {
        // XLIFF import turns the exported `\n` back into a line feed
        let imported = set(&[("A-0", "Line\nBreak", Some("Ligne\nCoupure"))]);
        assert_eq!(find_target("Line\\nBreak", &imported), Some("Ligne\nCoupure"));
        assert_eq!(find_target("Line\nBreak", &imported), Some("Ligne\nCoupure"));
        assert_eq!(find_target("Line Break", &imported), None);
    }

    #[test]
    fn empty_layer_text_never_matches() {
        let translations = set(&[("A-0", "", Some("Vide"))]);
        assert_eq!(find_target("", &translations), None);
    }

    #[test]
    fn translated_layers_are_resized() {
        let translations = set(&[("A-0", "Hi", Some("Bonjour"))]);
        let mut layers = vec![layer("Hi")];
        apply(layers.iter_mut(), &translations);
        assert!((layers[0].frame.width - 42.0).abs() < 1e-9);
    }

    #[test]
    fn pseudo_localize_layers_rewrites_all_text() {
        let mut layers = vec![layer("Save"), layer("{count}")];
        let changed = pseudo_localize_layers(layers.iter_mut(), 100.0);
        assert_eq!(changed, 1);
        assert_eq!(layers[0].text, "Şȧṽḗ");
        assert_eq!(layers[1].text, "{count}");
    }
}
