use indexmap::IndexMap;
use layerloc_core::{LayerLocError, TranslationSet, TranslationUnit, DIRECTIVES_KEY};
use serde::Deserialize;

/// A key maps to a list of plural variants; a bare object is one variant.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawGroup {
    Variants(Vec<TranslationUnit>),
    Single(TranslationUnit),
}

/// Parse the vendor JSON payload: `{ key: [ {source, target?}, ... ] }`.
///
/// The export directive key is skipped so a file produced by the JSON
/// exporter and filled in by a translator can be read back.
pub fn parse_translations(bytes: &[u8]) -> Result<TranslationSet, LayerLocError> {
    let raw: IndexMap<String, serde_json::Value> = serde_json::from_slice(bytes)
        .map_err(|e| LayerLocError::InvalidTranslations(e.to_string()))?;

    let mut set = TranslationSet::new();
    for (key, value) in raw {
        if key == DIRECTIVES_KEY {
            continue;
        }
        let group: RawGroup = serde_json::from_value(value)
            .map_err(|e| LayerLocError::InvalidTranslations(format!("{key}: {e}")))?;
        match group {
            RawGroup::Variants(units) => {
                for unit in units {
                    set.push(&key, unit);
                }
            }
            RawGroup::Single(unit) => set.push(key, unit),
        }
    }
    Ok(set)
}
