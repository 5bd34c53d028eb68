use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExportSummary {
    pub schema_version: u32,
    pub path: String,
    pub format: String,
    pub keys: usize,
    /// Keys dropped because another key already carried the same text.
    pub duplicates_dropped: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ImportSummary {
    pub schema_version: u32,
    /// File path, or `vendor:<locale>` for downloads.
    pub source: String,
    pub page: String,
    pub detached_symbols: usize,
    pub layers: usize,
    pub translated: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PseudoSummary {
    pub schema_version: u32,
    pub page: String,
    pub ratio: f64,
    pub duplicated: bool,
    pub layers: usize,
    pub changed: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UploadSummary {
    pub schema_version: u32,
    pub project_id: String,
    pub strings_file: String,
    pub keys: usize,
    pub context_uploaded: bool,
}

/// Page-relative rectangle of a text layer in a context screenshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Coordinates {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// One visible string and where it sits in the page image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ContextString {
    pub text: String,
    pub coordinates: Coordinates,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_string_uses_vendor_field_names() {
        let s = ContextString {
            text: "Hi".into(),
            coordinates: Coordinates {
                left: 1.0,
                top: 2.0,
                width: 3.0,
                height: 4.0,
            },
        };
        let v = serde_json::to_value(&s).unwrap();
        assert_eq!(v["text"], "Hi");
        assert_eq!(v["coordinates"]["left"], 1.0);
        assert_eq!(v["coordinates"]["height"], 4.0);
    }

    #[test]
    fn schemas_are_generated() {
        let schema = schemars::schema_for!(ImportSummary);
        let v = serde_json::to_value(&schema).unwrap();
        assert!(v["properties"]["translated"].is_object());
    }
}
