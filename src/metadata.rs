//! Set metadata (`set.json`)
//!
//! The metadata file is owned by the user and survives every compile. Only the
//! `cards` key from older layouts is dropped; every other field is written back
//! as it was read.

use anyhow::{Context, Result};
use log::warn;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Key removed from metadata on every compile
const CARDS_KEY: &str = "cards";

/// Free-form key/value metadata of one set
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SetMetadata {
    fields: Map<String, Value>,
}

impl SetMetadata {
    /// Parse metadata JSON. Anything but a JSON object is an error.
    pub fn from_json(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content)?;
        match value {
            Value::Object(mut fields) => {
                fields.shift_remove(CARDS_KEY);
                Ok(Self { fields })
            }
            other => anyhow::bail!("expected a JSON object, found {}", json_kind(&other)),
        }
    }

    /// Load metadata from a file.
    ///
    /// A missing or blank file gives empty metadata. A file that cannot be
    /// read or parsed is logged as a warning and also gives empty metadata.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Could not read existing {}: {}", path.display(), e);
                return Self::default();
            }
        };
        let content = content.trim();
        if content.is_empty() {
            return Self::default();
        }

        match Self::from_json(content) {
            Ok(metadata) => metadata,
            Err(e) => {
                warn!("Could not parse existing {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Set number used to tell legacy cards from current ones
    pub fn set_number(&self) -> Option<u32> {
        self.fields
            .get("setNumber")
            .and_then(Value::as_u64)
            .and_then(|n| u32::try_from(n).ok())
    }

    pub fn title(&self) -> Option<&str> {
        self.non_empty_str("title")
    }

    pub fn alternate_title(&self) -> Option<&str> {
        self.non_empty_str("alternateTitle")
    }

    fn non_empty_str(&self, key: &str) -> Option<&str> {
        self.fields
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn to_json(&self) -> Result<String> {
        crate::utils::to_pretty_json(self.fields())
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json()?)
            .with_context(|| format!("Failed to write metadata: {}", path.display()))
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognized_fields() {
        let meta = SetMetadata::from_json(
            r#"{"setNumber": 26, "title": "Twenty-Six", "alternateTitle": "XXVI"}"#,
        )
        .unwrap();
        assert_eq!(meta.set_number(), Some(26));
        assert_eq!(meta.title(), Some("Twenty-Six"));
        assert_eq!(meta.alternate_title(), Some("XXVI"));
    }

    #[test]
    fn test_cards_key_is_dropped() {
        let meta = SetMetadata::from_json(r#"{"title": "T", "cards": [1, 2, 3]}"#).unwrap();
        assert!(!meta.fields().contains_key("cards"));
        assert_eq!(meta.fields().len(), 1);
    }

    #[test]
    fn test_non_integer_set_number() {
        let meta = SetMetadata::from_json(r#"{"setNumber": "26"}"#).unwrap();
        assert_eq!(meta.set_number(), None);
        // The field is still kept for the rewrite
        assert!(meta.fields().contains_key("setNumber"));
    }

    #[test]
    fn test_non_object_is_rejected() {
        assert!(SetMetadata::from_json("[1, 2]").is_err());
        assert!(SetMetadata::from_json("not json").is_err());
    }

    #[test]
    fn test_load_missing_blank_and_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("set.json");
        assert_eq!(SetMetadata::load(&path), SetMetadata::default());

        fs::write(&path, "  \n").unwrap();
        assert_eq!(SetMetadata::load(&path), SetMetadata::default());

        fs::write(&path, "{ broken").unwrap();
        assert_eq!(SetMetadata::load(&path), SetMetadata::default());
    }

    #[test]
    fn test_load_non_utf8_gives_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("set.json");
        fs::write(&path, b"{\"title\": \"\xff\xfe\"}").unwrap();
        assert_eq!(SetMetadata::load(&path), SetMetadata::default());
    }

    #[test]
    fn test_save_keeps_unknown_fields_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("set.json");
        fs::write(
            &path,
            r#"{"cards": [], "zeta": {"nested": [1, 2]}, "title": "T", "alpha": true}"#,
        )
        .unwrap();

        let meta = SetMetadata::load(&path);
        meta.save(&path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(
            written,
            "{\n   \"zeta\": {\n      \"nested\": [\n         1,\n         2\n      ]\n   },\n   \"title\": \"T\",\n   \"alpha\": true\n}"
        );
    }
}
