//! Typed editor settings resolved from the merged configuration

use manifest_schema::OnMatch;
use serde::{Deserialize, Serialize};

use super::defaults::BuiltinDefaults;

/// Placeholder token replaced with a position number
pub const INDEX_TOKEN: &str = "{index}";

/// Settings consumed by the synchronization controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorSettings {
    pub placeholders: Placeholders,
    pub reset: ResetSettings,
    pub validators: ValidatorDefaults,
    pub output: OutputSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placeholders {
    pub field: String,
    pub constant: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResetSettings {
    pub field_name: String,
}

/// Parameters a validator receives when its factory is switched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatorDefaults {
    pub length_min: u32,
    pub length_max: u32,
    pub on_match: OnMatch,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSettings {
    pub indent: usize,
}

impl Default for EditorSettings {
    fn default() -> Self {
        let defaults = BuiltinDefaults::default();
        Self {
            placeholders: Placeholders {
                field: defaults.field_placeholder,
                constant: defaults.constant_placeholder,
            },
            reset: ResetSettings {
                field_name: defaults.reset_field_name,
            },
            validators: ValidatorDefaults {
                length_min: defaults.length_min,
                length_max: defaults.length_max,
                on_match: OnMatch::Pass,
            },
            output: OutputSettings {
                indent: defaults.indent,
            },
        }
    }
}

impl EditorSettings {
    /// Name for a field appended to a form currently holding `count` fields
    pub fn field_name(&self, count: usize) -> String {
        self.placeholders.field.replace(INDEX_TOKEN, &count.to_string())
    }

    /// Name for a constant appended to a field currently holding `count` constants
    pub fn constant_name(&self, count: usize) -> String {
        self.placeholders
            .constant
            .replace(INDEX_TOKEN, &(count + 1).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_numbering() {
        let settings = EditorSettings::default();
        assert_eq!(settings.field_name(0), "0. Field");
        assert_eq!(settings.field_name(3), "3. Field");
        // constants count from one
        assert_eq!(settings.constant_name(0), "1. const");
        assert_eq!(settings.constant_name(2), "3. const");
    }

    #[test]
    fn test_placeholder_without_token() {
        let mut settings = EditorSettings::default();
        settings.placeholders.field = "field".to_string();
        assert_eq!(settings.field_name(7), "field");
    }

    #[test]
    fn test_default_matches_builtin_value() {
        let from_value: EditorSettings =
            serde_json::from_value(BuiltinDefaults::default().to_value()).unwrap();
        assert_eq!(from_value, EditorSettings::default());
    }
}
