//! Built-in editor defaults (layer 1)
//!
//! Hardcoded defaults for all configuration values.

use serde::{Deserialize, Serialize};

/// Built-in default configuration values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuiltinDefaults {
    /// Name template for added fields (default: "{index}. Field")
    pub field_placeholder: String,

    /// Name template for added constants (default: "{index}. const")
    pub constant_placeholder: String,

    /// Name of the single field in the reset form (default: "test")
    pub reset_field_name: String,

    /// minLength given to a validator switched to `length` (default: 0)
    pub length_min: u32,

    /// maxLength given to a validator switched to `length` (default: 100)
    pub length_max: u32,

    /// onMatch given to a validator switched to `regex` (default: "pass")
    pub on_match: String,

    /// Pretty-print indent width (default: 2)
    pub indent: usize,
}

impl Default for BuiltinDefaults {
    fn default() -> Self {
        Self {
            field_placeholder: "{index}. Field".to_string(),
            constant_placeholder: "{index}. const".to_string(),
            reset_field_name: "test".to_string(),
            length_min: 0,
            length_max: 100,
            on_match: "pass".to_string(),
            indent: 2,
        }
    }
}

impl BuiltinDefaults {
    /// Convert to JSON Value for merging
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::json!({
            "placeholders": {
                "field": self.field_placeholder,
                "constant": self.constant_placeholder
            },
            "reset": {
                "field_name": self.reset_field_name
            },
            "validators": {
                "length_min": self.length_min,
                "length_max": self.length_max,
                "on_match": self.on_match
            },
            "output": {
                "indent": self.indent
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let defaults = BuiltinDefaults::default();
        assert_eq!(defaults.field_placeholder, "{index}. Field");
        assert_eq!(defaults.reset_field_name, "test");
        assert_eq!(defaults.length_min, 0);
        assert_eq!(defaults.length_max, 100);
        assert_eq!(defaults.indent, 2);
    }

    #[test]
    fn test_to_value() {
        let value = BuiltinDefaults::default().to_value();

        assert_eq!(value["placeholders"]["constant"], "{index}. const");
        assert_eq!(value["validators"]["on_match"], "pass");
        assert_eq!(value["output"]["indent"], 2);
    }
}
