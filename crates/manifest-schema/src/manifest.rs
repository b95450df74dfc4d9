//! Manifest shape (the text surface)
//!
//! A manifest travels as a document wrapped in a `manifest` key:
//!
//! ```json
//! { "manifest": { "data": { "fields": { "<key>": { ... } } } } }
//! ```
//!
//! Field keys and constant keys keep their insertion order.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use crate::factory::{OnMatch, ValidatorFactory};

/// Suffix on a constant key marking the constant as secure.
pub const SECURE_SUFFIX: &str = ":enc";

/// Separator between a constant's name and its flags.
pub const KEY_SEPARATOR: char = ':';

/// Top-level text document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManifestDocument {
    pub manifest: Manifest,
}

/// Manifest body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub data: ManifestData,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManifestData {
    /// Field key -> field spec, in emission order
    pub fields: IndexMap<String, FieldSpec>,
}

/// One field of the manifest
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    #[serde(default, deserialize_with = "null_as_default")]
    pub input_name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub ui: Ui,

    /// Encoded constant key (`name` or `name:enc`) -> value
    #[serde(rename = "const", default, deserialize_with = "null_as_default")]
    pub constants: IndexMap<String, String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub validators: Vec<ValidatorSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ui {
    #[serde(default, deserialize_with = "null_as_default")]
    pub label: String,
}

/// Flat validator record as it appears in the manifest.
///
/// Only the fields belonging to `factory` are meaningful; the rest are
/// ignored on decode and never written on encode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatorSpec {
    pub factory: ValidatorFactory,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,

    /// Regex pattern
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_match: Option<OnMatch>,

    /// Allowed values for `enum`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,
}

impl ValidatorSpec {
    /// A record carrying only the discriminant
    pub fn bare(factory: ValidatorFactory) -> Self {
        Self {
            factory,
            min_length: None,
            max_length: None,
            value: None,
            on_match: None,
            values: None,
        }
    }
}

impl ManifestDocument {
    pub fn new(fields: IndexMap<String, FieldSpec>) -> Self {
        Self {
            manifest: Manifest {
                data: ManifestData { fields },
            },
        }
    }

    /// Field specs in emission order
    pub fn fields(&self) -> &IndexMap<String, FieldSpec> {
        &self.manifest.data.fields
    }
}

/// Treat an explicit `null` like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
