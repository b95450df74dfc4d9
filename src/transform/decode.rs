//! Manifest -> form model

use manifest_schema::{
    FieldSpec, FormField, FormHooks, FormModel, FormValidator, ManifestDocument, ValidatorFactory,
    ValidatorSpec,
};
use serde_json::Value;

use super::secure_key::decode_constant;

/// JSON pointer to the field mapping inside a document
const FIELDS_POINTER: &str = "/manifest/data/fields";

/// Text could not be interpreted as a manifest document
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("Manifest text is empty")]
    Empty,

    #[error("Manifest text is not valid JSON: {0}")]
    Syntax(#[source] serde_json::Error),

    #[error("Manifest has no manifest.data.fields object")]
    MissingFields,

    #[error("Manifest shape error: {0}")]
    Shape(#[source] serde_json::Error),
}

/// Parse manifest text into a typed document.
pub fn parse_document(text: &str) -> Result<ManifestDocument, DecodeError> {
    if text.trim().is_empty() {
        return Err(DecodeError::Empty);
    }
    let value: Value = serde_json::from_str(text).map_err(DecodeError::Syntax)?;
    document_from_value(value)
}

/// Interpret an already-parsed value as a manifest document.
pub fn document_from_value(value: Value) -> Result<ManifestDocument, DecodeError> {
    let has_fields = value
        .pointer(FIELDS_POINTER)
        .map_or(false, Value::is_object);
    if !has_fields {
        return Err(DecodeError::MissingFields);
    }

    serde_json::from_value(value).map_err(DecodeError::Shape)
}

/// Decode a document into a form model.
///
/// Field, constant and validator order follow the document. Hooks are
/// always the empty pair; the manifest carries none.
pub fn decode(document: &ManifestDocument) -> FormModel {
    let fields = document
        .fields()
        .iter()
        .map(|(key, spec)| decode_field(key, spec))
        .collect();

    FormModel {
        fields,
        hooks: Some(FormHooks::default()),
    }
}

/// Parse and decode in one step.
pub fn decode_text(text: &str) -> Result<FormModel, DecodeError> {
    parse_document(text).map(|document| decode(&document))
}

fn decode_field(key: &str, spec: &FieldSpec) -> FormField {
    FormField {
        name: key.to_string(),
        label: spec.ui.label.clone(),
        input_name: spec.input_name.clone(),
        constants: spec
            .constants
            .iter()
            .map(|(k, v)| decode_constant(k, v))
            .collect(),
        validators: spec.validators.iter().map(decode_validator).collect(),
    }
}

/// Lift a flat validator record into its tagged form.
///
/// Parameters that do not belong to the record's factory are dropped;
/// missing parameters stay `None`.
pub fn decode_validator(spec: &ValidatorSpec) -> FormValidator {
    match spec.factory {
        ValidatorFactory::Alpha => FormValidator::Alpha,
        ValidatorFactory::Numeric => FormValidator::Numeric,
        ValidatorFactory::Alphanumeric => FormValidator::Alphanumeric,
        ValidatorFactory::NotEmpty => FormValidator::NotEmpty,
        ValidatorFactory::Regex => FormValidator::Regex {
            regex: spec.value.clone(),
            on_match: spec.on_match,
        },
        ValidatorFactory::Length => FormValidator::Length {
            min_length: spec.min_length,
            max_length: spec.max_length,
        },
        ValidatorFactory::Enum => FormValidator::Enum {
            enum_values: spec.values.clone(),
        },
    }
}
