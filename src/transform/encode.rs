//! Form model -> manifest

use indexmap::IndexMap;
use manifest_schema::{
    FieldSpec, FormField, FormModel, FormValidator, ManifestDocument, Ui, ValidatorSpec,
};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use super::secure_key::encode_key;

/// Default pretty-print width
pub const DEFAULT_INDENT: usize = 2;

/// Encode a form model into a manifest document.
///
/// Field order becomes key order. A repeated field name or encoded
/// constant key overwrites the earlier value and keeps the earlier
/// position. Hooks are not part of the manifest and are not written.
pub fn encode(model: &FormModel) -> ManifestDocument {
    let mut fields = IndexMap::with_capacity(model.fields.len());
    for field in &model.fields {
        fields.insert(field.name.clone(), encode_field(field));
    }
    ManifestDocument::new(fields)
}

fn encode_field(field: &FormField) -> FieldSpec {
    let mut constants = IndexMap::with_capacity(field.constants.len());
    for c in &field.constants {
        constants.insert(encode_key(&c.name, c.is_secure), c.value.clone());
    }

    FieldSpec {
        input_name: field.input_name.clone(),
        ui: Ui {
            label: field.label.clone(),
        },
        constants,
        validators: field.validators.iter().map(encode_validator).collect(),
    }
}

/// Flatten a tagged validator into the manifest record.
pub fn encode_validator(validator: &FormValidator) -> ValidatorSpec {
    let mut spec = ValidatorSpec::bare(validator.factory());
    match validator {
        FormValidator::Length {
            min_length,
            max_length,
        } => {
            spec.min_length = *min_length;
            spec.max_length = *max_length;
        }
        FormValidator::Regex { regex, on_match } => {
            spec.value = regex.clone();
            spec.on_match = *on_match;
        }
        FormValidator::Enum { enum_values } => {
            spec.values = enum_values.clone();
        }
        FormValidator::Alpha
        | FormValidator::Numeric
        | FormValidator::Alphanumeric
        | FormValidator::NotEmpty => {}
    }
    spec
}

/// Render a document as pretty-printed text.
pub fn render(document: &ManifestDocument, indent: usize) -> Result<String, serde_json::Error> {
    let indent = " ".repeat(indent);
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut out = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    document.serialize(&mut serializer)?;
    // serde_json only writes valid UTF-8
    Ok(String::from_utf8_lossy(&out).into_owned())
}

/// Encode and render in one step.
pub fn encode_text(model: &FormModel, indent: usize) -> Result<String, serde_json::Error> {
    render(&encode(model), indent)
}
