//! Structural form operations
//!
//! Every operation is applied to a copy of the current model; the input is
//! never touched, so a rejected operation leaves nothing half-applied.
//! Indices come from the rendered sequences, so an out-of-range index is a
//! caller bug and is reported as a `FormError`.

use manifest_schema::{
    FormConstant, FormField, FormModel, FormValidator, OnMatch, ValidatorFactory,
};
use serde::{Deserialize, Serialize};

use crate::config::EditorSettings;

/// One add/edit/delete against the form model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum FormOp {
    AddField,
    SetFieldName { field: usize, value: String },
    SetFieldLabel { field: usize, value: String },
    SetFieldInputName { field: usize, value: String },
    DeleteField { field: usize },

    AddConstant { field: usize },
    SetConstantName { field: usize, constant: usize, value: String },
    SetConstantValue { field: usize, constant: usize, value: String },
    ToggleConstantSecure { field: usize, constant: usize },
    DeleteConstant { field: usize, constant: usize },

    AddValidator { field: usize },
    SetValidatorFactory { field: usize, validator: usize, factory: ValidatorFactory },
    SetMinLength { field: usize, validator: usize, value: u32 },
    SetMaxLength { field: usize, validator: usize, value: u32 },
    SetRegex { field: usize, validator: usize, value: String },
    SetOnMatch { field: usize, validator: usize, value: OnMatch },
    SetEnumValues { field: usize, validator: usize, values: Vec<String> },
    DeleteValidator { field: usize, validator: usize },
}

/// An operation addressed something that is not in the model
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Field index {index} out of range (form has {len} fields)")]
    FieldOutOfRange { index: usize, len: usize },

    #[error("Constant index {index} out of range (field {field} has {len} constants)")]
    ConstantOutOfRange { field: usize, index: usize, len: usize },

    #[error("Validator index {index} out of range (field {field} has {len} validators)")]
    ValidatorOutOfRange { field: usize, index: usize, len: usize },

    #[error("Cannot set {param} on a {factory} validator")]
    VariantMismatch {
        factory: ValidatorFactory,
        param: &'static str,
    },
}

impl FormOp {
    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            FormOp::AddField => "add_field",
            FormOp::SetFieldName { .. } => "set_field_name",
            FormOp::SetFieldLabel { .. } => "set_field_label",
            FormOp::SetFieldInputName { .. } => "set_field_input_name",
            FormOp::DeleteField { .. } => "delete_field",
            FormOp::AddConstant { .. } => "add_constant",
            FormOp::SetConstantName { .. } => "set_constant_name",
            FormOp::SetConstantValue { .. } => "set_constant_value",
            FormOp::ToggleConstantSecure { .. } => "toggle_constant_secure",
            FormOp::DeleteConstant { .. } => "delete_constant",
            FormOp::AddValidator { .. } => "add_validator",
            FormOp::SetValidatorFactory { .. } => "set_validator_factory",
            FormOp::SetMinLength { .. } => "set_min_length",
            FormOp::SetMaxLength { .. } => "set_max_length",
            FormOp::SetRegex { .. } => "set_regex",
            FormOp::SetOnMatch { .. } => "set_on_match",
            FormOp::SetEnumValues { .. } => "set_enum_values",
            FormOp::DeleteValidator { .. } => "delete_validator",
        }
    }
}

/// Apply `op` to a copy of `model`.
pub fn apply(model: &FormModel, op: &FormOp, settings: &EditorSettings) -> Result<FormModel, FormError> {
    let mut next = model.clone();

    match op {
        FormOp::AddField => {
            let name = settings.field_name(next.fields.len());
            next.fields.push(FormField::named(name));
        }
        FormOp::SetFieldName { field, value } => {
            field_mut(&mut next, *field)?.name = value.clone();
        }
        FormOp::SetFieldLabel { field, value } => {
            field_mut(&mut next, *field)?.label = value.clone();
        }
        FormOp::SetFieldInputName { field, value } => {
            field_mut(&mut next, *field)?.input_name = value.clone();
        }
        FormOp::DeleteField { field } => {
            check_index(*field, next.fields.len())?;
            next.fields.remove(*field);
        }

        FormOp::AddConstant { field } => {
            let f = field_mut(&mut next, *field)?;
            let name = settings.constant_name(f.constants.len());
            f.constants.push(FormConstant::new(name, "", false));
        }
        FormOp::SetConstantName {
            field,
            constant,
            value,
        } => {
            constant_mut(&mut next, *field, *constant)?.name = value.clone();
        }
        FormOp::SetConstantValue {
            field,
            constant,
            value,
        } => {
            constant_mut(&mut next, *field, *constant)?.value = value.clone();
        }
        FormOp::ToggleConstantSecure { field, constant } => {
            let c = constant_mut(&mut next, *field, *constant)?;
            c.is_secure = !c.is_secure;
        }
        FormOp::DeleteConstant { field, constant } => {
            let f = field_mut(&mut next, *field)?;
            if *constant >= f.constants.len() {
                return Err(FormError::ConstantOutOfRange {
                    field: *field,
                    index: *constant,
                    len: f.constants.len(),
                });
            }
            f.constants.remove(*constant);
        }

        FormOp::AddValidator { field } => {
            field_mut(&mut next, *field)?.validators.push(FormValidator::Alpha);
        }
        FormOp::SetValidatorFactory {
            field,
            validator,
            factory,
        } => {
            *validator_mut(&mut next, *field, *validator)? = default_validator(*factory, settings);
        }
        FormOp::SetMinLength {
            field,
            validator,
            value,
        } => match validator_mut(&mut next, *field, *validator)? {
            FormValidator::Length { min_length, .. } => *min_length = Some(*value),
            other => return Err(mismatch(other, "minLength")),
        },
        FormOp::SetMaxLength {
            field,
            validator,
            value,
        } => match validator_mut(&mut next, *field, *validator)? {
            FormValidator::Length { max_length, .. } => *max_length = Some(*value),
            other => return Err(mismatch(other, "maxLength")),
        },
        FormOp::SetRegex {
            field,
            validator,
            value,
        } => match validator_mut(&mut next, *field, *validator)? {
            FormValidator::Regex { regex, .. } => *regex = Some(value.clone()),
            other => return Err(mismatch(other, "regex")),
        },
        FormOp::SetOnMatch {
            field,
            validator,
            value,
        } => match validator_mut(&mut next, *field, *validator)? {
            FormValidator::Regex { on_match, .. } => *on_match = Some(*value),
            other => return Err(mismatch(other, "onMatch")),
        },
        FormOp::SetEnumValues {
            field,
            validator,
            values,
        } => match validator_mut(&mut next, *field, *validator)? {
            FormValidator::Enum { enum_values } => *enum_values = Some(values.clone()),
            other => return Err(mismatch(other, "enumValues")),
        },
        FormOp::DeleteValidator { field, validator } => {
            let f = field_mut(&mut next, *field)?;
            if *validator >= f.validators.len() {
                return Err(FormError::ValidatorOutOfRange {
                    field: *field,
                    index: *validator,
                    len: f.validators.len(),
                });
            }
            f.validators.remove(*validator);
        }
    }

    Ok(next)
}

/// Validator with the defaults for `factory`.
///
/// Switching factory goes through here, so nothing from the previous
/// variant survives.
pub fn default_validator(factory: ValidatorFactory, settings: &EditorSettings) -> FormValidator {
    let defaults = &settings.validators;
    match factory {
        ValidatorFactory::Alpha => FormValidator::Alpha,
        ValidatorFactory::Numeric => FormValidator::Numeric,
        ValidatorFactory::Alphanumeric => FormValidator::Alphanumeric,
        ValidatorFactory::NotEmpty => FormValidator::NotEmpty,
        ValidatorFactory::Length => FormValidator::Length {
            min_length: Some(defaults.length_min),
            max_length: Some(defaults.length_max),
        },
        ValidatorFactory::Regex => FormValidator::Regex {
            regex: Some(String::new()),
            on_match: Some(defaults.on_match),
        },
        ValidatorFactory::Enum => FormValidator::Enum {
            enum_values: Some(Vec::new()),
        },
    }
}

/// The form shown when the text cannot be decoded
pub fn reset_form(settings: &EditorSettings) -> FormModel {
    FormModel {
        fields: vec![FormField::named(settings.reset.field_name.clone())],
        hooks: None,
    }
}

fn check_index(index: usize, len: usize) -> Result<(), FormError> {
    if index < len {
        Ok(())
    } else {
        Err(FormError::FieldOutOfRange { index, len })
    }
}

fn field_mut(model: &mut FormModel, index: usize) -> Result<&mut FormField, FormError> {
    let len = model.fields.len();
    model
        .fields
        .get_mut(index)
        .ok_or(FormError::FieldOutOfRange { index, len })
}

fn constant_mut(
    model: &mut FormModel,
    field: usize,
    index: usize,
) -> Result<&mut FormConstant, FormError> {
    let f = field_mut(model, field)?;
    let len = f.constants.len();
    f.constants
        .get_mut(index)
        .ok_or(FormError::ConstantOutOfRange { field, index, len })
}

fn validator_mut(
    model: &mut FormModel,
    field: usize,
    index: usize,
) -> Result<&mut FormValidator, FormError> {
    let f = field_mut(model, field)?;
    let len = f.validators.len();
    f.validators
        .get_mut(index)
        .ok_or(FormError::ValidatorOutOfRange { field, index, len })
}

fn mismatch(validator: &FormValidator, param: &'static str) -> FormError {
    FormError::VariantMismatch {
        factory: validator.factory(),
        param,
    }
}
