//! Form model (the structural edit surface)
//!
//! List-based counterpart of the manifest. Constants carry an explicit
//! `is_secure` flag and validators are a tagged variant keyed by factory,
//! so a validator can only hold the parameters of its own factory.

use serde::{Deserialize, Serialize};

use crate::factory::{OnMatch, ValidatorFactory};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormModel {
    pub fields: Vec<FormField>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hooks: Option<FormHooks>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    /// Field key in the manifest
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub input_name: String,
    #[serde(rename = "const", default)]
    pub constants: Vec<FormConstant>,
    #[serde(default)]
    pub validators: Vec<FormValidator>,
}

impl FormField {
    /// A field with only a name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormConstant {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub is_secure: bool,
}

impl FormConstant {
    pub fn new(name: impl Into<String>, value: impl Into<String>, is_secure: bool) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            is_secure,
        }
    }
}

/// Validator as edited in the form.
///
/// Parameters are optional because a manifest may omit them; a freshly
/// switched validator gets factory defaults from the controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "factory", rename_all = "camelCase")]
pub enum FormValidator {
    Alpha,
    Numeric,
    Alphanumeric,
    Regex {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        regex: Option<String>,
        #[serde(rename = "onMatch", default, skip_serializing_if = "Option::is_none")]
        on_match: Option<OnMatch>,
    },
    Length {
        #[serde(rename = "minLength", default, skip_serializing_if = "Option::is_none")]
        min_length: Option<u32>,
        #[serde(rename = "maxLength", default, skip_serializing_if = "Option::is_none")]
        max_length: Option<u32>,
    },
    NotEmpty,
    Enum {
        #[serde(rename = "enumValues", default, skip_serializing_if = "Option::is_none")]
        enum_values: Option<Vec<String>>,
    },
}

impl FormValidator {
    pub fn factory(&self) -> ValidatorFactory {
        match self {
            FormValidator::Alpha => ValidatorFactory::Alpha,
            FormValidator::Numeric => ValidatorFactory::Numeric,
            FormValidator::Alphanumeric => ValidatorFactory::Alphanumeric,
            FormValidator::Regex { .. } => ValidatorFactory::Regex,
            FormValidator::Length { .. } => ValidatorFactory::Length,
            FormValidator::NotEmpty => ValidatorFactory::NotEmpty,
            FormValidator::Enum { .. } => ValidatorFactory::Enum,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormHooks {
    pub pre: Vec<HookRef>,
    pub post: Vec<HookRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookRef {
    pub factory: String,
}
