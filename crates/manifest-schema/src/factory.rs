//! Validator factory catalogue.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Validator discriminant, shared by the manifest and form shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidatorFactory {
    Alpha,
    Numeric,
    Alphanumeric,
    Regex,
    Length,
    NotEmpty,
    Enum,
}

impl ValidatorFactory {
    /// Every factory, in the order editors list them.
    pub const ALL: [ValidatorFactory; 7] = [
        ValidatorFactory::Alpha,
        ValidatorFactory::Numeric,
        ValidatorFactory::Alphanumeric,
        ValidatorFactory::Regex,
        ValidatorFactory::Length,
        ValidatorFactory::NotEmpty,
        ValidatorFactory::Enum,
    ];

    /// Returns the wire name of the factory
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidatorFactory::Alpha => "alpha",
            ValidatorFactory::Numeric => "numeric",
            ValidatorFactory::Alphanumeric => "alphanumeric",
            ValidatorFactory::Regex => "regex",
            ValidatorFactory::Length => "length",
            ValidatorFactory::NotEmpty => "notEmpty",
            ValidatorFactory::Enum => "enum",
        }
    }
}

impl std::fmt::Display for ValidatorFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error for factory names outside the catalogue
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown validator factory: {0}")]
pub struct UnknownFactory(pub String);

impl FromStr for ValidatorFactory {
    type Err = UnknownFactory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ValidatorFactory::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| UnknownFactory(s.to_string()))
    }
}

/// Outcome a regex validator reports when its pattern matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnMatch {
    #[default]
    Pass,
    Fail,
}

impl OnMatch {
    pub fn as_str(&self) -> &'static str {
        match self {
            OnMatch::Pass => "pass",
            OnMatch::Fail => "fail",
        }
    }
}

impl FromStr for OnMatch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pass" => Ok(OnMatch::Pass),
            "fail" => Ok(OnMatch::Fail),
            other => Err(format!("onMatch must be \"pass\" or \"fail\", got {:?}", other)),
        }
    }
}
