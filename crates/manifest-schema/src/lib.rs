//! Manifest Schema Types
//!
//! Data contracts for the two representations of a manifest: the keyed
//! document edited as text, and the list-based form model edited through
//! structural operations.

pub mod factory;
pub mod form;
pub mod manifest;

pub use factory::{OnMatch, UnknownFactory, ValidatorFactory};
pub use form::{FormConstant, FormField, FormHooks, FormModel, FormValidator, HookRef};
pub use manifest::{
    FieldSpec, Manifest, ManifestData, ManifestDocument, Ui, ValidatorSpec, KEY_SEPARATOR,
    SECURE_SUFFIX,
};
