//! Secure-constant key codec
//!
//! The manifest flags a secure constant by suffixing its key with `:enc`.
//! The suffix is decoded into `FormConstant::is_secure` at the boundary and
//! re-applied on encode; nothing past this module sees suffixed keys.
//!
//! A constant name is the text before the first `:`. Names that contain a
//! `:` themselves are truncated and do not round-trip.

use manifest_schema::{FormConstant, KEY_SEPARATOR, SECURE_SUFFIX};

/// Split an encoded key into `(name, is_secure)`.
pub fn decode_key(key: &str) -> (&str, bool) {
    let is_secure = key.ends_with(SECURE_SUFFIX);
    let name = key.split_once(KEY_SEPARATOR).map_or(key, |(name, _)| name);
    (name, is_secure)
}

/// Build the encoded key for a constant.
pub fn encode_key(name: &str, is_secure: bool) -> String {
    if is_secure {
        format!("{}{}", name, SECURE_SUFFIX)
    } else {
        name.to_string()
    }
}

/// Decode one manifest `const` entry.
pub fn decode_constant(key: &str, value: &str) -> FormConstant {
    let (name, is_secure) = decode_key(key);
    FormConstant::new(name, value, is_secure)
}
