//! Manifest <-> form transformation layer
//!
//! Pure functions between the keyed manifest document and the list-based
//! form model:
//! - `decode`: document -> form (fallible only at parse/shape time)
//! - `encode`: form -> document (infallible)
//! - `render`: document -> pretty text

mod decode;
mod encode;
pub mod secure_key;

pub use decode::{decode, decode_text, decode_validator, document_from_value, parse_document, DecodeError};
pub use encode::{encode, encode_text, encode_validator, render, DEFAULT_INDENT};

use serde::Serialize;
use serde_json::Value;

/// Outcome of a text-first round-trip check
#[derive(Debug, Clone, Serialize)]
pub struct RoundTrip {
    /// `encode(decode(x))` is deep-equal to `x`
    pub lossless: bool,

    /// Number of fields decoded
    pub fields: usize,

    /// Re-encoded document
    pub reencoded: Value,
}

/// Decode then re-encode manifest text and compare the documents.
///
/// Comparison is structural: whitespace and number formatting in the
/// input do not count as loss, key order does.
pub fn check_round_trip(text: &str) -> Result<RoundTrip, DecodeError> {
    let original: Value = serde_json::from_str(text).map_err(DecodeError::Syntax)?;
    let document = document_from_value(original.clone())?;
    let model = decode(&document);
    let reencoded = serde_json::to_value(encode(&model)).map_err(DecodeError::Shape)?;

    Ok(RoundTrip {
        lossless: ordered_eq(&original, &reencoded),
        fields: model.fields.len(),
        reencoded,
    })
}

/// Deep equality that also requires object keys in the same order.
fn ordered_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a
                    .iter()
                    .zip(b.iter())
                    .all(|((ka, va), (kb, vb))| ka == kb && ordered_eq(va, vb))
        }
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| ordered_eq(x, y))
        }
        _ => a == b,
    }
}
