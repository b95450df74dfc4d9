//! Manifest Sync - text/form manifest editing engine
//!
//! Keeps a manifest editable both as raw text and as a structured form,
//! converting losslessly between the two and propagating every change to
//! the other side exactly once.

pub mod config;
pub mod session;
pub mod source;
pub mod sync;
pub mod transform;

pub use manifest_schema as schema;

pub use config::{EditorSettings, EffectiveConfig};
pub use source::{BundledSample, InitialManifest, ManifestFile};
pub use sync::{FormOp, Propagation, SyncController, SyncEvent, SyncState};
pub use transform::{decode, decode_text, encode, encode_text, DecodeError};
