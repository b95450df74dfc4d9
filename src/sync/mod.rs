//! Text/form synchronization
//!
//! - Text event: QUIESCENT → DECODING_FROM_TEXT → QUIESCENT
//!   (decode, or fall back to the reset form; text kept as typed)
//! - Form event: QUIESCENT → ENCODING_FROM_FORM → QUIESCENT
//!   (apply the operation to a copy, encode, write text)

mod controller;
mod ops;
mod state;

pub use controller::{Propagation, SyncController, SyncError, SyncEvent, SyncObserver};
pub use ops::{apply, default_validator, reset_form, FormError, FormOp};
pub use state::SyncState;
