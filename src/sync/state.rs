//! Synchronization state machine
//!
//! Quiescent → DecodingFromText → Quiescent
//! Quiescent → EncodingFromForm → Quiescent

use serde::{Deserialize, Serialize};

/// Which representation is authoritative for the propagation in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SyncState {
    /// At rest; neither side is propagating
    #[default]
    Quiescent,
    /// Text changed and is being decoded into the form
    DecodingFromText,
    /// Form changed and is being encoded into text
    EncodingFromForm,
}

impl SyncState {
    /// Text is the source of truth
    pub fn text_is_source(&self) -> bool {
        matches!(self, SyncState::DecodingFromText)
    }

    /// Form is the source of truth
    pub fn form_is_source(&self) -> bool {
        matches!(self, SyncState::EncodingFromForm)
    }

    pub fn is_quiescent(&self) -> bool {
        matches!(self, SyncState::Quiescent)
    }

    /// Check if transition from this state to target is valid
    pub fn can_transition_to(&self, target: SyncState) -> bool {
        matches!(
            (self, target),
            (SyncState::Quiescent, SyncState::DecodingFromText)
                | (SyncState::Quiescent, SyncState::EncodingFromForm)
                | (SyncState::DecodingFromText, SyncState::Quiescent)
                | (SyncState::EncodingFromForm, SyncState::Quiescent)
        )
    }
}
