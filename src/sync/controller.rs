//! Synchronization controller
//!
//! Sole owner of the form model and the manifest text. Text changes decode
//! into the form; form operations encode into the text. A propagation only
//! ever writes the opposite representation and never feeds that write back
//! in as a new change.

use manifest_schema::FormModel;
use serde::{Deserialize, Serialize};

use super::ops::{self, FormError, FormOp};
use super::state::SyncState;
use crate::config::EditorSettings;
use crate::source::{InitialManifest, SourceError};
use crate::transform::{self, DecodeError};

/// What a single event propagated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Propagation {
    /// Text decoded; the form was replaced
    FormUpdated { fields: usize },
    /// Text could not be decoded; the form fell back to the reset form
    FormReset { reason: String },
    /// Form changed; new text was written
    TextUpdated { op: String },
    /// Echo of text this controller wrote itself; nothing done
    Suppressed,
}

/// Inbound event from either surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SyncEvent {
    Text { text: String },
    Op(FormOp),
}

/// Errors from a form-side propagation
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("Invariant violation: {0}")]
    Form(#[from] FormError),

    #[error("Failed to render manifest text: {0}")]
    Render(#[from] serde_json::Error),
}

/// Receives whatever the controller pushes to the surfaces.
///
/// Observers get shared references only and cannot re-enter the
/// controller while a propagation is running.
pub trait SyncObserver {
    /// New form pushed to the form surface (text was the source)
    fn form_pushed(&mut self, _form: &FormModel, _state: SyncState) {}

    /// New text pushed to the text surface (form was the source)
    fn text_pushed(&mut self, _text: &str, _state: SyncState) {}
}

pub struct SyncController {
    form: FormModel,
    text: String,
    state: SyncState,
    settings: EditorSettings,
    /// Last text written to the text surface, consumed by its echo
    last_emitted: Option<String>,
    observers: Vec<Box<dyn SyncObserver>>,
}

impl SyncController {
    pub fn new(settings: EditorSettings) -> Self {
        Self {
            form: FormModel::default(),
            text: String::new(),
            state: SyncState::Quiescent,
            settings,
            last_emitted: None,
            observers: Vec::new(),
        }
    }

    pub fn with_observer(mut self, observer: Box<dyn SyncObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn add_observer(&mut self, observer: Box<dyn SyncObserver>) {
        self.observers.push(observer);
    }

    /// Load the initial manifest and treat it as a text replacement.
    pub fn start(&mut self, source: &dyn InitialManifest) -> Result<Propagation, SourceError> {
        let text = source.load()?;
        tracing::debug!(source = %source.describe(), bytes = text.len(), "loaded initial manifest");
        Ok(self.on_text(text))
    }

    /// Process one event in arrival order.
    pub fn dispatch(&mut self, event: SyncEvent) -> Result<Propagation, SyncError> {
        match event {
            SyncEvent::Text { text } => Ok(self.on_text(text)),
            SyncEvent::Op(op) => self.apply(op),
        }
    }

    /// Text surface reported new content.
    ///
    /// Never fails: text that cannot be decoded is kept verbatim and the
    /// form falls back to the reset form.
    pub fn on_text(&mut self, text: impl Into<String>) -> Propagation {
        let text = text.into();

        if self.last_emitted.take().as_deref() == Some(text.as_str()) {
            tracing::trace!("ignoring echo of emitted text");
            return Propagation::Suppressed;
        }

        self.propagate(SyncState::DecodingFromText, |this| {
            let result = transform::decode_text(&text);
            this.text = text;

            let propagation = match result {
                Ok(form) => {
                    tracing::debug!(fields = form.fields.len(), "decoded text into form");
                    this.form = form;
                    Propagation::FormUpdated {
                        fields: this.form.fields.len(),
                    }
                }
                Err(err) => {
                    log_fallback(&err);
                    this.form = ops::reset_form(&this.settings);
                    Propagation::FormReset {
                        reason: err.to_string(),
                    }
                }
            };

            let state = this.state;
            for observer in this.observers.iter_mut() {
                observer.form_pushed(&this.form, state);
            }
            propagation
        })
    }

    /// Form surface issued a structural operation.
    ///
    /// On error nothing changes: the form, the text and the echo marker are
    /// left as they were.
    pub fn apply(&mut self, op: FormOp) -> Result<Propagation, SyncError> {
        self.propagate(SyncState::EncodingFromForm, |this| {
            let next = ops::apply(&this.form, &op, &this.settings).map_err(|err| {
                tracing::error!(op = op.name(), error = %err, "form operation rejected");
                err
            })?;
            let text = transform::encode_text(&next, this.settings.output.indent)?;

            tracing::debug!(op = op.name(), fields = next.fields.len(), "encoded form into text");
            this.form = next;
            this.text = text.clone();
            this.last_emitted = Some(text);

            let state = this.state;
            for observer in this.observers.iter_mut() {
                observer.text_pushed(&this.text, state);
            }
            Ok(Propagation::TextUpdated {
                op: op.name().to_string(),
            })
        })
    }

    /// Run `f` with `state` as the current state, returning to quiescent on
    /// every exit path.
    fn propagate<T>(&mut self, state: SyncState, f: impl FnOnce(&mut Self) -> T) -> T {
        debug_assert!(self.state.can_transition_to(state));
        self.state = state;
        let out = f(self);
        self.state = SyncState::Quiescent;
        out
    }

    pub fn form(&self) -> &FormModel {
        &self.form
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }
}

impl Default for SyncController {
    fn default() -> Self {
        Self::new(EditorSettings::default())
    }
}

fn log_fallback(err: &DecodeError) {
    match err {
        DecodeError::Empty => tracing::debug!("empty manifest text, showing reset form"),
        other => tracing::warn!(error = %other, "manifest text did not decode, showing reset form"),
    }
}
