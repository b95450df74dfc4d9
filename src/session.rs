//! Scripted session replay
//!
//! A script is newline-delimited JSON, one `SyncEvent` per line:
//!
//! ```text
//! # rename the first field, then paste broken text
//! {"event": "op", "op": "set_field_name", "field": 0, "value": "email"}
//! {"event": "text", "text": "{not json"}
//! ```
//!
//! Blank lines and `#` comments are skipped. Events run strictly in order.

use serde::Serialize;
use std::io::BufRead;

use crate::sync::{Propagation, SyncController, SyncError, SyncEvent, SyncState};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Line {line}: invalid event: {source}")]
    BadEvent {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Line {line}: {source}")]
    Rejected {
        line: usize,
        #[source]
        source: SyncError,
    },

    #[error("Failed to read script: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of one replayed event
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    /// 1-based script line
    pub line: usize,
    pub propagation: Propagation,
    /// State after the step
    pub state: SyncState,
    /// Fields in the form after the step
    pub fields: usize,
}

/// Parse a script into events, keeping their line numbers.
pub fn parse_script(reader: impl BufRead) -> Result<Vec<(usize, SyncEvent)>, SessionError> {
    let mut events = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let event = serde_json::from_str(trimmed).map_err(|source| SessionError::BadEvent {
            line: idx + 1,
            source,
        })?;
        events.push((idx + 1, event));
    }
    Ok(events)
}

/// Replay events against `controller`, stopping at the first rejected one.
pub fn replay(
    controller: &mut SyncController,
    events: Vec<(usize, SyncEvent)>,
) -> Result<Vec<StepReport>, SessionError> {
    let mut reports = Vec::with_capacity(events.len());
    for (line, event) in events {
        let propagation = controller
            .dispatch(event)
            .map_err(|source| SessionError::Rejected { line, source })?;
        reports.push(StepReport {
            line,
            propagation,
            state: controller.state(),
            fields: controller.form().fields.len(),
        });
    }
    Ok(reports)
}
