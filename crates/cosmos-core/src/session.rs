//! The meditation session record.

use serde::{Deserialize, Serialize};

use crate::scale::Scale;

/// The user's worry and the current narrative progress.
///
/// One `Session` is created at the application root and lent to the screens:
/// the entry screen writes it before a run, the sequencer writes it during a
/// run, and renderers only read it. Every operation is total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    worry: String,
    scale: Scale,
    is_active: bool,
}

impl Session {
    /// Creates a session in its initial state.
    pub fn new() -> Self {
        Self::default()
    }

    /// The worry entered by the user, empty before submission.
    pub fn worry(&self) -> &str {
        &self.worry
    }

    /// The active narrative scale.
    pub fn scale(&self) -> Scale {
        self.scale
    }

    /// Whether a meditation run is in progress.
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn set_worry(&mut self, worry: impl Into<String>) {
        self.worry = worry.into();
    }

    pub fn set_scale(&mut self, scale: Scale) {
        self.scale = scale;
    }

    /// Marks a meditation run as in progress.
    pub fn start(&mut self) {
        self.is_active = true;
    }

    /// Restores every field to its initial value.
    pub fn reset(&mut self) {
        tracing::debug!("[Session] Reset (was scale={}, active={})", self.scale, self.is_active);
        *self = Self::default();
    }
}
