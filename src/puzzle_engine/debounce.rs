//! Coalesces rapid per-position edits into one batch.
//!
//! Composing a Hangul syllable takes several keystrokes; feedback is only
//! recomputed once the player pauses for `window_ms`. Timestamps come from the
//! caller, so the window is testable without a clock. The latest value for a
//! position always replaces earlier pending ones.

use std::collections::BTreeMap;

use crate::puzzle_engine::models::CharEdit;

#[derive(Debug, Clone, Default)]
pub struct EditDebouncer {
    window_ms: u64,
    pending: BTreeMap<usize, Option<char>>,
    last_push_ms: Option<u64>,
}

impl EditDebouncer {
    pub fn new(window_ms: u64) -> Self {
        EditDebouncer { window_ms, pending: BTreeMap::new(), last_push_ms: None }
    }

    pub fn window_ms(&self) -> u64 {
        self.window_ms
    }

    /// Record an edit made at `now_ms`; restarts the window.
    pub fn push(&mut self, position: usize, value: Option<char>, now_ms: u64) {
        self.pending.insert(position, value);
        self.last_push_ms = Some(now_ms);
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// True once the window has elapsed since the last push.
    pub fn is_ready(&self, now_ms: u64) -> bool {
        match self.last_push_ms {
            Some(last) if self.has_pending() => now_ms.saturating_sub(last) >= self.window_ms,
            _ => false,
        }
    }

    /// Drain pending edits if the window has elapsed.
    pub fn take_ready(&mut self, now_ms: u64) -> Option<Vec<CharEdit>> {
        if self.is_ready(now_ms) {
            Some(self.flush())
        } else {
            None
        }
    }

    /// Drain pending edits immediately (e.g. on Enter), ordered by position.
    pub fn flush(&mut self) -> Vec<CharEdit> {
        self.last_push_ms = None;
        std::mem::take(&mut self.pending)
            .into_iter()
            .map(|(position, value)| CharEdit { position, value })
            .collect()
    }
}
