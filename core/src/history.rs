//! Snapshot-based undo/redo.
//!
//! History never diffs. Each undo entry is the full document text as of a
//! checkpoint, and a checkpoint is only taken when an edit "qualifies" under
//! [`CheckpointPolicy`]. Edits that don't qualify accumulate silently against
//! the last checkpoint and get folded into whichever checkpoint comes next.

use std::{
    collections::VecDeque,
    time::{Duration, Instant},
};
use tracing::debug;

/// Full copy of the document text at a checkpoint.
pub type Snapshot = String;

/// Punctuation that closes a word or sentence, in addition to whitespace.
const BOUNDARY_PUNCTUATION: &[char] = &['.', '!', '?', ',', ';', ':', '-', '"', '\'', '(', ')'];

/// Why a change notification was promoted into a checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckpointReason {
    /// Length moved by at least [`CheckpointPolicy::min_delta`] chars.
    BigChange,
    /// At least [`CheckpointPolicy::pause`] passed since the last checkpoint.
    Pause,
    /// The text now ends in a boundary character.
    Boundary,
}

/// Decides which content changes become undo steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckpointPolicy {
    pub min_delta: usize,
    pub pause: Duration,
}

impl Default for CheckpointPolicy {
    fn default() -> Self {
        Self {
            min_delta: 3,
            pause: Duration::from_millis(600),
        }
    }
}

impl CheckpointPolicy {
    pub fn is_boundary(ch: char) -> bool {
        ch.is_whitespace() || BOUNDARY_PUNCTUATION.contains(&ch)
    }

    /// Returns the first condition that qualifies the change, if any.
    pub fn evaluate(&self, prev: &str, new: &str, elapsed: Duration) -> Option<CheckpointReason> {
        let delta = new.chars().count().abs_diff(prev.chars().count());
        if delta >= self.min_delta {
            return Some(CheckpointReason::BigChange);
        }
        if elapsed >= self.pause {
            return Some(CheckpointReason::Pause);
        }
        if new.chars().next_back().is_some_and(Self::is_boundary) {
            return Some(CheckpointReason::Boundary);
        }
        None
    }
}

/// Undo/redo stacks plus the state the checkpoint policy compares against.
#[derive(Debug, Clone)]
pub struct History {
    undo_stack: VecDeque<Snapshot>,
    redo_stack: VecDeque<Snapshot>,
    last_checkpoint_text: Snapshot,
    last_checkpoint_time: Instant,
    policy: CheckpointPolicy,
    limit: Option<usize>,
}

impl History {
    pub fn new(text: &str, now: Instant, policy: CheckpointPolicy, limit: Option<usize>) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: VecDeque::new(),
            last_checkpoint_text: text.to_owned(),
            last_checkpoint_time: now,
            policy,
            limit,
        }
    }

    /// Forget everything and treat `text` as the new baseline.
    pub fn reset(&mut self, text: &str, now: Instant) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.last_checkpoint_text = text.to_owned();
        self.last_checkpoint_time = now;
    }

    /// Run the checkpoint policy against a content change.
    ///
    /// On a qualifying change the previous checkpoint text is pushed onto the
    /// undo stack and the redo stack is cleared.
    pub fn record(&mut self, current: &str, now: Instant) -> Option<CheckpointReason> {
        let elapsed = now.saturating_duration_since(self.last_checkpoint_time);
        let reason = self
            .policy
            .evaluate(&self.last_checkpoint_text, current, elapsed)?;

        let prev = std::mem::replace(&mut self.last_checkpoint_text, current.to_owned());
        self.push_undo(prev);
        self.redo_stack.clear();
        self.last_checkpoint_time = now;

        debug!(?reason, depth = self.undo_stack.len(), "checkpoint");
        Some(reason)
    }

    /// Checkpoint unconditionally and make `new_text` the baseline.
    ///
    /// Used for bulk edits, which are always worth their own undo step. The
    /// checkpoint time is left alone.
    pub fn force_checkpoint(&mut self, new_text: &str) {
        let prev = std::mem::replace(&mut self.last_checkpoint_text, new_text.to_owned());
        self.push_undo(prev);
        self.redo_stack.clear();
        debug!(depth = self.undo_stack.len(), "forced checkpoint");
    }

    /// Pop the most recent snapshot, stashing `current` for redo.
    ///
    /// Returns the text the document should now hold.
    pub fn undo(&mut self, current: &str) -> Option<Snapshot> {
        let restored = self.undo_stack.pop_back()?;
        self.push_redo(current.to_owned());
        self.last_checkpoint_text.clone_from(&restored);
        Some(restored)
    }

    pub fn redo(&mut self, current: &str) -> Option<Snapshot> {
        let restored = self.redo_stack.pop_back()?;
        self.push_undo(current.to_owned());
        self.last_checkpoint_text.clone_from(&restored);
        Some(restored)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn last_checkpoint_text(&self) -> &str {
        &self.last_checkpoint_text
    }

    fn push_undo(&mut self, snapshot: Snapshot) {
        push_bounded(&mut self.undo_stack, snapshot, self.limit);
    }

    fn push_redo(&mut self, snapshot: Snapshot) {
        push_bounded(&mut self.redo_stack, snapshot, self.limit);
    }
}

fn push_bounded(stack: &mut VecDeque<Snapshot>, snapshot: Snapshot, limit: Option<usize>) {
    if let Some(limit) = limit {
        if limit == 0 {
            return;
        }
        while stack.len() >= limit {
            stack.pop_front();
        }
    }
    stack.push_back(snapshot);
}
