//! The editing-state engine the UI layer talks to.
//!
//! [`Editor`] owns the single open [`Document`], the current [`Selection`],
//! and the [`History`]. UI-originated mutations go through
//! [`Editor::notify_content_changed`] and the checkpoint policy. The engine's
//! own writes (undo, redo, replace-all, reset) are stamped with the document
//! revision they produced, and a change notification that arrives while the
//! document is still at that revision is ignored. That keeps a widget's
//! "text changed" echo from turning an undo into a new checkpoint.

use crate::{
    clock::{Clock, SystemClock},
    config::Config,
    document::{Document, Selection},
    error::{NoPathSnafu, ReadSnafu, Result, WriteSnafu},
    history::{CheckpointReason, History},
    search::{self, Comparison},
    stats::DocumentStats,
};
use snafu::{OptionExt, ResultExt};
use std::{ops::Range, path::Path};
use tracing::{debug, info, trace};

/// Result of a find.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FindOutcome {
    /// Empty term or empty document; nothing was searched.
    Skipped,
    /// The selection now covers this range.
    Found(Range<usize>),
    NotFound { term: String },
}

impl FindOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Message for the user, if this outcome warrants one.
    pub fn notice(&self) -> Option<String> {
        match self {
            Self::NotFound { term } => Some(format!("Cannot find \"{term}\".")),
            Self::Skipped | Self::Found(_) => None,
        }
    }
}

/// Result of a single replace followed by the find it always triggers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceOutcome {
    pub replaced: bool,
    pub next: FindOutcome,
}

/// Result of a replace-all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplaceAllOutcome {
    Skipped,
    Replaced { count: usize },
    NoOccurrences { term: String },
}

impl ReplaceAllOutcome {
    pub fn notice(&self) -> Option<String> {
        match self {
            Self::NoOccurrences { term } => Some(format!("No occurrences of \"{term}\" found.")),
            Self::Skipped | Self::Replaced { .. } => None,
        }
    }
}

#[derive(Debug)]
pub struct Editor<C: Clock = SystemClock> {
    document: Document,
    selection: Selection,
    history: History,
    clock: C,
    /// Revision written by the engine itself, if no UI edit has happened since.
    engine_revision: Option<u64>,
    last_search: String,
    match_case: bool,
}

impl Editor<SystemClock> {
    pub fn new(config: &Config) -> Self {
        Self::with_clock(config, SystemClock)
    }

    /// An editor holding `text` as a fresh, clean document.
    pub fn with_text(text: &str) -> Self {
        let mut editor = Self::new(&Config::default());
        editor.reset_document(text);
        editor
    }
}

impl<C: Clock> Editor<C> {
    pub fn with_clock(config: &Config, clock: C) -> Self {
        let now = clock.now();
        Self {
            document: Document::default(),
            selection: Selection::default(),
            history: History::new("", now, config.checkpoint_policy(), config.history_limit),
            clock,
            engine_revision: None,
            last_search: String::new(),
            match_case: config.match_case,
        }
    }

    pub fn text(&self) -> &str {
        self.document.text()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Direct access for UI layers that edit the buffer themselves.
    ///
    /// Call [`Editor::notify_content_changed`] after each mutation.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn is_dirty(&self) -> bool {
        self.document.is_dirty()
    }

    /// Whether discarding the document should ask the user first.
    pub fn needs_save_prompt(&self) -> bool {
        self.document.is_dirty()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Case sensitivity callers should default to.
    pub fn match_case(&self) -> bool {
        self.match_case
    }

    pub fn stats(&self) -> DocumentStats {
        DocumentStats::of(self.document.text())
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = selection.clamp_to(self.document.text());
    }

    pub fn selected_text(&self) -> &str {
        let sel = self.selection.clamp_to(self.document.text());
        &self.document.text()[sel.range()]
    }

    /// The term passed to the most recent [`Editor::find_next`].
    pub fn last_search(&self) -> &str {
        &self.last_search
    }

    /// What a find dialog should open with: the selection, else the last term.
    pub fn search_seed(&self) -> &str {
        let selected = self.selected_text();
        if selected.is_empty() {
            &self.last_search
        } else {
            selected
        }
    }

    /// Run the checkpoint policy against the current text.
    ///
    /// The UI layer calls this after every buffer mutation it makes. Calls
    /// that only echo the engine's own last write are ignored.
    pub fn notify_content_changed(&mut self) -> Option<CheckpointReason> {
        if self.engine_revision == Some(self.document.revision()) {
            trace!(
                revision = self.document.revision(),
                "ignoring change notification for engine write"
            );
            return None;
        }
        self.engine_revision = None;

        let now = self.clock.now();
        let reason = self.history.record(self.document.text(), now);
        self.document.mark_dirty();
        reason
    }

    /// Replace the whole buffer as a user edit.
    pub fn set_text(&mut self, text: impl Into<String>) -> Option<CheckpointReason> {
        self.document.set_text(text);
        self.selection = self.selection.clamp_to(self.document.text());
        self.notify_content_changed()
    }

    /// Replace `range` as a user edit, leaving the caret after the new text.
    pub fn replace_range(&mut self, range: Range<usize>, with: &str) -> Option<CheckpointReason> {
        let range = Selection::from_range(range)
            .clamp_to(self.document.text())
            .range();
        let caret = range.start + with.len();
        self.document.replace_range(range, with);
        self.selection = Selection::caret(caret);
        self.notify_content_changed()
    }

    /// Type `text` over the current selection.
    pub fn insert(&mut self, text: &str) -> Option<CheckpointReason> {
        self.replace_range(self.selection.range(), text)
    }

    pub fn undo(&mut self) -> bool {
        let Some(restored) = self.history.undo(self.document.text()) else {
            return false;
        };
        self.write_internal(restored);
        self.document.mark_dirty();
        debug!(
            undo = self.history.undo_len(),
            redo = self.history.redo_len(),
            "undo"
        );
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(restored) = self.history.redo(self.document.text()) else {
            return false;
        };
        self.write_internal(restored);
        self.document.mark_dirty();
        debug!(
            undo = self.history.undo_len(),
            redo = self.history.redo_len(),
            "redo"
        );
        true
    }

    /// Select the next match of `term` after the current selection.
    pub fn find_next(&mut self, term: &str, match_case: bool) -> FindOutcome {
        if term.is_empty() {
            return FindOutcome::Skipped;
        }
        term.clone_into(&mut self.last_search);
        if self.document.is_empty() {
            return FindOutcome::Skipped;
        }

        let cmp = Comparison::from_match_case(match_case);
        match search::find_next(self.document.text(), term, cmp, self.selection) {
            Some(range) => {
                self.selection = Selection::from_range(range.clone());
                FindOutcome::Found(range)
            },
            None => {
                debug!(term, "no match");
                FindOutcome::NotFound {
                    term: term.to_owned(),
                }
            },
        }
    }

    /// Replace the selection if it holds `term`, then find the next match.
    ///
    /// The replacement is an ordinary user edit and goes through the
    /// checkpoint policy like typing would.
    pub fn replace_current(
        &mut self,
        term: &str,
        replacement: &str,
        match_case: bool,
    ) -> ReplaceOutcome {
        if term.is_empty() {
            return ReplaceOutcome {
                replaced: false,
                next: FindOutcome::Skipped,
            };
        }

        let cmp = Comparison::from_match_case(match_case);
        let sel = self.selection.clamp_to(self.document.text());
        let replaced =
            !sel.is_empty() && search::matches_term(&self.document.text()[sel.range()], term, cmp);
        if replaced {
            self.replace_range(sel.range(), replacement);
        }

        ReplaceOutcome {
            replaced,
            next: self.find_next(term, match_case),
        }
    }

    /// Replace every match of `term` as a single undo step.
    pub fn replace_all(
        &mut self,
        term: &str,
        replacement: &str,
        match_case: bool,
    ) -> ReplaceAllOutcome {
        if term.is_empty() || self.document.is_empty() {
            return ReplaceAllOutcome::Skipped;
        }

        let cmp = Comparison::from_match_case(match_case);
        let replaced = search::replace_all(self.document.text(), term, replacement, cmp);
        if replaced.count == 0 {
            return ReplaceAllOutcome::NoOccurrences {
                term: term.to_owned(),
            };
        }

        self.history.force_checkpoint(&replaced.text);
        self.write_internal(replaced.text);
        self.document.mark_dirty();
        debug!(term, count = replaced.count, "replaced all");
        ReplaceAllOutcome::Replaced {
            count: replaced.count,
        }
    }

    /// Swap in a whole new document and start history over.
    pub fn reset_document(&mut self, text: &str) {
        self.write_internal(text.to_owned());
        self.history.reset(text, self.clock.now());
        self.document.mark_clean();
        self.selection = Selection::default();
    }

    pub fn new_document(&mut self) {
        self.document.set_path(None);
        self.reset_document("");
    }

    pub fn open(&mut self, path: &Path) -> Result<()> {
        let text = std::fs::read_to_string(path).context(ReadSnafu { path })?;
        self.reset_document(&text);
        self.document.set_path(Some(path.to_path_buf()));
        info!("opened {} ({} bytes)", path.display(), text.len());
        Ok(())
    }

    /// Write to the document's path. Fails if it was never saved or opened.
    pub fn save(&mut self) -> Result<()> {
        let path = self.document.path().map(Path::to_path_buf).context(NoPathSnafu)?;
        self.write_to(&path)
    }

    pub fn save_as(&mut self, path: &Path) -> Result<()> {
        self.write_to(path)?;
        self.document.set_path(Some(path.to_path_buf()));
        Ok(())
    }

    fn write_to(&mut self, path: &Path) -> Result<()> {
        std::fs::write(path, self.document.text()).context(WriteSnafu { path })?;
        self.document.mark_clean();
        info!("saved {}", path.display());
        Ok(())
    }

    fn write_internal(&mut self, text: String) {
        self.document.set_text(text);
        self.engine_revision = Some(self.document.revision());
        self.selection = self.selection.clamp_to(self.document.text());
    }
}
