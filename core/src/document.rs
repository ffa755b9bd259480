use std::{ops::Range, path::PathBuf};

/// A half-open byte range `[start, start + len)` into the document text.
///
/// Offsets always fall on UTF-8 char boundaries once the editor has accepted
/// them; see [`Selection::clamp_to`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub start: usize,
    pub len: usize,
}

impl Selection {
    pub fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    pub fn caret(at: usize) -> Self {
        Self { start: at, len: 0 }
    }

    pub fn from_range(range: Range<usize>) -> Self {
        Self {
            start: range.start,
            len: range.end.saturating_sub(range.start),
        }
    }

    pub fn end(&self) -> usize {
        self.start.saturating_add(self.len)
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Pull both ends in bounds and back onto char boundaries.
    pub fn clamp_to(self, text: &str) -> Self {
        let start = floor_char_boundary(text, self.start.min(text.len()));
        let end = floor_char_boundary(text, self.end().min(text.len())).max(start);
        Self::from_range(start..end)
    }
}

pub(crate) fn floor_char_boundary(text: &str, mut offset: usize) -> usize {
    while offset > 0 && !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

pub(crate) fn ceil_char_boundary(text: &str, mut offset: usize) -> usize {
    while offset < text.len() && !text.is_char_boundary(offset) {
        offset += 1;
    }
    offset
}

/// The single open document.
///
/// Every content write bumps [`Document::revision`] so the editor can tell
/// its own writes apart from ones made by the UI layer.
#[derive(Debug, Default, Clone)]
pub struct Document {
    text: String,
    dirty: bool,
    path: Option<PathBuf>,
    revision: u64,
}

impl Document {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn path(&self) -> Option<&std::path::Path> {
        self.path.as_deref()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replace the whole content. Does not touch the dirty flag.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.revision += 1;
    }

    /// Replace `range` with `with`. The range is clamped to char boundaries.
    pub fn replace_range(&mut self, range: Range<usize>, with: &str) {
        let sel = Selection::from_range(range).clamp_to(&self.text);
        self.text.replace_range(sel.range(), with);
        self.revision += 1;
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub(crate) fn set_path(&mut self, path: Option<PathBuf>) {
        self.path = path;
    }
}
