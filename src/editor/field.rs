//! Text input model
//!
//! Positions are char indices into `value`, never byte offsets.

/// A selected range `[start, end)` in chars
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    /// A collapsed selection (plain caret)
    pub fn caret(pos: usize) -> Self {
        Self { start: pos, end: pos }
    }

    /// Order the endpoints and clamp both into `0..=len`
    pub fn clamped(&self, len: usize) -> Self {
        let (a, b) = if self.start <= self.end {
            (self.start, self.end)
        } else {
            (self.end, self.start)
        };
        Self {
            start: a.min(len),
            end: b.min(len),
        }
    }
}

/// A single-line text input with an optional caret.
///
/// `selection` is `None` until something places the caret, which is how a
/// field that has never been focused looks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    value: String,
    selection: Option<Selection>,
    focused: bool,
}

impl TextField {
    pub fn new() -> Self {
        Self::default()
    }

    /// A field holding `value` with no caret
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            selection: None,
            focused: false,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Length in chars
    pub fn len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection.map(|s| s.clamped(self.len()))
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Replace the whole value, leaving the caret at the end.
    ///
    /// This is what typing into the field looks like from the outside.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        let end = self.len();
        self.selection = Some(Selection::caret(end));
    }

    /// Replace the value but keep the current caret, clamped to the new length
    pub(crate) fn replace_value_keep_caret(&mut self, value: String) {
        self.value = value;
        let len = self.len();
        self.selection = self.selection.map(|s| s.clamped(len));
    }

    /// Place a collapsed caret at `pos` (clamped)
    pub fn set_caret(&mut self, pos: usize) {
        let pos = pos.min(self.len());
        self.selection = Some(Selection::caret(pos));
    }

    /// Select `[start, end)` (ordered and clamped)
    pub fn select(&mut self, start: usize, end: usize) {
        self.selection = Some(Selection { start, end }.clamped(self.len()));
    }

    pub fn focus(&mut self) {
        self.focused = true;
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    /// Empty the field; the caret goes back to the start
    pub fn clear(&mut self) {
        self.value.clear();
        self.selection = Some(Selection::caret(0));
    }

    /// Byte offset of char index `pos` (clamped to the end)
    pub(crate) fn byte_offset(&self, pos: usize) -> usize {
        self.value
            .char_indices()
            .nth(pos)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    pub(crate) fn splice(&mut self, range: Selection, text: &str) {
        let start = self.byte_offset(range.start);
        let end = self.byte_offset(range.end);
        self.value.replace_range(start..end, text);
    }
}
