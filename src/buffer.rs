//! In-memory host: a rope-backed document plus memory clipboard, fold store and notice log.
//!
//! [`Buffer`] applies an [`EditPlan`] the way a transactional editor does: every edit is resolved
//! against the pre-plan text, overlapping edits reject the whole plan, and the cursor is either
//! set from the plan's selection or carried through the edits.

use crate::edit_plan::{EditPlan, Position};
use crate::error::OutlineError;
use crate::host::{Clipboard, Context, Editor, FoldInfo, FoldStore, Notifier, TextSource};
use crate::input::HeadingSource;
use ropey::Rope;

/// Editable document with a cursor and a log of applied plans.
pub struct Buffer {
    rope: Rope,
    cursor: Position,
    version: u64,
    history: Vec<EditPlan>,
}

impl Buffer {
    #[must_use]
    /// Create a new buffer from a string, cursor at the start.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: Position::default(),
            version: 0,
            history: Vec::new(),
        }
    }

    #[must_use]
    /// Same buffer with the cursor moved to `line`, `column`.
    pub fn with_cursor(mut self, line: usize, column: usize) -> Self {
        self.set_cursor(Position::new(line, column));
        self
    }

    #[must_use]
    /// Plans applied so far, oldest first.
    pub fn history(&self) -> &[EditPlan] {
        &self.history
    }

    /// Length of `line` in characters, terminator excluded.
    fn line_len(&self, line: usize) -> usize {
        if line >= self.rope.len_lines() {
            return 0;
        }
        let slice = self.rope.line(line);
        let mut len = slice.len_chars();
        while len > 0 && matches!(slice.char(len - 1), '\n' | '\r') {
            len -= 1;
        }
        len
    }

    fn char_index(&self, position: Position) -> usize {
        if position.line >= self.rope.len_lines() {
            return self.rope.len_chars();
        }
        self.rope.line_to_char(position.line) + position.column.min(self.line_len(position.line))
    }

    fn position_of(&self, char_index: usize) -> Position {
        let index = char_index.min(self.rope.len_chars());
        let line = self.rope.char_to_line(index);
        Position::new(line, index - self.rope.line_to_char(line))
    }
}

/// Edit resolved to character offsets of the pre-plan text.
struct Resolved<'a> {
    from: usize,
    to: usize,
    text: &'a str,
}

/// Where a cursor at `cursor` ends up once `edits` (sorted, disjoint) are applied.
fn map_cursor(cursor: usize, edits: &[Resolved<'_>]) -> usize {
    let mut shift: isize = 0;
    for edit in edits.iter().take_while(|e| e.from < cursor) {
        let inserted = isize::try_from(edit.text.chars().count()).unwrap_or(isize::MAX);
        let removed = isize::try_from(edit.to - edit.from).unwrap_or(isize::MAX);
        if edit.to <= cursor {
            shift += inserted - removed;
        } else {
            return edit.from.saturating_add_signed(shift);
        }
    }
    cursor.saturating_add_signed(shift)
}

impl TextSource for Buffer {
    fn text(&self) -> String {
        self.rope.to_string()
    }

    fn line(&self, n: usize) -> Option<String> {
        if n >= self.rope.len_lines() {
            return None;
        }
        let start = self.rope.line_to_char(n);
        Some(self.rope.slice(start..start + self.line_len(n)).to_string())
    }

    fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    fn range(&self, from: Position, to: Position) -> String {
        let start = self.char_index(from);
        let end = self.char_index(to).max(start);
        self.rope.slice(start..end).to_string()
    }

    fn version(&self) -> u64 {
        self.version
    }
}

impl Editor for Buffer {
    fn cursor(&self) -> Position {
        self.cursor
    }

    fn set_cursor(&mut self, position: Position) {
        let line = position.line.min(self.rope.len_lines().saturating_sub(1));
        self.cursor = Position::new(line, position.column.min(self.line_len(line)));
    }

    fn apply(&mut self, plan: EditPlan) -> Result<(), OutlineError> {
        let mut resolved = Vec::with_capacity(plan.edits.len());
        for edit in &plan.edits {
            let from = self.char_index(edit.from);
            let to = edit.to.map_or(from, |to| self.char_index(to));
            if to < from {
                return Err(OutlineError::InvalidRange);
            }
            resolved.push(Resolved {
                from,
                to,
                text: edit.text.as_str(),
            });
        }
        // Insertions sort ahead of a deletion starting at the same offset.
        resolved.sort_by_key(|e| (e.from, e.to));
        if resolved.windows(2).any(|pair| pair[0].to > pair[1].from) {
            return Err(OutlineError::OverlappingEdits);
        }

        let cursor = map_cursor(self.char_index(self.cursor), &resolved);
        for edit in resolved.iter().rev() {
            if edit.to > edit.from {
                self.rope.remove(edit.from..edit.to);
            }
            if !edit.text.is_empty() {
                self.rope.insert(edit.from, edit.text);
            }
        }
        self.version += 1;
        tracing::debug!(
            edits = plan.edits.len(),
            version = self.version,
            "applied edit plan"
        );

        match plan.selection {
            Some(selection) => self.set_cursor(selection),
            None => self.cursor = self.position_of(cursor),
        }
        self.history.push(plan);
        Ok(())
    }
}

#[derive(Default)]
/// Clipboard held in memory.
pub struct MemoryClipboard {
    /// Stored text, if anything was written.
    pub text: Option<String>,
}

impl Clipboard for MemoryClipboard {
    fn read_text(&mut self) -> Result<String, OutlineError> {
        Ok(self.text.clone().unwrap_or_default())
    }

    fn write_text(&mut self, text: &str) -> Result<(), OutlineError> {
        self.text = Some(text.to_string());
        Ok(())
    }
}

#[derive(Default)]
/// Fold set held in memory.
pub struct MemoryFolds {
    /// Current fold set.
    pub info: FoldInfo,
}

impl FoldStore for MemoryFolds {
    fn get_folds(&mut self) -> Result<FoldInfo, OutlineError> {
        Ok(self.info.clone())
    }

    fn set_folds(&mut self, info: FoldInfo) -> Result<(), OutlineError> {
        self.info = info;
        Ok(())
    }
}

#[derive(Default)]
/// Collects advisory messages.
pub struct Notices {
    /// Messages in the order they were raised.
    pub messages: Vec<String>,
}

impl Notifier for Notices {
    fn notify(&mut self, message: &str) {
        tracing::info!(message, "notice");
        self.messages.push(message.to_string());
    }
}

/// All in-memory collaborators for one document view.
pub struct MemoryHost {
    /// Document and cursor.
    pub buffer: Buffer,
    /// Clipboard.
    pub clipboard: MemoryClipboard,
    /// Fold store.
    pub folds: MemoryFolds,
    /// Advisory messages raised so far.
    pub notices: Notices,
}

impl MemoryHost {
    #[must_use]
    /// Host over `text` with the cursor at `line`, `column`.
    pub fn new(text: &str, line: usize, column: usize) -> Self {
        Self {
            buffer: Buffer::from_text(text).with_cursor(line, column),
            clipboard: MemoryClipboard::default(),
            folds: MemoryFolds::default(),
            notices: Notices::default(),
        }
    }

    /// Borrows every collaborator for one command invocation.
    pub fn context<'a>(&'a mut self, source: &'a dyn HeadingSource) -> Context<'a> {
        Context {
            editor: &mut self.buffer,
            clipboard: &mut self.clipboard,
            folds: &mut self.folds,
            notifier: &mut self.notices,
            source,
        }
    }
}

#[cfg(test)]
#[path = "tests/buffer.rs"]
mod tests;
