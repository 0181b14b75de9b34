//! Narrow interfaces to the services the outline commands consume.
//!
//! The editing surface, clipboard, fold store and notification channel all belong to the host.
//! Commands see them only through these traits, bundled per invocation in a [`Context`] together
//! with the [`HeadingSource`] that turns the current text into an [`Outline`].

use crate::edit_plan::{Edit, EditPlan, Position};
use crate::error::OutlineError;
use crate::input::HeadingSource;
use crate::navigation::Outline;
use serde::{Deserialize, Serialize};

/// Read access to the document text.
pub trait TextSource {
    /// Whole document.
    fn text(&self) -> String;
    /// Content of line `n` without its terminator.
    fn line(&self, n: usize) -> Option<String>;
    /// Number of lines; a trailing terminator opens one final empty line.
    fn line_count(&self) -> usize;
    /// Text between two positions. Positions past the end clamp to the end of the document.
    fn range(&self, from: Position, to: Position) -> String;
    /// Counter bumped by every applied edit, used to validate cached outlines.
    fn version(&self) -> u64;
}

/// Cursor control and transactional editing on top of [`TextSource`].
pub trait Editor: TextSource {
    /// Current cursor position.
    fn cursor(&self) -> Position;
    /// Moves the cursor, clamped to the document.
    fn set_cursor(&mut self, position: Position);
    /// Applies every edit of `plan` atomically.
    ///
    /// # Errors
    ///
    /// Returns an error, leaving the document untouched, if edits overlap or a range is inverted.
    fn apply(&mut self, plan: EditPlan) -> Result<(), OutlineError>;

    /// Replaces the text between `from` and `to` (an insertion when `to` is `None`).
    ///
    /// # Errors
    ///
    /// Returns an error if the range is inverted.
    fn replace_range(
        &mut self,
        text: &str,
        from: Position,
        to: Option<Position>,
    ) -> Result<(), OutlineError> {
        self.apply(EditPlan::new(vec![Edit {
            from,
            to,
            text: text.to_string(),
        }]))
    }
}

/// Shared clipboard.
pub trait Clipboard {
    /// Reads the clipboard; empty text when nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn read_text(&mut self) -> Result<String, OutlineError>;
    /// Replaces the clipboard contents.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn write_text(&mut self, text: &str) -> Result<(), OutlineError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
/// Collapsed region anchored at a heading line.
pub struct Fold {
    /// Anchor line.
    pub from: usize,
    /// Conventionally `from + 1`; the host expands the region when rendering.
    pub to: usize,
}

impl Fold {
    #[must_use]
    /// Fold anchored at `line`.
    pub fn at(line: usize) -> Self {
        Self {
            from: line,
            to: line + 1,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Fold set of one view.
pub struct FoldInfo {
    /// Registered folds.
    pub folds: Vec<Fold>,
    /// Document line count when the set was written.
    pub lines: usize,
}

/// Per-view fold storage.
pub trait FoldStore {
    /// Current fold set.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn get_folds(&mut self) -> Result<FoldInfo, OutlineError>;
    /// Replaces the fold set.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn set_folds(&mut self, info: FoldInfo) -> Result<(), OutlineError>;
}

/// Channel for non-fatal advisory messages.
pub trait Notifier {
    /// Shows `message` to the user.
    fn notify(&mut self, message: &str);
}

/// Collaborators available to one command invocation.
pub struct Context<'a> {
    /// Document and cursor.
    pub editor: &'a mut dyn Editor,
    /// Shared clipboard.
    pub clipboard: &'a mut dyn Clipboard,
    /// Fold store of the active view.
    pub folds: &'a mut dyn FoldStore,
    /// Advisory message sink.
    pub notifier: &'a mut dyn Notifier,
    /// Provider of the current heading sequence.
    pub source: &'a dyn HeadingSource,
}

impl Context<'_> {
    /// Heading sequence of the document as it is now.
    ///
    /// # Errors
    ///
    /// Returns an error if the heading source fails to parse the document.
    pub fn outline(&self) -> Result<Outline, OutlineError> {
        self.source.outline(&*self.editor)
    }

    #[must_use]
    /// Text of `line`, empty when out of range.
    pub fn line_text(&self, line: usize) -> String {
        self.editor.line(line).unwrap_or_default()
    }
}
