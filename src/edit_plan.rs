//! The edit plan is the unit of atomic document mutation.
//!
//! Every structural command expresses its effect as one plan handed to the host editor, which
//! applies all edits or none and records them as a single undo step. Positions in a plan all
//! refer to the document as it was before the plan, so edits never have to account for the line
//! shifts caused by their neighbours.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
/// Cursor or edit position, both coordinates 0-based.
pub struct Position {
    /// Line index.
    pub line: usize,
    /// Character offset within the line.
    pub column: usize,
}

impl Position {
    #[must_use]
    /// Creates a position.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    #[must_use]
    /// Start of `line`.
    pub fn line_start(line: usize) -> Self {
        Self { line, column: 0 }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
/// Replacement of the text between two positions.
pub struct Edit {
    /// Start of the replaced range (inclusive).
    pub from: Position,
    /// End of the replaced range (exclusive); a pure insertion when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<Position>,
    /// Text written in place of the range.
    pub text: String,
}

impl Edit {
    #[must_use]
    /// Inserts `text` at `at`.
    pub fn insert(at: Position, text: impl Into<String>) -> Self {
        Self {
            from: at,
            to: None,
            text: text.into(),
        }
    }

    #[must_use]
    /// Removes the text between `from` and `to`.
    pub fn delete(from: Position, to: Position) -> Self {
        Self {
            from,
            to: Some(to),
            text: String::new(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
/// Serialisable collection of edits applied atomically, plus where the cursor should land.
pub struct EditPlan {
    /// Individual replacements, positioned against the pre-plan document.
    pub edits: Vec<Edit>,
    /// Cursor after the plan; the host maps the old cursor through the edits when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection: Option<Position>,
}

impl EditPlan {
    #[must_use]
    /// Plan made of `edits` with no explicit selection.
    pub fn new(edits: Vec<Edit>) -> Self {
        Self {
            edits,
            selection: None,
        }
    }

    #[must_use]
    /// Sets the cursor position the host should restore after applying the plan.
    pub fn with_selection(mut self, selection: Position) -> Self {
        self.selection = Some(selection);
        self
    }

    #[must_use]
    /// Whether applying the plan would change nothing.
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }
}

#[cfg(test)]
#[path = "tests/edit_plan.rs"]
mod tests;
