//! Folding controller: heading branches mapped onto the host's fold set.
//!
//! A fold only registers the anchor pair `{from: line, to: line + 1}` of a heading; the host
//! widens it to the heading's content when rendering.

use crate::edit_plan::Position;
use crate::error::OutlineError;
use crate::host::{Context, Fold, FoldInfo};
use std::collections::HashSet;

/// Folds or unfolds the branch containing the cursor.
///
/// The cursor snaps to the branch's heading line, just after its marker.
///
/// # Errors
///
/// Returns an error if the document cannot be parsed or the fold store fails.
pub fn toggle_fold(cx: &mut Context<'_>) -> Result<(), OutlineError> {
    let outline = cx.outline()?;
    let Some(index) = outline.branch_index_containing(cx.editor.cursor().line) else {
        return Ok(());
    };
    let heading = outline.headings()[index];
    if cx.editor.cursor().line != heading.line {
        cx.editor
            .set_cursor(Position::new(heading.line, heading.level + 1));
    }

    let mut folds = cx.folds.get_folds()?.folds;
    if folds.iter().any(|fold| fold.from == heading.line) {
        folds.retain(|fold| fold.from != heading.line);
        tracing::debug!(line = heading.line, "unfold");
    } else {
        folds.push(Fold::at(heading.line));
        tracing::debug!(line = heading.line, "fold");
    }
    cx.folds.set_folds(FoldInfo {
        folds,
        lines: cx.editor.line_count(),
    })
}

/// Folds every heading except the branch containing the cursor and its ancestors.
///
/// The existing fold set is replaced, not merged.
///
/// # Errors
///
/// Returns an error if the document cannot be parsed or the fold store fails.
pub fn focus_fold(cx: &mut Context<'_>) -> Result<(), OutlineError> {
    let outline = cx.outline()?;
    let Some(index) = outline.branch_index_containing(cx.editor.cursor().line) else {
        return Ok(());
    };
    let focused: HashSet<usize> = outline
        .ancestor_chain(index)
        .into_iter()
        .map(|i| outline.headings()[i].line)
        .collect();
    let folds = outline
        .headings()
        .iter()
        .filter(|h| !focused.contains(&h.line))
        .map(|h| Fold::at(h.line))
        .collect();
    cx.folds.set_folds(FoldInfo {
        folds,
        lines: cx.editor.line_count(),
    })
}

#[cfg(test)]
#[path = "tests/folding.rs"]
mod tests;
