//! Branch edit engine: structure-preserving edits composed from navigation results.
//!
//! Checked operations share one signature, `fn(&mut Context, checking) -> Result<bool, _>`.
//! With `checking` set they only report applicability and never touch the document. Without it
//! they re-derive everything from the current text and either apply a single [`EditPlan`] or
//! return an error before any mutation.

use crate::edit_plan::{Edit, EditPlan, Position};
use crate::error::OutlineError;
use crate::heading::{self, MAX_LEVEL};
use crate::host::Context;
use crate::navigation::Outline;

/// Root index of the branch whose heading sits on the cursor line.
fn branch_at_cursor(cx: &Context<'_>, outline: &Outline) -> Option<usize> {
    outline.heading_index_at_line(cx.editor.cursor().line)
}

/// One `#` edit per heading of the branch rooted at `index`.
fn marker_edits(cx: &Context<'_>, outline: &Outline, index: usize, demote: bool) -> Vec<Edit> {
    outline.headings()[outline.branch_indices(index)]
        .iter()
        .map(|h| {
            let column = heading::marker_column(&cx.line_text(h.line));
            let at = Position::new(h.line, column);
            if demote {
                Edit::insert(at, "#")
            } else {
                Edit::delete(at, Position::new(h.line, column + 1))
            }
        })
        .collect()
}

/// Text of lines `start..end`, terminated by a newline.
fn branch_text(cx: &Context<'_>, start: usize, end: usize) -> String {
    let mut text = cx
        .editor
        .range(Position::line_start(start), Position::line_start(end));
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}

/// Adds one `#` to the heading on the cursor line.
///
/// # Errors
///
/// Returns an error if the heading is already at depth 6.
pub fn demote_heading(cx: &mut Context<'_>, checking: bool) -> Result<bool, OutlineError> {
    let line = cx.editor.cursor().line;
    let Some(marker) = heading::marker(&cx.line_text(line)) else {
        return Ok(false);
    };
    if checking {
        return Ok(true);
    }
    if marker.level >= MAX_LEVEL {
        return Err(OutlineError::DemoteHeadingExceedsMax);
    }
    cx.editor
        .replace_range("#", Position::new(line, marker.column), None)?;
    Ok(true)
}

/// Removes one `#` from the heading on the cursor line; unavailable at depth 1.
///
/// # Errors
///
/// Returns an error if the host rejects the edit.
pub fn promote_heading(cx: &mut Context<'_>, checking: bool) -> Result<bool, OutlineError> {
    let line = cx.editor.cursor().line;
    let Some(marker) = heading::marker(&cx.line_text(line)) else {
        return Ok(false);
    };
    if marker.level < 2 {
        return Ok(false);
    }
    if !checking {
        cx.editor.replace_range(
            "",
            Position::new(line, marker.column),
            Some(Position::new(line, marker.column + 1)),
        )?;
    }
    Ok(true)
}

/// Adds one `#` to every heading of the branch rooted on the cursor line.
///
/// # Errors
///
/// Returns an error, without editing, if any heading in the branch is at depth 6.
pub fn demote_branch(cx: &mut Context<'_>, checking: bool) -> Result<bool, OutlineError> {
    let outline = cx.outline()?;
    let Some(index) = branch_at_cursor(cx, &outline) else {
        return Ok(false);
    };
    if checking {
        return Ok(true);
    }
    let range = outline.branch_indices(index);
    if outline.headings()[range].iter().any(|h| h.level >= MAX_LEVEL) {
        return Err(OutlineError::DemoteBranchExceedsMax);
    }
    let edits = marker_edits(cx, &outline, index, true);
    cx.editor.apply(EditPlan::new(edits))?;
    Ok(true)
}

/// Removes one `#` from every heading of the branch rooted on the cursor line.
///
/// # Errors
///
/// Returns an error, without editing, if the branch root is at depth 1.
pub fn promote_branch(cx: &mut Context<'_>, checking: bool) -> Result<bool, OutlineError> {
    let outline = cx.outline()?;
    let Some(index) = branch_at_cursor(cx, &outline) else {
        return Ok(false);
    };
    if checking {
        return Ok(true);
    }
    if outline.headings()[index].level < 2 {
        return Err(OutlineError::PromoteTopLevelBranch);
    }
    let edits = marker_edits(cx, &outline, index, false);
    cx.editor.apply(EditPlan::new(edits))?;
    Ok(true)
}

/// Swaps the branch on the cursor line with its previous same-level sibling.
///
/// # Errors
///
/// Returns an error if no previous sibling exists.
pub fn move_branch_up(cx: &mut Context<'_>, checking: bool) -> Result<bool, OutlineError> {
    let outline = cx.outline()?;
    let Some(index) = branch_at_cursor(cx, &outline) else {
        return Ok(false);
    };
    let sibling = outline.previous_sibling_index(index);
    if checking {
        return Ok(sibling.is_some());
    }
    let Some(sibling) = sibling else {
        return Err(OutlineError::NoPreviousSibling);
    };
    let Some(current) = outline.line_range_of_index(index) else {
        return Ok(false);
    };
    let start = current.start;
    let end = current.end_or(cx.editor.line_count());
    let target = outline.headings()[sibling].line;
    let text = branch_text(cx, start, end);
    let column = cx.editor.cursor().column;

    let plan = EditPlan::new(vec![
        Edit::delete(Position::line_start(start), Position::line_start(end)),
        Edit::insert(Position::line_start(target), text),
    ])
    .with_selection(Position::new(target, column));
    cx.editor.apply(plan)?;
    Ok(true)
}

/// Swaps the branch on the cursor line with its next same-level sibling.
///
/// # Errors
///
/// Returns an error if no next sibling exists.
pub fn move_branch_down(cx: &mut Context<'_>, checking: bool) -> Result<bool, OutlineError> {
    let outline = cx.outline()?;
    let Some(index) = branch_at_cursor(cx, &outline) else {
        return Ok(false);
    };
    let sibling = outline.next_sibling_index(index);
    if checking {
        return Ok(sibling.is_some());
    }
    let Some(sibling) = sibling else {
        return Err(OutlineError::NoNextSibling);
    };
    let Some(next) = outline.line_range_of_index(sibling) else {
        return Ok(false);
    };
    let current_start = outline.headings()[index].line;
    let next_end = next.end_or(cx.editor.line_count());
    let text = branch_text(cx, next.start, next_end);
    let column = cx.editor.cursor().column;
    let new_line = current_start + text.matches('\n').count();

    let plan = EditPlan::new(vec![
        Edit::delete(Position::line_start(next.start), Position::line_start(next_end)),
        Edit::insert(Position::line_start(current_start), text),
    ])
    .with_selection(Position::new(new_line, column));
    cx.editor.apply(plan)?;
    Ok(true)
}

/// Newline-terminated text and line extent of the branch rooted on the cursor line.
fn extract_branch(cx: &Context<'_>) -> Result<Option<(String, usize, usize)>, OutlineError> {
    let outline = cx.outline()?;
    let Some(index) = branch_at_cursor(cx, &outline) else {
        return Ok(None);
    };
    let Some(range) = outline.line_range_of_index(index) else {
        return Ok(None);
    };
    let end = range.end_or(cx.editor.line_count());
    Ok(Some((branch_text(cx, range.start, end), range.start, end)))
}

/// Writes the branch on the cursor line to the clipboard.
///
/// # Errors
///
/// Returns an error if the clipboard cannot be written.
pub fn copy_branch(cx: &mut Context<'_>, checking: bool) -> Result<bool, OutlineError> {
    let Some((text, _, _)) = extract_branch(cx)? else {
        return Ok(false);
    };
    if !checking {
        cx.clipboard.write_text(&text)?;
        cx.notifier.notify("Copied branch to clipboard.");
    }
    Ok(true)
}

/// Moves the branch on the cursor line to the clipboard.
///
/// # Errors
///
/// Returns an error if the clipboard cannot be written; the document is then left unchanged.
pub fn cut_branch(cx: &mut Context<'_>, checking: bool) -> Result<bool, OutlineError> {
    let Some((text, start, end)) = extract_branch(cx)? else {
        return Ok(false);
    };
    if !checking {
        cx.clipboard.write_text(&text)?;
        cx.editor.replace_range(
            "",
            Position::line_start(start),
            Some(Position::line_start(end)),
        )?;
    }
    Ok(true)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// State captured before the clipboard read of a paste.
pub struct PendingPaste {
    /// Cursor when the paste was requested.
    pub cursor: Position,
    /// Level the pasted root will be rebased to.
    pub level: usize,
}

/// First half of a paste: records the cursor and the level of the branch containing it.
///
/// # Errors
///
/// Returns an error if the document cannot be parsed.
pub fn begin_paste(cx: &Context<'_>) -> Result<PendingPaste, OutlineError> {
    let outline = cx.outline()?;
    let cursor = cx.editor.cursor();
    let level = outline
        .branch_index_containing(cursor.line)
        .map_or(1, |i| outline.headings()[i].level);
    Ok(PendingPaste { cursor, level })
}

/// Second half of a paste: inserts `text` at the recorded line and rebases its headings.
///
/// # Errors
///
/// Returns an error, without editing, if `text` does not start with a heading or rebasing would
/// move any of its headings outside 1..=6.
pub fn finish_paste(
    cx: &mut Context<'_>,
    pending: PendingPaste,
    text: &str,
) -> Result<(), OutlineError> {
    let first_line = text.lines().next().unwrap_or_default();
    if heading::marker(first_line).is_none() {
        return Err(OutlineError::NoBranchOnClipboard);
    }
    let pasted = cx.source.parse(text)?;
    let Some(root) = pasted.headings().first() else {
        return Err(OutlineError::NoBranchOnClipboard);
    };

    let (deepen, raise) = if pending.level >= root.level {
        (pending.level - root.level, 0)
    } else {
        (0, root.level - pending.level)
    };
    let levels = pasted.headings().iter().map(|h| h.level);
    if levels.clone().max().unwrap_or(root.level) + deepen > MAX_LEVEL {
        return Err(OutlineError::PasteExceedsMaxLevel);
    }
    if levels.min().unwrap_or(root.level) <= raise {
        return Err(OutlineError::PasteAboveMinLevel);
    }

    let mut branch = text.to_string();
    if !branch.ends_with('\n') {
        branch.push('\n');
    }
    let line = pending.cursor.line;
    let inserted_lines = branch.matches('\n').count();
    let columns: Vec<usize> = branch.lines().map(heading::marker_column).collect();
    cx.editor.apply(EditPlan::new(vec![Edit::insert(
        Position::line_start(line),
        branch.clone(),
    )]))?;

    let mut edits = Vec::new();
    if deepen > 0 {
        let markers = "#".repeat(deepen);
        for h in pasted.headings() {
            let column = columns.get(h.line).copied().unwrap_or_default();
            edits.push(Edit::insert(Position::new(line + h.line, column), markers.as_str()));
        }
    } else if raise > 0 {
        for h in pasted.headings().iter().rev() {
            let column = columns.get(h.line).copied().unwrap_or_default();
            edits.push(Edit::delete(
                Position::new(line + h.line, column),
                Position::new(line + h.line, column + raise),
            ));
        }
    }
    let selection = Position::new(line + inserted_lines, pending.cursor.column);
    if edits.is_empty() {
        cx.editor.set_cursor(selection);
    } else {
        cx.editor
            .apply(EditPlan::new(edits).with_selection(selection))?;
    }
    Ok(())
}

/// Pastes the clipboard branch at the cursor line, rebased to the level of the branch there.
///
/// # Errors
///
/// Returns an error if the clipboard is unreadable, holds no branch, or the rebased levels would
/// leave 1..=6.
pub fn paste_branch(cx: &mut Context<'_>) -> Result<(), OutlineError> {
    let pending = begin_paste(cx)?;
    let text = cx.clipboard.read_text()?;
    finish_paste(cx, pending, &text)
}

#[cfg(test)]
#[path = "tests/branch.rs"]
mod tests;
