//! Cursor jumps along the outline and quick insertion of sibling headings.
//!
//! Jumps keep the cursor's column relative to the heading text: a cursor three characters into
//! `## Title` lands three characters into `# Other`, clamped to the target line.

use crate::edit_plan::{Edit, EditPlan, Position};
use crate::error::OutlineError;
use crate::heading::Heading;
use crate::host::Context;

/// Column offset from the start of the heading text, negative inside the marker.
fn text_column(cursor: Position, heading: Heading) -> isize {
    let column = isize::try_from(cursor.column).unwrap_or(isize::MAX);
    if cursor.line == heading.line {
        column - isize::try_from(heading.level + 1).unwrap_or(isize::MAX)
    } else {
        column
    }
}

/// Moves the cursor onto `target`, `relative` characters into its heading text.
fn jump(cx: &mut Context<'_>, target: Heading, relative: isize) {
    let offset = isize::try_from(target.level + 1).unwrap_or(isize::MAX);
    let length = cx.line_text(target.line).chars().count();
    let column = usize::try_from((relative + offset).max(0)).unwrap_or(0);
    cx.editor
        .set_cursor(Position::new(target.line, column.min(length)));
}

/// Jumps to the previous sibling-or-ancestor heading, or to the containing branch's own heading
/// when the cursor is in its body.
///
/// # Errors
///
/// Returns an error if the document cannot be parsed.
pub fn goto_previous_branch(cx: &mut Context<'_>) -> Result<(), OutlineError> {
    let outline = cx.outline()?;
    let cursor = cx.editor.cursor();
    let Some(mut index) = outline.branch_index_containing(cursor.line) else {
        return Ok(());
    };
    let relative = text_column(cursor, outline.headings()[index]);
    if outline.headings()[index].line == cursor.line {
        let Some(previous) = outline.previous_branch_index(index) else {
            return Ok(());
        };
        index = previous;
    }
    jump(cx, outline.headings()[index], relative);
    Ok(())
}

/// Jumps to the next branch: the end of the current branch from its heading, the next heading
/// from inside a body, the first heading from the preamble.
///
/// # Errors
///
/// Returns an error if the document cannot be parsed.
pub fn goto_next_branch(cx: &mut Context<'_>) -> Result<(), OutlineError> {
    let outline = cx.outline()?;
    if outline.is_empty() {
        return Ok(());
    }
    let cursor = cx.editor.cursor();
    let (index, relative) = match outline.branch_index_containing(cursor.line) {
        None => (0, text_column(cursor, outline.headings()[0])),
        Some(index) => {
            let current = outline.headings()[index];
            let relative = text_column(cursor, current);
            let next = if current.line == cursor.line {
                outline.branch_end_index(index)
            } else {
                Some(index + 1).filter(|&i| i < outline.len())
            };
            let Some(next) = next else {
                return Ok(());
            };
            (next, relative)
        }
    };
    jump(cx, outline.headings()[index], relative);
    Ok(())
}

/// Jumps to the parent heading of the branch containing the cursor.
///
/// # Errors
///
/// Returns an error if the document cannot be parsed.
pub fn goto_parent_heading(cx: &mut Context<'_>) -> Result<(), OutlineError> {
    let outline = cx.outline()?;
    let cursor = cx.editor.cursor();
    let Some(index) = outline.branch_index_containing(cursor.line) else {
        return Ok(());
    };
    let Some(parent) = outline.parent_index(index) else {
        return Ok(());
    };
    let relative = text_column(cursor, outline.headings()[index]);
    jump(cx, outline.headings()[parent], relative);
    Ok(())
}

/// Inserts an empty heading at the level of the current branch, right after that branch.
///
/// # Errors
///
/// Returns an error if the document cannot be parsed or the edit is rejected.
pub fn add_heading_below(cx: &mut Context<'_>) -> Result<(), OutlineError> {
    let outline = cx.outline()?;
    let Some(index) = outline.branch_index_containing(cx.editor.cursor().line) else {
        return Ok(());
    };
    let level = outline.headings()[index].level;
    let marker = "#".repeat(level);

    let (at, text, line) = match outline.branch_end_index(index) {
        Some(end) => {
            let line = outline.headings()[end].line;
            (Position::line_start(line), format!("{marker} \n"), line)
        }
        None => {
            let last = cx.editor.line_count().saturating_sub(1);
            let tail = cx.line_text(last);
            if tail.is_empty() {
                (Position::line_start(last), format!("{marker} "), last)
            } else {
                let end_of_last = Position::new(last, tail.chars().count());
                (end_of_last, format!("\n{marker} "), last + 1)
            }
        }
    };
    let plan = EditPlan::new(vec![Edit::insert(at, text)])
        .with_selection(Position::new(line, level + 1));
    cx.editor.apply(plan)
}

#[cfg(test)]
#[path = "tests/motion.rs"]
mod tests;
