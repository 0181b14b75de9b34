//! Tree navigation over a flat heading sequence.
//!
//! The document is never materialised as a tree. A branch is the run of headings from a root to
//! the first later heading whose level is equal or shallower, so every relationship (parent,
//! sibling, ancestor, branch extent) falls out of a linear scan comparing levels. Heading counts
//! per document are small, so every lookup is a plain O(n) walk.

use crate::error::OutlineError;
use crate::heading::{Heading, MAX_LEVEL};
use std::ops::Range;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Line extent of a branch, end-exclusive.
pub struct LineRange {
    /// First line of the branch (its root heading).
    pub start: usize,
    /// Line of the heading that closes the branch; `None` when it runs to document end.
    pub end: Option<usize>,
}

impl LineRange {
    #[must_use]
    /// Exclusive end line, resolving "runs to document end" against `line_count`.
    pub fn end_or(&self, line_count: usize) -> usize {
        self.end.unwrap_or(line_count)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Heading sequence of one document in strictly increasing line order.
///
/// Built fresh for each operation and thrown away afterwards: indices into an outline are only
/// meaningful for the text it was derived from.
pub struct Outline {
    headings: Vec<Heading>,
}

impl Outline {
    /// Validates ordering and levels of a heading sequence.
    ///
    /// # Errors
    ///
    /// Returns an error if lines are not strictly increasing or a level is outside 1..=6.
    pub fn new(headings: Vec<Heading>) -> Result<Self, OutlineError> {
        for (i, heading) in headings.iter().enumerate() {
            if !(1..=MAX_LEVEL).contains(&heading.level) {
                return Err(OutlineError::InvalidLevel {
                    line: heading.line,
                    level: heading.level,
                });
            }
            if i > 0 && headings[i - 1].line >= heading.line {
                return Err(OutlineError::UnorderedHeadings { line: heading.line });
            }
        }
        Ok(Self { headings })
    }

    #[must_use]
    /// All headings in document order.
    pub fn headings(&self) -> &[Heading] {
        &self.headings
    }

    #[must_use]
    /// Heading at `index`.
    pub fn get(&self, index: usize) -> Option<&Heading> {
        self.headings.get(index)
    }

    #[must_use]
    /// Number of headings.
    pub fn len(&self) -> usize {
        self.headings.len()
    }

    #[must_use]
    /// Whether the document has no headings.
    pub fn is_empty(&self) -> bool {
        self.headings.is_empty()
    }

    #[must_use]
    /// Index of the branch containing `line`: the last heading starting at or before it.
    ///
    /// `None` when `line` precedes the first heading (front matter, preamble text).
    pub fn branch_index_containing(&self, line: usize) -> Option<usize> {
        self.headings.iter().rposition(|h| h.line <= line)
    }

    #[must_use]
    /// Index of the heading sitting exactly on `line`.
    pub fn heading_index_at_line(&self, line: usize) -> Option<usize> {
        self.headings.binary_search_by_key(&line, |h| h.line).ok()
    }

    #[must_use]
    /// First index after `index` whose level is equal or shallower.
    ///
    /// This is both the next sibling (or uncle) and the exclusive end of the branch. `None` when
    /// the branch runs to the end of the document.
    pub fn branch_end_index(&self, index: usize) -> Option<usize> {
        let level = self.headings.get(index)?.level;
        self.headings
            .iter()
            .enumerate()
            .skip(index + 1)
            .find(|(_, h)| h.level <= level)
            .map(|(i, _)| i)
    }

    #[must_use]
    /// Nearest preceding heading with a strictly smaller level.
    pub fn parent_index(&self, index: usize) -> Option<usize> {
        let level = self.headings.get(index)?.level;
        self.headings[..index].iter().rposition(|h| h.level < level)
    }

    #[must_use]
    /// Nearest preceding heading with an equal or smaller level.
    ///
    /// That is the previous sibling when one exists, otherwise the parent.
    pub fn previous_branch_index(&self, index: usize) -> Option<usize> {
        let level = self.headings.get(index)?.level;
        self.headings[..index].iter().rposition(|h| h.level <= level)
    }

    #[must_use]
    /// Previous branch root at exactly the same level.
    pub fn previous_sibling_index(&self, index: usize) -> Option<usize> {
        let level = self.headings.get(index)?.level;
        self.previous_branch_index(index)
            .filter(|&i| self.headings[i].level == level)
    }

    #[must_use]
    /// Next branch root at exactly the same level.
    pub fn next_sibling_index(&self, index: usize) -> Option<usize> {
        let level = self.headings.get(index)?.level;
        self.branch_end_index(index)
            .filter(|&i| self.headings[i].level == level)
    }

    #[must_use]
    /// Last heading strictly before `line` whose level is at most `max_level`.
    ///
    /// Any level qualifies when `max_level` is `None`.
    pub fn previous_heading_at_or_above(
        &self,
        line: usize,
        max_level: Option<usize>,
    ) -> Option<usize> {
        self.headings
            .iter()
            .rposition(|h| h.line < line && max_level.is_none_or(|max| h.level <= max))
    }

    #[must_use]
    /// Heading indices making up the branch rooted at `index`, root included.
    pub fn branch_indices(&self, index: usize) -> Range<usize> {
        if index >= self.headings.len() {
            return index..index;
        }
        index..self.branch_end_index(index).unwrap_or(self.headings.len())
    }

    #[must_use]
    /// Line extent of the branch rooted at `index`.
    pub fn line_range_of_index(&self, index: usize) -> Option<LineRange> {
        let start = self.headings.get(index)?.line;
        let end = self.branch_end_index(index).map(|i| self.headings[i].line);
        Some(LineRange { start, end })
    }

    #[must_use]
    /// Line extent of the branch containing `line`.
    pub fn line_range_of_branch(&self, line: usize) -> Option<LineRange> {
        self.line_range_of_index(self.branch_index_containing(line)?)
    }

    #[must_use]
    /// Line extent of the same-level branch immediately before the one containing `line`.
    ///
    /// When the backward walk lands on a shallower heading there is no true previous sibling and
    /// the result is `None` rather than the ancestor's range.
    pub fn line_range_of_previous_branch(&self, line: usize) -> Option<LineRange> {
        let index = self.branch_index_containing(line)?;
        let previous = self.previous_branch_index(index)?;
        if self.headings[previous].level != self.headings[index].level {
            return None;
        }
        self.line_range_of_index(previous)
    }

    #[must_use]
    /// The heading at `index` followed by its parent, grandparent and so on up to the root.
    pub fn ancestor_chain(&self, index: usize) -> Vec<usize> {
        let mut chain = Vec::new();
        let mut current = if index < self.headings.len() {
            Some(index)
        } else {
            None
        };
        while let Some(i) = current {
            chain.push(i);
            current = self.parent_index(i);
        }
        chain
    }
}

#[cfg(test)]
#[path = "tests/navigation.rs"]
mod tests;
