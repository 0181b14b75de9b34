//! Heading records and single-line ATX marker recognition.
//!
//! A heading is reduced to the two facts the outline needs: how deep it sits and which line it
//! starts on. Lines are 0-based everywhere in this crate.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Deepest ATX heading level (`######`).
pub const MAX_LEVEL: usize = 6;

/// Up to three spaces of indentation, one to six markers, then whitespace or end of line.
static ATX_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^( {0,3})(#{1,6})(?:\s|$)").expect("invalid ATX marker regex"));

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// One ATX heading in document order.
pub struct Heading {
    /// Nesting depth, 1 (`#`) through 6 (`######`).
    pub level: usize,
    /// 0-based line the heading sits on.
    pub line: usize,
}

impl Heading {
    #[must_use]
    /// Creates a heading record.
    pub fn new(level: usize, line: usize) -> Self {
        Self { level, line }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Location of the `#` run on a heading line.
pub struct Marker {
    /// Column of the first `#`.
    pub column: usize,
    /// Number of `#` characters.
    pub level: usize,
}

#[must_use]
/// Recognises an ATX heading marker at the start of `line`.
pub fn marker(line: &str) -> Option<Marker> {
    let captures = ATX_MARKER.captures(line)?;
    let indent = captures.get(1).map_or(0, |m| m.as_str().len());
    let hashes = captures.get(2)?.as_str().len();
    Some(Marker {
        column: indent,
        level: hashes,
    })
}

#[must_use]
/// Level of the heading on `line`, if it is one.
pub fn level_of_line(line: &str) -> Option<usize> {
    marker(line).map(|m| m.level)
}

#[must_use]
/// Column where the `#` run starts, 0 when the line carries no indentation or no marker.
pub fn marker_column(line: &str) -> usize {
    marker(line).map_or(0, |m| m.column)
}
