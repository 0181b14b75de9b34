//! Heading extraction: from document text to an [`Outline`].
//!
//! Text is parsed with tree-sitter and the format's heading query; marker children give the level
//! and the node's start row gives the 0-based line. Two providers feed the commands: [`Parsed`]
//! re-parses on every request, [`Cached`] keeps the last outline keyed by document version and
//! re-parses only once the document has moved on.

use crate::error::OutlineError;
use crate::formats::Format;
use crate::heading::Heading;
use crate::host::TextSource;
use crate::navigation::Outline;
use std::borrow::Cow;
use std::cell::RefCell;
use streaming_iterator::StreamingIterator;
use tree_sitter::{Node, Parser, Query, QueryCursor};

/// Parses `text` and returns its top-level ATX headings in document order.
///
/// A final line without a terminator is parsed as if it had one; rows are unaffected.
///
/// # Errors
///
/// Returns an error if the grammar cannot be loaded, the query does not compile or the parser
/// produces no tree.
pub fn extract_headings(text: &str, format: &dyn Format) -> Result<Vec<Heading>, OutlineError> {
    let text: Cow<'_, str> = if text.is_empty() || text.ends_with('\n') {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(format!("{text}\n"))
    };
    let text = text.as_ref();

    let language = format.language();
    let mut parser = Parser::new();
    parser.set_language(&language)?;
    let tree = parser.parse(text, None).ok_or(OutlineError::Parse)?;

    let query = Query::new(&language, format.heading_query())?;
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&query, tree.root_node(), text.as_bytes());

    let mut headings = Vec::new();
    while let Some(m) = matches.next() {
        for capture in m.captures {
            let node = capture.node;
            if !is_outline_level(node, format) {
                continue;
            }
            if let Some(level) = marker_level(node, format) {
                headings.push(Heading::new(level, node.start_position().row));
            }
        }
    }
    headings.sort_by_key(|h| h.line);
    headings.dedup_by_key(|h| h.line);
    Ok(headings)
}

fn marker_level(node: Node<'_>, format: &dyn Format) -> Option<usize> {
    let mut walker = node.walk();
    let level = node
        .children(&mut walker)
        .find_map(|child| format.marker_level(child.kind()));
    level
}

fn is_outline_level(node: Node<'_>, format: &dyn Format) -> bool {
    let containers = format.container_kinds();
    let mut parent = node.parent();
    while let Some(p) = parent {
        if !containers.contains(&p.kind()) {
            return false;
        }
        parent = p.parent();
    }
    true
}

/// Supplies the heading sequence an operation works on.
pub trait HeadingSource {
    /// Outline of the document in its current state.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be parsed.
    fn outline(&self, doc: &dyn TextSource) -> Result<Outline, OutlineError>;

    /// Outline of free-standing text such as clipboard contents. Never cached.
    ///
    /// # Errors
    ///
    /// Returns an error if the text cannot be parsed.
    fn parse(&self, text: &str) -> Result<Outline, OutlineError>;
}

/// Parses the document afresh on every request.
pub struct Parsed<F: Format> {
    format: F,
}

impl<F: Format> Parsed<F> {
    #[must_use]
    /// Provider parsing with `format`.
    pub fn new(format: F) -> Self {
        Self { format }
    }
}

impl<F: Format> HeadingSource for Parsed<F> {
    fn outline(&self, doc: &dyn TextSource) -> Result<Outline, OutlineError> {
        self.parse(&doc.text())
    }

    fn parse(&self, text: &str) -> Result<Outline, OutlineError> {
        Outline::new(extract_headings(text, &self.format)?)
    }
}

/// Keeps the last outline and reuses it while the document version is unchanged.
///
/// A cache only ever serves the document it was filled from; one instance per view.
pub struct Cached<F: Format> {
    format: F,
    entry: RefCell<Option<(u64, Outline)>>,
}

impl<F: Format> Cached<F> {
    #[must_use]
    /// Empty cache parsing with `format` on a miss.
    pub fn new(format: F) -> Self {
        Self {
            format,
            entry: RefCell::new(None),
        }
    }

    #[must_use]
    /// Document version the cached outline belongs to.
    pub fn cached_version(&self) -> Option<u64> {
        self.entry.borrow().as_ref().map(|(version, _)| *version)
    }
}

impl<F: Format> HeadingSource for Cached<F> {
    fn outline(&self, doc: &dyn TextSource) -> Result<Outline, OutlineError> {
        let version = doc.version();
        if let Some((cached, outline)) = self.entry.borrow().as_ref() {
            if *cached == version {
                return Ok(outline.clone());
            }
        }
        tracing::debug!(version, "heading cache miss");
        let outline = self.parse(&doc.text())?;
        *self.entry.borrow_mut() = Some((version, outline.clone()));
        Ok(outline)
    }

    fn parse(&self, text: &str) -> Result<Outline, OutlineError> {
        Outline::new(extract_headings(text, &self.format)?)
    }
}

#[cfg(test)]
#[path = "tests/input.rs"]
mod tests;
