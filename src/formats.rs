//! Format trait describing how a grammar exposes ATX headings.
//!
//! Heading extraction is grammar-agnostic: a format supplies the tree-sitter language, a query
//! capturing heading nodes, the marker node kinds that encode depth, and the container kinds a
//! heading may sit inside and still count as part of the document outline.

pub mod markdown;

/// Grammar-specific knowledge needed to pull an outline out of a syntax tree.
pub trait Format {
    /// Tree-sitter language used to parse documents.
    fn language(&self) -> tree_sitter::Language;
    /// Query whose captures are heading nodes.
    fn heading_query(&self) -> &str;
    /// Depth encoded by a marker child of a heading node, if `kind` is a marker.
    fn marker_level(&self, kind: &str) -> Option<usize>;
    /// Ancestor kinds that keep a heading at the top level of the outline.
    fn container_kinds(&self) -> &[&str];
}
