//! Error taxonomy shared by every operation.
//!
//! Advisory variants are refusals the user should hear about (a level would leave 1..=6, a
//! sibling is missing, the clipboard holds no branch). The rest are configuration mistakes or
//! faults in a collaborator. None of them leave the document half-edited.

use thiserror::Error;

/// Everything that can stop an outline operation.
#[derive(Debug, Error)]
pub enum OutlineError {
    /// Single heading is already at depth 6.
    #[error("Demoting heading would exceed maximum depth of 6!")]
    DemoteHeadingExceedsMax,
    /// Some heading in the branch is already at depth 6.
    #[error("Demoting branch would exceed maximum depth of 6!")]
    DemoteBranchExceedsMax,
    /// Branch root is already at depth 1.
    #[error("Cannot promote branch of depth 1!")]
    PromoteTopLevelBranch,
    /// No same-level branch precedes the current one.
    #[error("Branch has no previous sibling!")]
    NoPreviousSibling,
    /// No same-level branch follows the current one.
    #[error("Branch has no next sibling!")]
    NoNextSibling,
    /// Clipboard text does not start with a heading.
    #[error("No branch on clipboard!")]
    NoBranchOnClipboard,
    /// Rebased clipboard headings would go deeper than 6.
    #[error("Pasting here would exceed maximum heading depth of 6!")]
    PasteExceedsMaxLevel,
    /// Rebased clipboard headings would go shallower than 1.
    #[error("Pasting here would raise headings above depth 1!")]
    PasteAboveMinLevel,
    /// A command id was looked up but never registered.
    #[error("Error: Command {0} does not exist.")]
    UnknownCommand(String),
    /// A hotkey string could not be parsed.
    #[error("invalid hotkey {0:?}")]
    InvalidHotkey(String),
    /// `branchmark.toml` exists but could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),
    /// The markdown grammar is incompatible with the linked tree-sitter runtime.
    #[error("failed to load markdown grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),
    /// The heading query does not compile against the grammar.
    #[error("invalid heading query: {0}")]
    Query(#[from] tree_sitter::QueryError),
    /// The parser gave up without producing a tree.
    #[error("markdown parser produced no syntax tree")]
    Parse,
    /// A heading sequence was not in strictly increasing line order.
    #[error("heading at line {line} is out of document order")]
    UnorderedHeadings {
        /// Line of the offending heading.
        line: usize,
    },
    /// A heading sequence carried a level outside 1..=6.
    #[error("heading at line {line} has level {level}, outside 1..=6")]
    InvalidLevel {
        /// Line of the offending heading.
        line: usize,
        /// The rejected level.
        level: usize,
    },
    /// Two edits in one transaction touch the same text.
    #[error("edits in one transaction overlap")]
    OverlappingEdits,
    /// An edit ends before it starts.
    #[error("edit range ends before it starts")]
    InvalidRange,
    /// Backing file of a collaborator could not be read or written.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// Fold store contents are not valid JSON.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl OutlineError {
    #[must_use]
    /// Whether this is a user-facing refusal rather than a fault.
    pub fn is_advisory(&self) -> bool {
        matches!(
            self,
            Self::DemoteHeadingExceedsMax
                | Self::DemoteBranchExceedsMax
                | Self::PromoteTopLevelBranch
                | Self::NoPreviousSibling
                | Self::NoNextSibling
                | Self::NoBranchOnClipboard
                | Self::PasteExceedsMaxLevel
                | Self::PasteAboveMinLevel
        )
    }
}
