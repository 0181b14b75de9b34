//! Configuration to acknowledge developer preferences as well as set defaults.
//!
//! Specifically, we try to find a branchmark.toml, and if present we load settings from there.
//! This provides where the command-line host keeps its clipboard and fold state.

use crate::error::OutlineError;
use facet::Facet;
use std::path::Path;
use std::{fs, io};

/// File looked up in the working directory.
pub const CONFIG_FILE: &str = "branchmark.toml";

#[derive(Facet, Clone, Debug)]
/// User preferences loaded from branchmark.toml or falling back to defaults.
pub struct Config {
    #[facet(default = ".branchmark-clipboard".to_string())]
    /// Text file standing in for the system clipboard.
    pub clipboard_file: String,
    #[facet(default = ".branchmark-folds.json".to_string())]
    /// JSON file holding the fold set.
    pub fold_file: String,
}

impl Config {
    /// Load configuration from branchmark.toml if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self, OutlineError> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    /// Load configuration from `path`, using defaults when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, OutlineError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(e.into()),
        };
        Self::parse(&contents)
    }

    /// Parse configuration from TOML text; missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid configuration.
    pub fn parse(contents: &str) -> Result<Self, OutlineError> {
        facet_toml::from_str::<Self>(contents).map_err(|e| OutlineError::Config(e.to_string()))
    }
}
