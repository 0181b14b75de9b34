//! File-backed clipboard and fold store for the command-line host.
//!
//! Each CLI invocation is a fresh process, so state that an editor would keep in memory between
//! key presses lives in small files instead.

use crate::error::OutlineError;
use crate::host::{Clipboard, FoldInfo, FoldStore};
use std::fs;
use std::io;
use std::path::PathBuf;

/// Clipboard stored as a plain text file.
pub struct FileClipboard {
    path: PathBuf,
}

impl FileClipboard {
    #[must_use]
    /// Clipboard backed by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Clipboard for FileClipboard {
    fn read_text(&mut self) -> Result<String, OutlineError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_text(&mut self, text: &str) -> Result<(), OutlineError> {
        fs::write(&self.path, text)?;
        Ok(())
    }
}

/// Fold set stored as JSON.
pub struct FoldFile {
    path: PathBuf,
}

impl FoldFile {
    #[must_use]
    /// Fold store backed by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FoldStore for FoldFile {
    fn get_folds(&mut self) -> Result<FoldInfo, OutlineError> {
        match fs::read_to_string(&self.path) {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(FoldInfo::default()),
            Err(e) => Err(e.into()),
        }
    }

    fn set_folds(&mut self, info: FoldInfo) -> Result<(), OutlineError> {
        let json = serde_json::to_string_pretty(&info)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/storage.rs"]
mod tests;
