//! branchmark: outline-aware navigation and restructuring of markdown headings.
//!
//! A flat markdown document is read as an implicit tree: every ATX heading roots a branch that
//! extends to the next heading of equal or shallower level. On top of that reading the crate
//! moves the cursor along the outline, promotes and demotes headings or whole branches, swaps
//! sibling branches, cuts, copies and pastes branches with their levels rebased, and drives
//! folding.
//!
//! The host editor, clipboard and fold store stay outside the crate behind the traits in
//! [`host`]; [`buffer`] and [`storage`] provide in-memory and file-backed implementations.
#![allow(clippy::multiple_crate_versions)]

pub mod branch;
pub mod buffer;
pub mod commands;
pub mod config;
pub mod edit_plan;
pub mod error;
pub mod folding;
pub mod formats;
pub mod heading;
pub mod host;
pub mod hotkeys;
pub mod input;
pub mod motion;
pub mod navigation;
pub mod storage;

#[cfg(test)]
#[path = "tests/properties.rs"]
mod properties;
