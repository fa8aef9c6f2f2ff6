//! Merge-time semantic version tag calculator
//!
//! Given a merge commit, works out which branch was merged into which,
//! classifies the merge by branch naming convention and computes the next
//! tag from the tags already in the repository.

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod params;
pub mod resolver;
pub mod ui;

pub use error::{Result, SemverError};
