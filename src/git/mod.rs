//! Git operations abstraction layer
//!
//! The resolver only needs a handful of repository facts: which branch is
//! checked out, which branch a merge commit brought in, and which tags are
//! reachable. The [Repository] trait exposes exactly those, so the core can
//! run against a real repository or an in-memory one.
//!
//! - [repository::Git2Repository]: libgit2-backed implementation using the `git2` crate
//! - [mock::MockRepository]: in-memory implementation for tests
//!
//! ```rust
//! # use merge_semver::git::Repository;
//! # use merge_semver::domain::TagPattern;
//! # fn example<R: Repository>(repo: &R) -> merge_semver::Result<()> {
//! let dest = repo.current_branch()?;
//! let ancestor = repo.ancestor_tag(&TagPattern::release("v", "pre"), &dest);
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::domain::TagPattern;
use crate::error::Result;

/// Repository facts needed to compute a tag
///
/// Lookups that may legitimately find nothing (`latest_tag`, `ancestor_tag`)
/// return `None` rather than an error.
pub trait Repository: Send + Sync {
    /// Whether the configured path is inside a git work tree
    fn is_repo(&self) -> bool;

    /// Mark the repository as safe for the current user
    ///
    /// Must be idempotent: CI runners call it on every invocation.
    fn make_safe(&self) -> Result<()>;

    /// Name of the checked-out branch (the merge destination)
    fn current_branch(&self) -> Result<String>;

    /// Name of the branch that introduced `commit` (the merge source)
    ///
    /// `commit` is any revision git understands, typically a sha or `HEAD`.
    fn source_branch(&self, commit: &str) -> Result<String>;

    /// Most recent tag reachable from HEAD
    fn latest_tag(&self) -> Option<String>;

    /// Most recent tag reachable from `branch` selected by `pattern`
    fn ancestor_tag(&self, pattern: &TagPattern, branch: &str) -> Option<String>;
}
