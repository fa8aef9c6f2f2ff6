//! Tag resolution engine
//!
//! [TagResolver] turns a classified merge into the next tag; the
//! [AncestorReconciler] picks the ancestor tag range it descends from and
//! decides whether a maintenance merge reuses an existing tag.

pub mod ancestor;
pub mod tag_resolver;

pub use ancestor::AncestorReconciler;
pub use tag_resolver::{starting_version, TagResolver};

use serde::Serialize;

/// Computed tag and the metadata a caller needs to publish it
///
/// All fields are empty when the merge does not produce a release.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TagResult {
    /// Prefix-qualified tag resolution started from (`<prefix>0.0.0` when untagged)
    pub previous_tag: String,
    /// Tag reported for the ancestor include/exclude pattern
    pub ancestor_tag: String,
    /// Tag to publish, empty for "no release"
    pub semver_tag: String,
    pub is_prerelease: bool,
}

impl TagResult {
    /// Whether a tag should be published at all
    pub fn is_release(&self) -> bool {
        !self.semver_tag.is_empty()
    }
}
