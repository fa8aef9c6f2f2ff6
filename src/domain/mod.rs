//! Domain logic - pure versioning rules independent of git operations

pub mod branch;
pub mod prerelease;
pub mod tag;
pub mod version;

pub use branch::{classify, BranchKind, BumpMode, BumpStrategy};
pub use prerelease::PrereleaseId;
pub use tag::TagPattern;
pub use version::{PrereleaseField, SemanticVersion, VersionBump};
