//! Prerelease build numbering
//!
//! A build tag carries exactly two prerelease fields: the configured
//! identifier followed by a counter, e.g. `1.4.0-alpha.3`. Successive builds
//! on the same version line continue the counter; a field bump restarts it.

use crate::domain::version::{PrereleaseField, SemanticVersion};
use crate::error::{Result, SemverError};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Validated prerelease identifier (the first prerelease field of a build tag)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrereleaseId(String);

impl PrereleaseId {
    /// Parse a prerelease identifier
    ///
    /// Accepts a non-empty ASCII alphanumeric/hyphen string that is not purely
    /// numeric, so it can never be confused with the build counter.
    pub fn parse(s: &str) -> Result<Self> {
        s.parse()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for PrereleaseId {
    type Err = SemverError;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(SemverError::parameter("empty prerelease identifier"));
        }

        if !s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(SemverError::parameter(format!(
                "invalid prerelease identifier: '{}'",
                s
            )));
        }

        if s.chars().all(|c| c.is_ascii_digit()) {
            return Err(SemverError::parameter(format!(
                "prerelease identifier must not be numeric: '{}'",
                s
            )));
        }

        Ok(PrereleaseId(s.to_string()))
    }
}

impl Default for PrereleaseId {
    fn default() -> Self {
        PrereleaseId("pre".to_string())
    }
}

impl fmt::Display for PrereleaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Counter of the build this version line has reached so far
///
/// Continues from the second prerelease field when the value already carries
/// one and no field bump was applied this round. Anything else starts a new
/// line at 0.
pub fn prior_build_number(pre: &[PrereleaseField], bumped: bool) -> u64 {
    if bumped || pre.len() < 2 {
        return 0;
    }

    match pre[1].as_number() {
        Some(n) => n,
        None => {
            warn!(field = %pre[1], "non-numeric build counter, restarting at 1");
            0
        }
    }
}

/// Replace the prerelease of `version` with the next build of its line
///
/// Build metadata from the previous tag is dropped. Returns the new build
/// counter.
pub fn cut_build(version: &mut SemanticVersion, id: &PrereleaseId, bumped: bool) -> Result<u64> {
    let next = prior_build_number(&version.pre, bumped)
        .checked_add(1)
        .ok_or(SemverError::VersionOverflow { field: "build" })?;

    version.pre = vec![
        PrereleaseField::Alpha(id.as_str().to_string()),
        PrereleaseField::Numeric(next),
    ];
    version.build.clear();
    Ok(next)
}
