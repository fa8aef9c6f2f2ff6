use crate::error::{Result, SemverError};
use std::fmt;
use std::str::FromStr;

/// A single dot-separated prerelease field
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PrereleaseField {
    /// An alphanumeric identifier (e.g. "alpha" in 1.0.0-alpha.1)
    Alpha(String),
    /// A numeric identifier (e.g. "1" in 1.0.0-alpha.1)
    Numeric(u64),
}

impl PrereleaseField {
    /// Numeric identifiers that do not fit in a `u64` are an overflow, not
    /// an alphanumeric field.
    fn from_identifier(s: &str) -> Result<Self> {
        if !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()) {
            return s
                .parse::<u64>()
                .map(PrereleaseField::Numeric)
                .map_err(|_| SemverError::VersionOverflow { field: "build" });
        }
        Ok(PrereleaseField::Alpha(s.to_string()))
    }

    /// Numeric value of the field, if it is a counter
    pub fn as_number(&self) -> Option<u64> {
        match self {
            PrereleaseField::Numeric(n) => Some(*n),
            PrereleaseField::Alpha(_) => None,
        }
    }
}

impl fmt::Display for PrereleaseField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrereleaseField::Alpha(s) => write!(f, "{}", s),
            PrereleaseField::Numeric(n) => write!(f, "{}", n),
        }
    }
}

/// Version bump type decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionBump {
    Major,
    Minor,
    Patch,
}

impl VersionBump {
    pub fn as_str(&self) -> &'static str {
        match self {
            VersionBump::Major => "major",
            VersionBump::Minor => "minor",
            VersionBump::Patch => "patch",
        }
    }
}

impl fmt::Display for VersionBump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Semantic version with prerelease fields and build metadata
///
/// Parsing is delegated to the `semver` crate; this type adds the mutation
/// operations the resolver needs (field increments, finalization and
/// prerelease replacement).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SemanticVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub pre: Vec<PrereleaseField>,
    pub build: Vec<String>,
}

impl SemanticVersion {
    /// Create a final version with no prerelease fields
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        SemanticVersion {
            major,
            minor,
            patch,
            pre: Vec::new(),
            build: Vec::new(),
        }
    }

    /// Parse a strict semantic version (no prefix, all three components)
    pub fn parse(version: &str) -> Result<Self> {
        Self::parse_strict(version, version)
    }

    /// Parse `version`, reporting failures against the original `tag`
    fn parse_strict(version: &str, tag: &str) -> Result<Self> {
        let parsed = semver::Version::parse(version).map_err(|e| SemverError::tag(tag, e))?;

        let pre = if parsed.pre.is_empty() {
            Vec::new()
        } else {
            parsed
                .pre
                .as_str()
                .split('.')
                .map(PrereleaseField::from_identifier)
                .collect::<Result<Vec<_>>>()?
        };

        let build = if parsed.build.is_empty() {
            Vec::new()
        } else {
            parsed.build.as_str().split('.').map(String::from).collect()
        };

        Ok(SemanticVersion {
            major: parsed.major,
            minor: parsed.minor,
            patch: parsed.patch,
            pre,
            build,
        })
    }

    /// Parse a tag leniently
    ///
    /// Strips the configured prefix (or, failing that, any leading non-digit
    /// characters), trims surrounding whitespace and leading zeros in the
    /// numeric components, and pads a missing minor or patch with `0`.
    /// `v1.2` parses as `1.2.0`, `release-01.2.3-alpha.1` as `1.2.3-alpha.1`.
    pub fn parse_tolerant(tag: &str, prefix: &str) -> Result<Self> {
        let trimmed = tag.trim();
        let stripped = trimmed
            .strip_prefix(prefix)
            .filter(|rest| rest.starts_with(|c: char| c.is_ascii_digit()))
            .unwrap_or_else(|| trimmed.trim_start_matches(|c: char| !c.is_ascii_digit()));

        let core_end = stripped
            .find(|c: char| c == '-' || c == '+')
            .unwrap_or(stripped.len());
        let (core, suffix) = stripped.split_at(core_end);

        let mut parts: Vec<&str> = core
            .split('.')
            .map(|part| {
                let without_zeros = part.trim_start_matches('0');
                if without_zeros.is_empty() && !part.is_empty() {
                    "0"
                } else {
                    without_zeros
                }
            })
            .collect();

        if parts.len() > 3 {
            return Err(SemverError::tag(
                tag,
                format!("expected at most 3 version components, found {}", parts.len()),
            ));
        }
        while parts.len() < 3 {
            parts.push("0");
        }

        let normalized = format!("{}{}", parts.join("."), suffix);
        Self::parse_strict(&normalized, tag)
    }

    /// Increment one version field, resetting the lower fields to zero
    ///
    /// Prerelease fields and build metadata are left untouched: the caller
    /// decides whether to replace them (build path) or strip them (finalize).
    pub fn increment(&mut self, bump: VersionBump) -> Result<()> {
        let overflow = || SemverError::VersionOverflow {
            field: bump.as_str(),
        };

        match bump {
            VersionBump::Major => {
                self.major = self.major.checked_add(1).ok_or_else(overflow)?;
                self.minor = 0;
                self.patch = 0;
            }
            VersionBump::Minor => {
                self.minor = self.minor.checked_add(1).ok_or_else(overflow)?;
                self.patch = 0;
            }
            VersionBump::Patch => {
                self.patch = self.patch.checked_add(1).ok_or_else(overflow)?;
            }
        }
        Ok(())
    }

    /// Strip prerelease fields and build metadata in place
    pub fn finalize(&mut self) {
        self.pre.clear();
        self.build.clear();
    }

    /// Finalized copy of this version
    pub fn finalized(&self) -> Self {
        SemanticVersion::new(self.major, self.minor, self.patch)
    }

    pub fn is_prerelease(&self) -> bool {
        !self.pre.is_empty()
    }

    /// Format with a tag prefix, e.g. `v1.2.3-alpha.1`
    pub fn to_tag(&self, prefix: &str) -> String {
        format!("{}{}", prefix, self)
    }
}

impl FromStr for SemanticVersion {
    type Err = SemverError;

    fn from_str(s: &str) -> Result<Self> {
        SemanticVersion::parse(s)
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;

        for (i, field) in self.pre.iter().enumerate() {
            let sep = if i == 0 { '-' } else { '.' };
            write!(f, "{}{}", sep, field)?;
        }

        if !self.build.is_empty() {
            write!(f, "+{}", self.build.join("."))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alpha(s: &str) -> PrereleaseField {
        PrereleaseField::Alpha(s.to_string())
    }

    #[test]
    fn test_version_parse() {
        let v = SemanticVersion::parse("1.2.3").unwrap();
        assert_eq!(v, SemanticVersion::new(1, 2, 3));
    }

    #[test]
    fn test_version_parse_prerelease_fields() {
        let v = SemanticVersion::parse("0.2.1-alpha.1").unwrap();
        assert_eq!(v.pre, vec![alpha("alpha"), PrereleaseField::Numeric(1)]);
        assert!(v.is_prerelease());
    }

    #[test]
    fn test_version_parse_build_metadata() {
        let v = SemanticVersion::parse("1.0.0+sha.5114f85").unwrap();
        assert_eq!(v.build, vec!["sha".to_string(), "5114f85".to_string()]);
        assert!(!v.is_prerelease());
    }

    #[test]
    fn test_version_parse_rejects_prefix() {
        assert!(SemanticVersion::parse("v1.2.3").is_err());
        assert!(SemanticVersion::parse("1.2").is_err());
    }

    #[test]
    fn test_parse_tolerant_with_prefix() {
        let v = SemanticVersion::parse_tolerant("v2.6.19-alpha.1", "v").unwrap();
        assert_eq!(v.to_string(), "2.6.19-alpha.1");
    }

    #[test]
    fn test_parse_tolerant_foreign_prefix() {
        let v = SemanticVersion::parse_tolerant("release-1.4.0", "v").unwrap();
        assert_eq!(v, SemanticVersion::new(1, 4, 0));
    }

    #[test]
    fn test_parse_tolerant_without_prefix() {
        let v = SemanticVersion::parse_tolerant("3.1.4", "v").unwrap();
        assert_eq!(v, SemanticVersion::new(3, 1, 4));
    }

    #[test]
    fn test_parse_tolerant_pads_and_trims() {
        assert_eq!(
            SemanticVersion::parse_tolerant(" v1.2 ", "v").unwrap(),
            SemanticVersion::new(1, 2, 0)
        );
        assert_eq!(
            SemanticVersion::parse_tolerant("v01.002.3", "v").unwrap(),
            SemanticVersion::new(1, 2, 3)
        );
    }

    #[test]
    fn test_parse_tolerant_invalid() {
        let err = SemanticVersion::parse_tolerant("latest", "v").unwrap_err();
        assert!(matches!(err, SemverError::MalformedTag { ref tag, .. } if tag == "latest"));
        assert!(SemanticVersion::parse_tolerant("v1.2.3.4", "v").is_err());
    }

    #[test]
    fn test_increment_major_resets_lower_fields() {
        let mut v = SemanticVersion::new(1, 2, 3);
        v.increment(VersionBump::Major).unwrap();
        assert_eq!(v, SemanticVersion::new(2, 0, 0));
    }

    #[test]
    fn test_increment_minor() {
        let mut v = SemanticVersion::new(1, 2, 3);
        v.increment(VersionBump::Minor).unwrap();
        assert_eq!(v, SemanticVersion::new(1, 3, 0));
    }

    #[test]
    fn test_increment_patch() {
        let mut v = SemanticVersion::new(1, 2, 3);
        v.increment(VersionBump::Patch).unwrap();
        assert_eq!(v, SemanticVersion::new(1, 2, 4));
    }

    #[test]
    fn test_increment_keeps_prerelease() {
        let mut v = SemanticVersion::parse("2.6.19-alpha.1").unwrap();
        v.increment(VersionBump::Major).unwrap();
        assert_eq!(v.to_string(), "3.0.0-alpha.1");
    }

    #[test]
    fn test_increment_overflow() {
        let mut v = SemanticVersion::new(1, u64::MAX, 0);
        let err = v.increment(VersionBump::Minor).unwrap_err();
        assert!(matches!(err, SemverError::VersionOverflow { field: "minor" }));
        // unchanged on failure
        assert_eq!(v.minor, u64::MAX);
    }

    #[test]
    fn test_finalize() {
        let mut v = SemanticVersion::parse("1.2.3-alpha.4+build.7").unwrap();
        v.finalize();
        assert_eq!(v, SemanticVersion::new(1, 2, 3));
    }

    #[test]
    fn test_finalize_is_idempotent() {
        let mut v = SemanticVersion::new(1, 2, 3);
        v.finalize();
        assert_eq!(v, SemanticVersion::new(1, 2, 3));
        assert_eq!(v.finalized(), v);
    }

    #[test]
    fn test_tag_formatting_reparses() {
        for input in ["0.0.0", "1.0.0-alpha.1", "4.3.0-rc.12", "2.0.0-pre.3+ci.9"] {
            let v = SemanticVersion::parse(input).unwrap();
            let tag = v.to_tag("ver");
            assert_eq!(tag, format!("ver{}", input));
            assert_eq!(SemanticVersion::parse_tolerant(&tag, "ver").unwrap(), v);
        }
    }

    #[test]
    fn test_default_is_zero() {
        assert_eq!(SemanticVersion::default().to_string(), "0.0.0");
    }

    #[test]
    fn test_parse_oversized_counter_overflows() {
        let err = SemanticVersion::parse("1.0.0-alpha.18446744073709551616").unwrap_err();
        assert!(matches!(err, SemverError::VersionOverflow { field: "build" }));

        let err = SemanticVersion::parse_tolerant("v1.0.0-alpha.18446744073709551616", "v")
            .unwrap_err();
        assert!(matches!(err, SemverError::VersionOverflow { field: "build" }));

        let v = SemanticVersion::parse("1.0.0-alpha.18446744073709551615").unwrap();
        assert_eq!(v.pre[1], PrereleaseField::Numeric(u64::MAX));
    }

    #[test]
    fn test_field_as_number() {
        assert_eq!(PrereleaseField::Numeric(7).as_number(), Some(7));
        assert_eq!(alpha("rc").as_number(), None);
    }
}
