//! Branch classification
//!
//! Maps a merge (source branch into destination branch) to the bump strategy
//! the resolver should apply.

use crate::domain::version::VersionBump;
use crate::error::{Result, SemverError};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Requested bump mode: `auto` derives it from the branch name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BumpMode {
    #[default]
    Auto,
    Major,
    Minor,
    Patch,
}

impl BumpMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            BumpMode::Auto => "auto",
            BumpMode::Major => "major",
            BumpMode::Minor => "minor",
            BumpMode::Patch => "patch",
        }
    }
}

impl FromStr for BumpMode {
    type Err = SemverError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "auto" => Ok(BumpMode::Auto),
            "major" => Ok(BumpMode::Major),
            "minor" => Ok(BumpMode::Minor),
            "patch" => Ok(BumpMode::Patch),
            other => Err(SemverError::parameter(format!(
                "invalid bump value: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for BumpMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the resolver should derive the next tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BumpStrategy {
    /// Explicit override: bump the field, add no build fields
    Explicit(VersionBump),
    /// Cut a prerelease build, bumping the given field first
    Build(Option<VersionBump>),
    /// Docs/misc merge: a build with no field bump, reconciled against the
    /// ancestor tag before anything is minted
    Maintenance,
}

impl BumpStrategy {
    /// Strategy name as reported in logs (`build`, `major`, ...)
    pub fn method(&self) -> &'static str {
        match self {
            BumpStrategy::Explicit(bump) => bump.as_str(),
            BumpStrategy::Build(_) | BumpStrategy::Maintenance => "build",
        }
    }

    /// Field to increment before anything else, if any
    pub fn magnitude(&self) -> Option<VersionBump> {
        match self {
            BumpStrategy::Explicit(bump) => Some(*bump),
            BumpStrategy::Build(bump) => *bump,
            BumpStrategy::Maintenance => None,
        }
    }
}

/// Branch naming conventions recognised on merges into the mainline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchKind {
    Bugfix,
    Feature,
    Major,
    Docs,
    Misc,
}

impl BranchKind {
    fn strategy(self) -> BumpStrategy {
        match self {
            BranchKind::Bugfix => BumpStrategy::Build(Some(VersionBump::Patch)),
            BranchKind::Feature => BumpStrategy::Build(Some(VersionBump::Minor)),
            BranchKind::Major => BumpStrategy::Build(Some(VersionBump::Major)),
            BranchKind::Docs | BranchKind::Misc => BumpStrategy::Maintenance,
        }
    }
}

struct BranchRule {
    kind: BranchKind,
    pattern: Regex,
}

/// Ordered rule table; the first match wins.
fn branch_rules() -> &'static [BranchRule] {
    static RULES: OnceLock<Vec<BranchRule>> = OnceLock::new();

    RULES.get_or_init(|| {
        [
            (BranchKind::Bugfix, "bugfix"),
            (BranchKind::Feature, "feature"),
            (BranchKind::Major, "major"),
            (BranchKind::Docs, "docs?"),
            (BranchKind::Misc, "misc"),
        ]
        .into_iter()
        .map(|(kind, prefix)| BranchRule {
            kind,
            // optional "<label>:" left in front by merge tooling, e.g. "owner:feature/x"
            pattern: Regex::new(&format!(r"(?i)^(.+:)?({}/.+)", prefix))
                .expect("branch rule patterns are valid"),
        })
        .collect()
    })
}

/// Naming convention of a source branch, if it follows one
pub fn branch_kind(source_branch: &str) -> Option<BranchKind> {
    branch_rules()
        .iter()
        .find(|rule| rule.pattern.is_match(source_branch))
        .map(|rule| rule.kind)
}

/// Determine the bump strategy for a merge
///
/// An explicit bump always wins. Otherwise the source branch naming convention
/// decides, but only for merges into the mainline branch.
pub fn classify(
    bump: BumpMode,
    source_branch: &str,
    dest_branch: &str,
    mainline_branch: &str,
) -> Result<BumpStrategy> {
    let explicit = match bump {
        BumpMode::Auto => None,
        BumpMode::Major => Some(VersionBump::Major),
        BumpMode::Minor => Some(VersionBump::Minor),
        BumpMode::Patch => Some(VersionBump::Patch),
    };
    if let Some(bump) = explicit {
        return Ok(BumpStrategy::Explicit(bump));
    }

    if dest_branch == mainline_branch {
        if let Some(kind) = branch_kind(source_branch) {
            return Ok(kind.strategy());
        }
    }

    Err(SemverError::UnrecognizedBumpStrategy {
        source_branch: source_branch.to_string(),
        dest_branch: dest_branch.to_string(),
    })
}

/// Extract the merged branch name from a merge commit message
///
/// Understands the GitHub, git/GitLab and Bitbucket default merge messages.
/// For GitHub the leading `owner/` segment is dropped.
pub fn parse_merge_source(message: &str) -> Option<String> {
    static PATTERNS: OnceLock<[Regex; 3]> = OnceLock::new();

    let [github, git, bitbucket] = PATTERNS.get_or_init(|| {
        [
            Regex::new(r"^Merge pull request #\d+ from (\S+)").expect("valid github pattern"),
            Regex::new(r"^Merge (?:remote-tracking )?branch '([^']+)'").expect("valid git pattern"),
            Regex::new(r"^Merged in (\S+)").expect("valid bitbucket pattern"),
        ]
    });

    let first_line = message.lines().next().unwrap_or("").trim();

    if let Some(caps) = github.captures(first_line) {
        let head = &caps[1];
        return Some(match head.split_once('/') {
            Some((_owner, branch)) if !branch.is_empty() => branch.to_string(),
            _ => head.to_string(),
        });
    }

    if let Some(caps) = git.captures(first_line) {
        let branch = &caps[1];
        return Some(branch.strip_prefix("origin/").unwrap_or(branch).to_string());
    }

    bitbucket
        .captures(first_line)
        .map(|caps| caps[1].to_string())
}
