use crate::domain::branch::parse_merge_source;
use crate::domain::TagPattern;
use crate::error::{Result, SemverError};
use git2::{BranchType, DescribeFormatOptions, DescribeOptions, Oid, Repository as Git2Repo, Sort};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// [Repository](super::Repository) backed by libgit2
///
/// The repository is discovered from `path` on every call, so `is_repo` and
/// `make_safe` work before the repository could be opened.
pub struct Git2Repository {
    path: PathBuf,
}

impl Git2Repository {
    /// Create a repository handle rooted at (or below) `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Git2Repository {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> Result<Git2Repo> {
        Ok(Git2Repo::discover(&self.path)?)
    }

    /// `git describe --tags --abbrev=0`
    fn describe_head(&self) -> Result<String> {
        let repo = self.open()?;

        let mut options = DescribeOptions::new();
        options.describe_tags();
        let describe = repo.describe(&options)?;

        let mut format = DescribeFormatOptions::new();
        format.abbreviated_size(0);
        Ok(describe.format(Some(&format))?)
    }

    /// Nearest tag reachable from `branch` that `pattern` selects
    ///
    /// Commits are visited in topological then commit-time order from the
    /// branch tip and the first tagged one wins. This is the nearest tag by
    /// walk order, which can differ from the fewest-commits choice of
    /// `git describe --match` when several tagged merge parents exist.
    fn find_ancestor_tag(&self, pattern: &TagPattern, branch: &str) -> Result<Option<String>> {
        let repo = self.open()?;
        let tip = repo.revparse_single(branch)?.peel_to_commit()?.id();

        let mut tagged: HashMap<Oid, Vec<String>> = HashMap::new();
        let names = repo.tag_names(None)?;
        for name in names.iter().flatten() {
            if !pattern.matches(name) {
                continue;
            }

            let target = match repo
                .revparse_single(&format!("refs/tags/{}", name))
                .and_then(|object| object.peel_to_commit())
            {
                Ok(commit) => commit.id(),
                Err(e) => {
                    debug!(tag = name, error = %e, "skipping tag that does not point at a commit");
                    continue;
                }
            };
            tagged.entry(target).or_default().push(name.to_string());
        }

        if tagged.is_empty() {
            return Ok(None);
        }

        let mut walk = repo.revwalk()?;
        walk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        walk.push(tip)?;

        for oid in walk {
            if let Some(names) = tagged.get_mut(&oid?) {
                names.sort_by(|a, b| compare_tags(a, b));
                return Ok(names.pop());
            }
        }

        Ok(None)
    }
}

impl super::Repository for Git2Repository {
    fn is_repo(&self) -> bool {
        Git2Repo::discover(&self.path)
            .map(|repo| !repo.is_bare())
            .unwrap_or(false)
    }

    fn make_safe(&self) -> Result<()> {
        let safety = |e: &dyn std::fmt::Display| SemverError::RepositorySafety(e.to_string());

        // a missing directory is reported by is_repo, not here
        let dir = std::fs::canonicalize(&self.path).unwrap_or_else(|e| {
            debug!(path = %self.path.display(), error = %e, "cannot canonicalize repository path");
            self.path.clone()
        });
        let dir = dir.to_string_lossy().into_owned();

        let global = git2::Config::find_global()
            .ok()
            .or_else(|| dirs::home_dir().map(|home| home.join(".gitconfig")))
            .ok_or_else(|| safety(&"cannot locate the global git config"))?;

        let mut config = git2::Config::open(&global).map_err(|e| safety(&e))?;

        // replacing an identical entry keeps the list free of duplicates
        config
            .set_multivar("safe.directory", &format!("^{}$", posix_escape(&dir)), &dir)
            .map_err(|e| safety(&e))?;

        debug!(directory = %dir, config = %global.display(), "registered safe.directory");
        Ok(())
    }

    fn current_branch(&self) -> Result<String> {
        let repo = self.open()?;
        let head = repo
            .head()
            .map_err(|e| SemverError::branch(format!("cannot read HEAD: {}", e)))?;

        if !head.is_branch() {
            return Err(SemverError::branch("HEAD is detached"));
        }

        head.shorthand()
            .map(String::from)
            .ok_or_else(|| SemverError::branch("current branch name is not valid UTF-8"))
    }

    fn source_branch(&self, commit: &str) -> Result<String> {
        let repo = self.open()?;
        let commit = repo
            .revparse_single(commit)
            .and_then(|object| object.peel_to_commit())
            .map_err(|e| SemverError::branch(format!("cannot find commit {}: {}", commit, e)))?;

        if let Some(branch) = parse_merge_source(commit.message().unwrap_or_default()) {
            debug!(commit = %commit.id(), branch = %branch, "source branch from merge message");
            return Ok(branch);
        }

        if commit.parent_count() > 1 {
            let merged = commit.parent_id(1)?;

            for entry in repo.branches(None)? {
                let (branch, branch_type) = entry?;
                if branch.get().target() != Some(merged) {
                    continue;
                }

                if let Some(name) = branch.name()? {
                    let name = match branch_type {
                        BranchType::Remote => name.split_once('/').map_or(name, |(_, rest)| rest),
                        BranchType::Local => name,
                    };
                    debug!(commit = %commit.id(), branch = name, "source branch from merged parent");
                    return Ok(name.to_string());
                }
            }
        }

        Err(SemverError::branch(format!(
            "cannot determine the branch merged by commit {}",
            commit.id()
        )))
    }

    fn latest_tag(&self) -> Option<String> {
        match self.describe_head() {
            Ok(tag) => Some(tag),
            Err(e) => {
                debug!(error = %e, "no tag reachable from HEAD");
                None
            }
        }
    }

    fn ancestor_tag(&self, pattern: &TagPattern, branch: &str) -> Option<String> {
        match self.find_ancestor_tag(pattern, branch) {
            Ok(tag) => tag,
            Err(e) => {
                debug!(%pattern, branch, error = %e, "ancestor tag lookup failed");
                None
            }
        }
    }
}

/// Order tags on the same commit by version, falling back to name order.
fn compare_tags(a: &str, b: &str) -> Ordering {
    let version = |tag: &str| {
        semver::Version::parse(tag.trim_start_matches(|c: char| !c.is_ascii_digit())).ok()
    };

    match (version(a), version(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        _ => a.cmp(b),
    }
}

fn posix_escape(literal: &str) -> String {
    let mut escaped = String::with_capacity(literal.len());
    for c in literal.chars() {
        if ".[]()*+?{}|^$\\".contains(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
