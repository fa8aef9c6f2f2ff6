use crate::domain::TagPattern;
use crate::error::{Result, SemverError};
use crate::git::Repository;
use std::collections::HashMap;
use std::sync::Mutex;

/// Ancestor lookup recorded by [MockRepository]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AncestorQuery {
    pub pattern: TagPattern,
    pub branch: String,
}

/// Mock repository for testing without actual git operations
pub struct MockRepository {
    is_repo: bool,
    safe_error: Option<String>,
    current_branch: Option<String>,
    source_branches: HashMap<String, String>,
    latest_tag: Option<String>,
    ancestor_tags: HashMap<String, String>,
    default_ancestor: Option<String>,
    queries: Mutex<Vec<AncestorQuery>>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            is_repo: true,
            safe_error: None,
            current_branch: None,
            source_branches: HashMap::new(),
            latest_tag: None,
            ancestor_tags: HashMap::new(),
            default_ancestor: None,
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Report the path as not being a repository
    pub fn set_not_repo(&mut self) {
        self.is_repo = false;
    }

    /// Make `make_safe` fail with the given message
    pub fn fail_make_safe(&mut self, msg: impl Into<String>) {
        self.safe_error = Some(msg.into());
    }

    /// Set the checked-out branch
    pub fn set_current_branch(&mut self, branch: impl Into<String>) {
        self.current_branch = Some(branch.into());
    }

    /// Record the branch a commit was merged from
    pub fn add_source_branch(&mut self, commit: impl Into<String>, branch: impl Into<String>) {
        self.source_branches.insert(commit.into(), branch.into());
    }

    /// Set the tag nearest to HEAD
    pub fn set_latest_tag(&mut self, tag: impl Into<String>) {
        self.latest_tag = Some(tag.into());
    }

    /// Answer every ancestor lookup with `tag`
    pub fn set_ancestor_tag(&mut self, tag: impl Into<String>) {
        self.default_ancestor = Some(tag.into());
    }

    /// Answer ancestor lookups whose include glob equals `include` with `tag`
    pub fn add_ancestor_tag(&mut self, include: impl Into<String>, tag: impl Into<String>) {
        self.ancestor_tags.insert(include.into(), tag.into());
    }

    /// Ancestor lookups made so far, oldest first
    pub fn ancestor_queries(&self) -> Vec<AncestorQuery> {
        self.queries
            .lock()
            .map(|queries| queries.clone())
            .unwrap_or_default()
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn is_repo(&self) -> bool {
        self.is_repo
    }

    fn make_safe(&self) -> Result<()> {
        match &self.safe_error {
            Some(msg) => Err(SemverError::RepositorySafety(msg.clone())),
            None => Ok(()),
        }
    }

    fn current_branch(&self) -> Result<String> {
        self.current_branch
            .clone()
            .ok_or_else(|| SemverError::branch("HEAD is detached"))
    }

    fn source_branch(&self, commit: &str) -> Result<String> {
        self.source_branches.get(commit).cloned().ok_or_else(|| {
            SemverError::branch(format!(
                "cannot determine the branch merged by commit {}",
                commit
            ))
        })
    }

    fn latest_tag(&self) -> Option<String> {
        self.latest_tag.clone()
    }

    fn ancestor_tag(&self, pattern: &TagPattern, branch: &str) -> Option<String> {
        if let Ok(mut queries) = self.queries.lock() {
            queries.push(AncestorQuery {
                pattern: pattern.clone(),
                branch: branch.to_string(),
            });
        }

        self.ancestor_tags
            .get(&pattern.include)
            .or(self.default_ancestor.as_ref())
            .cloned()
    }
}
