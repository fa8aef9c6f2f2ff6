//! Main workflow orchestration logic
//!
//! Ties the repository facts, the branch classifier and the tag resolver
//! together. Kept free of argument parsing and output so the workflow can be
//! driven from tests with a [MockRepository](crate::git::MockRepository).

use crate::domain::classify;
use crate::error::{Result, SemverError};
use crate::git::Repository;
use crate::params::Params;
use crate::resolver::{TagResolver, TagResult};
use tracing::{debug, info};

/// Compute the tag for the merge described by `params`
///
/// 1. Mark the repository safe and check it is one
/// 2. Resolve the destination (checked-out) and source (merged) branches
/// 3. Classify the merge into a bump strategy
/// 4. Resolve the next tag against the repository's tags
///
/// Every failure is terminal; nothing is retried.
pub fn run_generate_workflow<R>(params: &Params, repo: &R) -> Result<TagResult>
where
    R: Repository + ?Sized,
{
    repo.make_safe()?;

    if !repo.is_repo() {
        return Err(SemverError::NotARepository);
    }

    let dest = repo.current_branch()?;
    debug!(dest_branch = %dest, "resolved destination branch");

    let source = repo.source_branch(params.revision())?;
    debug!(source_branch = %source, "resolved source branch");

    let strategy = classify(params.bump, &source, &dest, &params.branch_name)?;
    debug!(
        method = strategy.method(),
        version = strategy.magnitude().map(|bump| bump.as_str()).unwrap_or(""),
        "bump strategy"
    );

    let result = TagResolver::new(params, repo).resolve(strategy, &dest)?;

    if result.is_release() {
        info!(tag = %result.semver_tag, prerelease = result.is_prerelease, "computed tag");
    } else {
        info!("merge does not produce a release");
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::MockRepository;

    fn repo(source: &str) -> MockRepository {
        let mut repo = MockRepository::new();
        repo.set_current_branch("main");
        repo.add_source_branch("HEAD", source);
        repo
    }

    #[test]
    fn test_uses_head_without_commit() {
        let params = Params {
            force_prerelease: true,
            ..Params::default()
        };
        let result = run_generate_workflow(&params, &repo("feature/login")).unwrap();
        assert_eq!(result.semver_tag, "v0.1.0-pre.1");
    }

    #[test]
    fn test_detached_head_is_branch_failure() {
        let mut repo = MockRepository::new();
        repo.add_source_branch("HEAD", "feature/login");

        let err = run_generate_workflow(&Params::default(), &repo).unwrap_err();
        assert!(matches!(err, SemverError::BranchResolution(_)));
    }

    #[test]
    fn test_unknown_commit_is_branch_failure() {
        let params = Params {
            commit_sha: Some("abcdef1".into()),
            ..Params::default()
        };

        let err = run_generate_workflow(&params, &repo("feature/login")).unwrap_err();
        assert!(matches!(err, SemverError::BranchResolution(_)));
    }

    #[test]
    fn test_merge_into_other_branch_is_unrecognized() {
        let mut repo = repo("feature/login");
        repo.set_current_branch("develop");

        let err = run_generate_workflow(&Params::default(), &repo).unwrap_err();
        assert!(matches!(err, SemverError::UnrecognizedBumpStrategy { .. }));
    }
}
