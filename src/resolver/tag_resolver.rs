use crate::domain::prerelease::cut_build;
use crate::domain::{BumpStrategy, SemanticVersion};
use crate::error::Result;
use crate::git::Repository;
use crate::params::Params;
use crate::resolver::{AncestorReconciler, TagResult};
use tracing::debug;

/// Parse the latest reachable tag into the version resolution starts from
///
/// A repository without tags starts at `0.0.0`.
pub fn starting_version(latest_tag: Option<&str>, prefix: &str) -> Result<SemanticVersion> {
    match latest_tag.map(str::trim).filter(|tag| !tag.is_empty()) {
        Some(tag) => SemanticVersion::parse_tolerant(tag, prefix),
        None => Ok(SemanticVersion::default()),
    }
}

/// Computes the next tag for a classified merge
pub struct TagResolver<'a, R: Repository + ?Sized> {
    params: &'a Params,
    repo: &'a R,
}

impl<'a, R: Repository + ?Sized> TagResolver<'a, R> {
    pub fn new(params: &'a Params, repo: &'a R) -> Self {
        TagResolver { params, repo }
    }

    /// Resolve the tag for a merge into `dest_branch`
    ///
    /// `previous_tag` always reflects the latest tag in the repository, even
    /// when a base version overrides the starting value.
    pub fn resolve(&self, strategy: BumpStrategy, dest_branch: &str) -> Result<TagResult> {
        let prefix = &self.params.prefix;

        let latest_tag = self.repo.latest_tag();
        let latest = starting_version(latest_tag.as_deref(), prefix)?;
        let previous_tag = latest.to_tag(prefix);
        debug!(latest = ?latest_tag, previous_tag = %previous_tag, "starting from latest tag");

        let mut version = match &self.params.base_version {
            Some(base) => {
                debug!(base_version = %base, "base version overrides latest tag");
                base.clone()
            }
            None => latest,
        };

        if let Some(bump) = strategy.magnitude() {
            debug!(field = %bump, "incrementing version");
            version.increment(bump)?;
        }

        let mut is_prerelease = match strategy {
            BumpStrategy::Maintenance => {
                return AncestorReconciler::new(self.params, self.repo).reconcile_maintenance(
                    version,
                    previous_tag,
                    dest_branch,
                );
            }
            BumpStrategy::Build(bump) => {
                let build = cut_build(&mut version, &self.params.prerelease_id, bump.is_some())?;
                debug!(build, "cut prerelease build");
                true
            }
            // an explicit bump on a prerelease base keeps its prerelease fields
            BumpStrategy::Explicit(_) => version.is_prerelease(),
        };

        if !self.params.force_prerelease {
            version.finalize();
            is_prerelease = false;
        }

        let ancestor_tag = AncestorReconciler::new(self.params, self.repo)
            .ancestor_tag(is_prerelease, dest_branch)
            .unwrap_or_default();

        Ok(TagResult {
            previous_tag,
            ancestor_tag,
            semver_tag: version.to_tag(prefix),
            is_prerelease,
        })
    }
}
