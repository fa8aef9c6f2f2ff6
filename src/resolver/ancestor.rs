use crate::domain::prerelease::cut_build;
use crate::domain::{SemanticVersion, TagPattern};
use crate::error::Result;
use crate::git::Repository;
use crate::params::Params;
use crate::resolver::TagResult;
use tracing::{debug, info};

/// Resolves which tag range a release descends from
pub struct AncestorReconciler<'a, R: Repository + ?Sized> {
    params: &'a Params,
    repo: &'a R,
}

impl<'a, R: Repository + ?Sized> AncestorReconciler<'a, R> {
    pub fn new(params: &'a Params, repo: &'a R) -> Self {
        AncestorReconciler { params, repo }
    }

    /// Pattern selecting the tags a release of this kind descends from
    ///
    /// Prereleases search their own line; final releases search final tags
    /// and keep the prerelease line out.
    pub fn pattern(&self, is_prerelease: bool) -> TagPattern {
        let prefix = &self.params.prefix;
        let id = self.params.prerelease_id.as_str();

        if is_prerelease {
            TagPattern::prerelease(prefix, id)
        } else {
            TagPattern::release(prefix, id)
        }
    }

    /// Most recent matching tag reachable from `dest_branch`
    pub fn ancestor_tag(&self, is_prerelease: bool, dest_branch: &str) -> Option<String> {
        let pattern = self.pattern(is_prerelease);
        let tag = self
            .repo
            .ancestor_tag(&pattern, dest_branch)
            .filter(|tag| !tag.is_empty());

        debug!(%pattern, branch = dest_branch, ancestor = ?tag, "ancestor tag lookup");
        tag
    }

    /// Resolve a docs/misc merge
    ///
    /// `version` is the starting value; no field bump applies. If the next
    /// build would finalize to the same version as the newest prerelease-line
    /// tag on the destination branch, that tag is reused as-is. Otherwise a
    /// new build is cut when prereleases are forced, and nothing is released
    /// when they are not.
    pub fn reconcile_maintenance(
        &self,
        mut version: SemanticVersion,
        previous_tag: String,
        dest_branch: &str,
    ) -> Result<TagResult> {
        let prefix = &self.params.prefix;
        cut_build(&mut version, &self.params.prerelease_id, false)?;

        let ancestor_tag = self.ancestor_tag(true, dest_branch);

        if let Some(tag) = &ancestor_tag {
            let ancestor = SemanticVersion::parse_tolerant(tag, prefix)?;

            if ancestor.finalized() == version.finalized() {
                info!(ancestor = %tag, "version line already tagged, reusing ancestor tag");
                return Ok(TagResult {
                    previous_tag,
                    ancestor_tag: tag.clone(),
                    semver_tag: tag.clone(),
                    is_prerelease: ancestor.is_prerelease(),
                });
            }

            debug!(
                ancestor = %ancestor,
                candidate = %version,
                "ancestor belongs to a different version line"
            );
        }

        if !self.params.force_prerelease {
            info!("maintenance merge without forced prerelease, nothing to release");
            return Ok(TagResult::default());
        }

        Ok(TagResult {
            previous_tag,
            ancestor_tag: ancestor_tag.unwrap_or_default(),
            semver_tag: version.to_tag(prefix),
            is_prerelease: true,
        })
    }
}
