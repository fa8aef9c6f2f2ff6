//! Parameter loading
//!
//! Inputs are layered: command line, then GitHub Actions style environment
//! (`INPUT_*`, `GITHUB_SHA`), then the configuration file, then defaults.
//! Validation happens once, when the layers are folded into [Params].

use crate::config::Config;
use crate::domain::{BumpMode, PrereleaseId, SemanticVersion};
use crate::error::{Result, SemverError};
use regex::Regex;
use std::fmt;
use std::path::PathBuf;
use std::sync::OnceLock;

pub const DEFAULT_PREFIX: &str = "v";
pub const DEFAULT_BRANCH_NAME: &str = "main";

/// One layer of raw, unvalidated inputs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamsInput {
    pub commit_sha: Option<String>,
    pub repo_dir: Option<PathBuf>,
    pub bump: Option<String>,
    pub base_version: Option<String>,
    pub prefix: Option<String>,
    pub prerelease_id: Option<String>,
    pub force_prerelease: Option<bool>,
    pub branch_name: Option<String>,
    pub debug: Option<bool>,
}

impl ParamsInput {
    /// Read inputs from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read inputs through `lookup`; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());
        let get_bool = |key: &str| -> Result<Option<bool>> {
            get(key)
                .map(|value| {
                    parse_bool(&value).ok_or_else(|| {
                        SemverError::parameter(format!("invalid {} argument: {}", key, value))
                    })
                })
                .transpose()
        };

        Ok(ParamsInput {
            commit_sha: get("GITHUB_SHA"),
            repo_dir: get("INPUT_REPO_DIR").map(PathBuf::from),
            bump: get("INPUT_BUMP"),
            base_version: get("INPUT_BASE_VERSION"),
            prefix: get("INPUT_PREFIX"),
            prerelease_id: get("INPUT_PRERELEASE_ID"),
            force_prerelease: get_bool("INPUT_FORCE_PRERELEASE")?,
            branch_name: get("INPUT_BRANCH_NAME"),
            debug: get_bool("INPUT_DEBUG")?,
        })
    }

    /// Fill every unset field from `fallback`
    pub fn or(self, fallback: ParamsInput) -> Self {
        ParamsInput {
            commit_sha: self.commit_sha.or(fallback.commit_sha),
            repo_dir: self.repo_dir.or(fallback.repo_dir),
            bump: self.bump.or(fallback.bump),
            base_version: self.base_version.or(fallback.base_version),
            prefix: self.prefix.or(fallback.prefix),
            prerelease_id: self.prerelease_id.or(fallback.prerelease_id),
            force_prerelease: self.force_prerelease.or(fallback.force_prerelease),
            branch_name: self.branch_name.or(fallback.branch_name),
            debug: self.debug.or(fallback.debug),
        }
    }
}

impl From<Config> for ParamsInput {
    fn from(config: Config) -> Self {
        ParamsInput {
            bump: config.bump,
            base_version: config.base_version,
            prefix: config.prefix,
            prerelease_id: config.prerelease_id,
            force_prerelease: config.force_prerelease,
            branch_name: config.branch_name,
            ..ParamsInput::default()
        }
    }
}

/// Validated parameters for one tag computation
#[derive(Debug, Clone, PartialEq)]
pub struct Params {
    /// Commit whose merge is being tagged; `None` means HEAD
    pub commit_sha: Option<String>,
    pub repo_dir: PathBuf,
    pub bump: BumpMode,
    /// Starting version used instead of the latest tag
    pub base_version: Option<SemanticVersion>,
    pub prefix: String,
    pub prerelease_id: PrereleaseId,
    pub force_prerelease: bool,
    /// Mainline branch; only merges into it are classified by branch name
    pub branch_name: String,
    pub debug: bool,
}

impl Default for Params {
    fn default() -> Self {
        Params {
            commit_sha: None,
            repo_dir: PathBuf::from("."),
            bump: BumpMode::Auto,
            base_version: None,
            prefix: DEFAULT_PREFIX.to_string(),
            prerelease_id: PrereleaseId::default(),
            force_prerelease: false,
            branch_name: DEFAULT_BRANCH_NAME.to_string(),
            debug: false,
        }
    }
}

impl Params {
    /// Layer command line inputs over the environment and the config file
    pub fn load(cli: ParamsInput, config: Config) -> Result<Self> {
        let input = cli.or(ParamsInput::from_env()?).or(config.into());
        Self::from_input(input)
    }

    /// Validate one folded input layer and apply defaults
    pub fn from_input(input: ParamsInput) -> Result<Self> {
        let defaults = Params::default();

        let commit_sha = match input.commit_sha {
            Some(sha) if !commit_sha_regex().is_match(&sha) => {
                return Err(SemverError::parameter(format!(
                    "invalid commit-sha format: {}",
                    sha
                )));
            }
            other => other,
        };

        let bump = match input.bump {
            Some(bump) => bump.parse()?,
            None => defaults.bump,
        };

        let prefix = input.prefix.unwrap_or(defaults.prefix);

        let base_version = input
            .base_version
            .map(|raw| {
                let stripped = raw.strip_prefix(prefix.as_str()).unwrap_or(&raw);
                SemanticVersion::parse(stripped).map_err(|_| {
                    SemverError::parameter(format!("invalid base_version format: {}", stripped))
                })
            })
            .transpose()?;

        let prerelease_id = match input.prerelease_id {
            Some(id) => id.parse()?,
            None => defaults.prerelease_id,
        };

        Ok(Params {
            commit_sha,
            repo_dir: input.repo_dir.unwrap_or(defaults.repo_dir),
            bump,
            base_version,
            prefix,
            prerelease_id,
            force_prerelease: input.force_prerelease.unwrap_or(defaults.force_prerelease),
            branch_name: input.branch_name.unwrap_or(defaults.branch_name),
            debug: input.debug.unwrap_or(defaults.debug),
        })
    }

    /// Revision handed to the repository when looking up the source branch
    pub fn revision(&self) -> &str {
        self.commit_sha.as_deref().unwrap_or("HEAD")
    }
}

impl fmt::Display for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let base_version = self
            .base_version
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();

        write!(
            f,
            "commit sha: {:?}, bump: {:?}, base version: {:?}, prefix: {:?}, \
             prerelease id: {:?}, force prerelease: {}, branch name: {:?}, \
             repo dir: {:?}, debug: {}",
            self.revision(),
            self.bump.as_str(),
            base_version,
            self.prefix,
            self.prerelease_id.as_str(),
            self.force_prerelease,
            self.branch_name,
            self.repo_dir.display().to_string(),
            self.debug,
        )
    }
}

fn commit_sha_regex() -> &'static Regex {
    static COMMIT_SHA: OnceLock<Regex> = OnceLock::new();
    COMMIT_SHA.get_or_init(|| Regex::new(r"^[0-9a-f]{5,40}$").expect("valid commit sha pattern"))
}

/// Boolean spellings accepted for flag inputs
pub fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}
