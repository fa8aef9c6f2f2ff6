//! Command line surface
//!
//! Argument parsing lives here; [orchestration] runs the workflow the
//! arguments describe.

pub mod orchestration;

pub use orchestration::run_generate_workflow;

use crate::params::{parse_bool, ParamsInput};
use std::path::PathBuf;

#[derive(clap::Parser, Debug, Clone, Default)]
#[command(
    name = "merge-semver",
    version,
    about = "Compute the next semantic version tag for a merge from branch naming conventions"
)]
pub struct GenerateArgs {
    #[arg(short = 'C', long, help = "Repository directory [default: .]")]
    pub repo_dir: Option<PathBuf>,

    #[arg(long, help = "Merge commit to classify [default: GITHUB_SHA or HEAD]")]
    pub commit: Option<String>,

    #[arg(long, help = "Bump override: auto, major, minor or patch")]
    pub bump: Option<String>,

    #[arg(long, help = "Version to start from instead of the latest tag")]
    pub base_version: Option<String>,

    #[arg(long, help = "Tag prefix [default: v]")]
    pub prefix: Option<String>,

    #[arg(long, help = "Prerelease identifier [default: pre]")]
    pub prerelease_id: Option<String>,

    #[arg(long, help = "Mainline branch that versioning merges target [default: main]")]
    pub branch_name: Option<String>,

    #[arg(
        long,
        num_args = 0..=1,
        default_missing_value = "true",
        value_parser = parse_flag_value,
        help = "Emit prerelease builds instead of final versions (--force-prerelease=false to disable)"
    )]
    pub force_prerelease: Option<bool>,

    #[arg(long, help = "Enable debug logging")]
    pub debug: bool,

    #[arg(short, long, help = "Custom configuration file path")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Print the result as JSON")]
    pub json: bool,
}

impl GenerateArgs {
    /// Command line layer of the parameter stack
    ///
    /// Flags only count when set, so an absent flag falls through to the
    /// environment and the config file.
    pub fn into_input(self) -> ParamsInput {
        ParamsInput {
            commit_sha: self.commit,
            repo_dir: self.repo_dir,
            bump: self.bump,
            base_version: self.base_version,
            prefix: self.prefix,
            prerelease_id: self.prerelease_id,
            force_prerelease: self.force_prerelease,
            branch_name: self.branch_name,
            debug: self.debug.then_some(true),
        }
    }
}

fn parse_flag_value(value: &str) -> Result<bool, String> {
    parse_bool(value).ok_or_else(|| format!("invalid boolean value: {}", value))
}
