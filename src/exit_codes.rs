//! Exit codes for the CLI

use merge_semver::SemverError;

/// Success
pub const SUCCESS: i32 = 0;

/// General error
pub const ERROR: i32 = 1;

/// Parameter or configuration error
pub const CONFIG_ERROR: i32 = 2;

/// Repository or git error
pub const GIT_ERROR: i32 = 3;

/// Version or tag error
pub const VERSION_ERROR: i32 = 4;

/// Exit code for a failed run
///
/// Errors that did not originate in the library map to [ERROR].
pub fn for_error(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<SemverError>() {
        Some(err) if err.is_input_error() => CONFIG_ERROR,
        Some(
            SemverError::RepositorySafety(_)
            | SemverError::NotARepository
            | SemverError::BranchResolution(_)
            | SemverError::Git(_),
        ) => GIT_ERROR,
        Some(SemverError::MalformedTag { .. } | SemverError::VersionOverflow { .. }) => {
            VERSION_ERROR
        }
        _ => ERROR,
    }
}
