use thiserror::Error;

/// Unified error type for merge-semver operations
#[derive(Error, Debug)]
pub enum SemverError {
    #[error("failed to make safe: {0}")]
    RepositorySafety(String),

    #[error("current folder is not a git repository")]
    NotARepository,

    #[error("failed to resolve branch: {0}")]
    BranchResolution(String),

    #[error(
        "unrecognized branch naming convention for a versioning merge: \
         source {source_branch:?} into {dest_branch:?}"
    )]
    UnrecognizedBumpStrategy {
        source_branch: String,
        dest_branch: String,
    },

    #[error("failed to parse tag {tag:?} or not valid semantic version: {reason}")]
    MalformedTag { tag: String, reason: String },

    #[error("failed to increment {field} version: value overflow")]
    VersionOverflow { field: &'static str },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in merge-semver
pub type Result<T> = std::result::Result<T, SemverError>;

impl SemverError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        SemverError::Config(msg.into())
    }

    /// Create an invalid parameter error with context
    pub fn parameter(msg: impl Into<String>) -> Self {
        SemverError::InvalidParameter(msg.into())
    }

    /// Create a malformed tag error for the offending tag string
    pub fn tag(tag: impl Into<String>, reason: impl ToString) -> Self {
        SemverError::MalformedTag {
            tag: tag.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a branch resolution error with context
    pub fn branch(msg: impl Into<String>) -> Self {
        SemverError::BranchResolution(msg.into())
    }

    /// Whether the error came from bad user input rather than repository state
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            SemverError::InvalidParameter(_) | SemverError::Config(_)
        )
    }
}
