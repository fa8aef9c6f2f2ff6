use glob::Pattern;
use std::fmt;

/// Include/exclude glob pair used to look up an ancestor tag
///
/// Globs follow `git describe --match/--exclude` syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPattern {
    pub include: String,
    pub exclude: Option<String>,
}

impl TagPattern {
    /// Create a pattern from raw globs
    pub fn new(include: impl Into<String>, exclude: Option<String>) -> Self {
        TagPattern {
            include: include.into(),
            exclude,
        }
    }

    /// Tags on the prerelease line: `<prefix>[0-9]*-<id>*`
    pub fn prerelease(prefix: &str, prerelease_id: &str) -> Self {
        TagPattern::new(prerelease_glob(prefix, prerelease_id), None)
    }

    /// Final release tags: `<prefix>[0-9]*`, excluding the prerelease line
    pub fn release(prefix: &str, prerelease_id: &str) -> Self {
        TagPattern::new(
            format!("{}[0-9]*", escape(prefix)),
            Some(prerelease_glob(prefix, prerelease_id)),
        )
    }

    /// Whether a tag name is selected by this pattern
    ///
    /// An include glob that does not compile selects nothing.
    pub fn matches(&self, tag: &str) -> bool {
        let included = Pattern::new(&self.include)
            .map(|p| p.matches(tag))
            .unwrap_or(false);

        let excluded = self
            .exclude
            .as_deref()
            .and_then(|glob| Pattern::new(glob).ok())
            .map(|p| p.matches(tag))
            .unwrap_or(false);

        included && !excluded
    }
}

impl fmt::Display for TagPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "include {:?}", self.include)?;
        if let Some(exclude) = &self.exclude {
            write!(f, ", exclude {:?}", exclude)?;
        }
        Ok(())
    }
}

fn prerelease_glob(prefix: &str, prerelease_id: &str) -> String {
    format!("{}[0-9]*-{}*", escape(prefix), escape(prerelease_id))
}

/// Prefixes are literal text; only glob metacharacters need escaping.
fn escape(literal: &str) -> String {
    if literal.contains(['*', '?', '[', ']']) {
        Pattern::escape(literal)
    } else {
        literal.to_string()
    }
}
