//! Pure formatting functions for result output.
//!
//! Nothing here performs I/O; the caller decides where the text goes.

use crate::resolver::TagResult;
use console::style;

/// Output variables in the order they are emitted
pub fn output_pairs(result: &TagResult) -> [(&'static str, String); 4] {
    [
        ("semver_tag", result.semver_tag.clone()),
        ("is_prerelease", result.is_prerelease.to_string()),
        ("previous_tag", result.previous_tag.clone()),
        ("ancestor_tag", result.ancestor_tag.clone()),
    ]
}

/// Format the result as `key=value` lines, one per output variable.
///
/// The same text is appended to `$GITHUB_OUTPUT`, so every line ends with a
/// newline.
pub fn format_outputs(result: &TagResult) -> String {
    output_pairs(result)
        .iter()
        .map(|(key, value)| format!("{}={}\n", key, value))
        .collect()
}

/// Format the result as a JSON object.
pub fn format_json(result: &TagResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(result)
}

/// Human-readable summary of the computed tag, styled for stderr.
///
/// Shows either:
/// - If releasing: "previous -> new" with the ancestor tag when one was found
/// - Otherwise: a note that the merge produced no release
pub fn format_summary(result: &TagResult) -> String {
    if !result.is_release() {
        return format!(
            "{} merge does not produce a release",
            style("→").for_stderr().yellow()
        );
    }

    let kind = if result.is_prerelease {
        "prerelease"
    } else {
        "release"
    };

    let mut summary = format!(
        "{} {} {} {} ({})",
        style("✓").for_stderr().green(),
        style(&result.previous_tag).for_stderr().red(),
        style("->").for_stderr().dim(),
        style(&result.semver_tag).for_stderr().green().bold(),
        kind,
    );

    if !result.ancestor_tag.is_empty() {
        summary.push_str(&format!(
            "\n  ancestor: {}",
            style(&result.ancestor_tag).for_stderr().cyan()
        ));
    }

    summary
}

/// Format an error message with a red label.
pub fn format_error(message: &str) -> String {
    format!("{} {}", style("ERROR:").for_stderr().red().bold(), message)
}
