use std::sync::LazyLock;

use regex::Regex;

static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Remove `<...>` tag spans from rich-text markup.
pub fn strip_html_tags(text: &str) -> String {
    HTML_TAG.replace_all(text, "").into_owned()
}

/// Turn an issue description into a branch-name suggestion: markup stripped,
/// spaces replaced with underscores. Casing and punctuation are kept as-is.
pub fn suggested_branch_name(text: &str) -> String {
    strip_html_tags(text).replace(' ', "_")
}
