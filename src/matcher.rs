//! Structural patterns for the recognized output shapes.

use std::sync::OnceLock;

use regex::Regex;

use crate::types::CandidateMatch;

/// Post-image file row of a unified diff, `+++ b/<path>`.
static DIFF_TARGET: OnceLock<Regex> = OnceLock::new();

/// Unified diff hunk header, capturing the post-image start line.
static HUNK_HEADER: OnceLock<Regex> = OnceLock::new();

/// `line:col` at the start of a row, the shape ripgrep, grep `-n`, eslint,
/// and tsc print under a file heading.
static LINE_PREFIX: OnceLock<Regex> = OnceLock::new();

/// Rows that open with an optionally indented digit. The backward path
/// scan skips these, they are further match rows rather than paths.
static NUMERIC_PREFIX: OnceLock<Regex> = OnceLock::new();

/// Extracts the target path from a diff post-image row such as
/// `+++ b/src/app.ts`. Pre-image rows (`--- a/...`) yield nothing.
pub fn diff_target_path(text: &str) -> Option<String> {
    let caps = diff_target_regex().captures(text)?;
    return Some(caps.name("path")?.as_str().to_string());
}

/// Compiled diff target pattern.
///
/// # Panics
///
/// Panics if the hardcoded pattern is invalid (compile-time invariant).
#[allow(clippy::expect_used, reason = "hardcoded pattern is a compile-time invariant")]
fn diff_target_regex() -> &'static Regex {
    return DIFF_TARGET
        .get_or_init(|| return Regex::new(r"\+\+\+ b/(?<path>.+)").expect("valid regex"));
}

/// Compiled hunk header pattern.
///
/// # Panics
///
/// Panics if the hardcoded pattern is invalid (compile-time invariant).
#[allow(clippy::expect_used, reason = "hardcoded pattern is a compile-time invariant")]
fn hunk_header_regex() -> &'static Regex {
    return HUNK_HEADER.get_or_init(|| {
        return Regex::new(r"^(?<link>@@ .+ \+(?<line>\d+)(?:,\d+)? @@)").expect("valid regex");
    });
}

/// Whether a row opens with an optionally indented digit and therefore
/// cannot be a path candidate.
pub fn is_numeric_prefixed(text: &str) -> bool {
    return numeric_prefix_regex().is_match(text);
}

/// Compiled line prefix pattern.
///
/// # Panics
///
/// Panics if the hardcoded pattern is invalid (compile-time invariant).
#[allow(clippy::expect_used, reason = "hardcoded pattern is a compile-time invariant")]
fn line_prefix_regex() -> &'static Regex {
    return LINE_PREFIX.get_or_init(|| {
        return Regex::new(r"^ *(?<link>(?<line>\d+):(?<col>\d+)?)").expect("valid regex");
    });
}

/// Tries the hunk header pattern against a flattened logical line.
///
/// The captured fragment is the whole header. The line number is the
/// post-image start, so the link lands where the change applies. No column
/// is ever captured for this shape.
pub fn match_hunk_header(text: &str) -> Option<CandidateMatch> {
    let caps = hunk_header_regex().captures(text)?;
    let raw_fragment = caps.name("link")?.as_str().to_string();
    let line_number = caps.name("line")?.as_str().parse::<u32>().ok()?;
    return Some(CandidateMatch {
        column: None,
        line_number,
        raw_fragment,
    });
}

/// Tries the line prefix pattern against a flattened logical line.
///
/// Indentation is limited to spaces: compiler output indents with spaces,
/// and accepting tabs would swallow `Makefile`-style recipe rows. A
/// fragment whose number does not fit in 32 bits is treated as noise.
pub fn match_line_prefix(text: &str) -> Option<CandidateMatch> {
    let caps = line_prefix_regex().captures(text)?;
    let raw_fragment = caps.name("link")?.as_str().to_string();
    let line_number = caps.name("line")?.as_str().parse::<u32>().ok()?;
    let column = caps
        .name("col")
        .and_then(|m| return m.as_str().parse::<u32>().ok());
    return Some(CandidateMatch {
        column,
        line_number,
        raw_fragment,
    });
}

/// Compiled numeric prefix pattern.
///
/// # Panics
///
/// Panics if the hardcoded pattern is invalid (compile-time invariant).
#[allow(clippy::expect_used, reason = "hardcoded pattern is a compile-time invariant")]
fn numeric_prefix_regex() -> &'static Regex {
    return NUMERIC_PREFIX.get_or_init(|| return Regex::new(r"^\s*\d").expect("valid regex"));
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;

    #[test]
    fn line_prefix_matches_eslint_row() {
        let m = match_line_prefix("  16:5  error  'x' is assigned but never used").unwrap();
        assert_eq!(m.raw_fragment, "16:5");
        assert_eq!(m.line_number, 16);
        assert_eq!(m.column, Some(5));
    }

    #[test]
    fn line_prefix_matches_ripgrep_row_without_column() {
        let m = match_line_prefix("16:    let value = 1;").unwrap();
        assert_eq!(m.raw_fragment, "16:");
        assert_eq!(m.line_number, 16);
        assert_eq!(m.column, None);
    }

    #[test]
    fn line_prefix_requires_row_start() {
        assert!(match_line_prefix("at foo 16:5").is_none());
    }

    #[test]
    fn line_prefix_rejects_tab_indent() {
        assert!(match_line_prefix("\t16:5  error").is_none());
    }

    #[test]
    fn line_prefix_requires_colon() {
        assert!(match_line_prefix("16  error").is_none());
    }

    #[test]
    fn line_prefix_rejects_oversized_line_number() {
        assert!(match_line_prefix("99999999999:1  too deep").is_none());
    }

    #[test]
    fn hunk_header_parses_post_image_line() {
        let m = match_hunk_header("@@ -8,11 +8,12 @@ fn main").unwrap();
        assert_eq!(m.raw_fragment, "@@ -8,11 +8,12 @@");
        assert_eq!(m.line_number, 8);
        assert_eq!(m.column, None);
    }

    #[test]
    fn hunk_header_without_counts() {
        let m = match_hunk_header("@@ -5 +7 @@").unwrap();
        assert_eq!(m.raw_fragment, "@@ -5 +7 @@");
        assert_eq!(m.line_number, 7);
    }

    #[test]
    fn hunk_header_requires_row_start() {
        assert!(match_hunk_header(" @@ -1 +1 @@").is_none());
    }

    #[test]
    fn numeric_prefix_covers_indented_digits() {
        assert!(is_numeric_prefixed("12: match"));
        assert!(is_numeric_prefixed("  12:3  warning"));
        assert!(is_numeric_prefixed("\t9"));
        assert!(!is_numeric_prefixed("/home/user/project"));
        assert!(!is_numeric_prefixed(""));
    }

    #[test]
    fn diff_target_extracts_post_image_path() {
        assert_eq!(
            diff_target_path("+++ b/src/app.ts"),
            Some("src/app.ts".to_string())
        );
    }

    #[test]
    fn diff_target_ignores_pre_image_row() {
        assert!(diff_target_path("--- a/src/app.ts").is_none());
    }
}
