//! Path candidate resolution against the local filesystem.

use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::types::{OsKind, ProcessContext, ResolvedTarget};

/// Resolves candidate path text against a backing filesystem.
///
/// Detection calls this at most once per invocation. A candidate that does
/// not exist is a miss, `Ok(None)`. An `Err` means the backend itself
/// failed, and that failure surfaces to the detection caller untouched.
pub trait LinkResolver {
    /// Resolve `text` to a verified target, or `None` when nothing exists.
    ///
    /// # Errors
    ///
    /// Returns `Error::ResolverFault` when the backend fails outright
    /// rather than merely finding nothing.
    fn resolve_link(
        &self,
        context: &ProcessContext,
        text: &str,
    ) -> Result<Option<ResolvedTarget>, Error>;
}

/// Resolver backed by the local filesystem. Never faults: any candidate
/// that cannot be verified is reported as a miss.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalResolver;

impl LinkResolver for LocalResolver {
    fn resolve_link(
        &self,
        context: &ProcessContext,
        text: &str,
    ) -> Result<Option<ResolvedTarget>, Error> {
        if context.remote_authority.is_some() {
            tracing::trace!("session is remote, local filesystem cannot verify candidates");
            return Ok(None);
        }
        let stripped = strip_query_string(strip_position_suffix(text));
        if stripped.is_empty() {
            return Ok(None);
        }

        let Some(absolute) = absolutize_candidate(context, stripped) else {
            tracing::trace!("no base to absolutize candidate {stripped:?}");
            return Ok(None);
        };
        let normalized = normalize_path(&absolute);

        return match std::fs::metadata(&normalized) {
            Ok(metadata) => {
                tracing::trace!("candidate {stripped:?} resolved to {}", normalized.display());
                Ok(Some(ResolvedTarget {
                    is_directory: metadata.is_dir(),
                    uri: normalized,
                }))
            },
            Err(_) => {
                tracing::trace!("candidate {stripped:?} does not exist");
                Ok(None)
            },
        };
    }
}

// ── Candidate preprocessing ────────────────────────────────────────────

/// Turns candidate text into an absolute path using the session context.
///
/// Tilde candidates need a home directory, relative candidates need a
/// working directory. Without the required base the candidate cannot be
/// resolved at all.
fn absolutize_candidate(context: &ProcessContext, text: &str) -> Option<PathBuf> {
    if let Some(rest) = text.strip_prefix('~') {
        let home = context.user_home.as_ref()?;
        let rest = rest.trim_start_matches(['/', '\\']);
        if rest.is_empty() {
            return Some(home.clone());
        }
        return Some(home.join(rest));
    }
    if is_absolute_for(context.os, text) {
        return Some(PathBuf::from(text));
    }
    let cwd = context.initial_cwd.as_ref()?;
    return Some(cwd.join(text));
}

/// Whether `text` is an absolute path under the given OS family.
fn is_absolute_for(os: OsKind, text: &str) -> bool {
    return match os {
        OsKind::Linux | OsKind::Macos => text.starts_with('/'),
        OsKind::Windows => text.starts_with('\\') || has_windows_drive_prefix(text),
    };
}

/// Whether `text` opens with a `C:`-style drive prefix.
fn has_windows_drive_prefix(text: &str) -> bool {
    let mut chars = text.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    return first.is_ascii_alphabetic() && chars.next() == Some(':');
}

// ── Suffix stripping ───────────────────────────────────────────────────

/// Strips a trailing `(line[,col])` or `[line[,col]]` suffix delimited by
/// the given bracket pair. Returns `None` when no such suffix is present.
fn strip_bracketed_suffix(text: &str, open: char, close: char) -> Option<&str> {
    let body = text.strip_suffix(close)?;
    let open_at = body.rfind(open)?;
    let (prefix, bracketed) = body.split_at(open_at);
    let inner = bracketed.strip_prefix(open).unwrap_or(bracketed);
    if !is_position_list(inner) {
        return None;
    }
    let prefix = prefix.trim_end();
    if prefix.is_empty() {
        return None;
    }
    return Some(prefix);
}

/// Strips a `:line[:col]` suffix. Drive-letter prefixes survive because a
/// path segment is never a bare number.
fn strip_colon_suffix(text: &str) -> &str {
    let Some((rest, tail)) = text.rsplit_once(':') else {
        return text;
    };
    if tail.parse::<u32>().is_err() || rest.is_empty() {
        return text;
    }
    // A second numeric segment means the first was the column.
    if let Some((path, line)) = rest.rsplit_once(':') {
        if line.parse::<u32>().is_ok() && !path.is_empty() {
            return path;
        }
    }
    return rest;
}

/// Strips the position suffixes compilers and linters append to paths:
/// `:12`, `:12:5`, `(12)`, `(12,5)`, `[12]`, and `[12, 5]`.
fn strip_position_suffix(text: &str) -> &str {
    if let Some(stripped) = strip_bracketed_suffix(text, '(', ')') {
        return stripped;
    }
    if let Some(stripped) = strip_bracketed_suffix(text, '[', ']') {
        return stripped;
    }
    return strip_colon_suffix(text);
}

/// Drops a `?query` tail. Tools that print URLs next to paths leave query
/// strings that are never part of the on-disk name.
fn strip_query_string(text: &str) -> &str {
    return text.split_once('?').map_or(text, |(path, _)| return path);
}

/// Whether `inner` is `digits` or `digits, digits`.
fn is_position_list(inner: &str) -> bool {
    let mut parts = inner.splitn(2, ',');
    let Some(line) = parts.next() else {
        return false;
    };
    if line.trim().parse::<u32>().is_err() {
        return false;
    }
    return match parts.next() {
        Some(col) => col.trim().parse::<u32>().is_ok(),
        None => true,
    };
}

// ── Lexical normalization ──────────────────────────────────────────────

/// Collapse `.` and `..` components in a path without touching the
/// filesystem. Preserves leading `..` when there is nothing left to pop.
pub(crate) fn normalize_path(path: &Path) -> PathBuf {
    let mut components: Vec<std::path::Component<'_>> = Vec::new();
    for component in path.components() {
        push_normalized_component(&mut components, component);
    }
    return components.iter().collect();
}

/// Handle a single path component during normalization.
/// Pops the last component for `..` when possible, preserves it otherwise.
fn push_normalized_component<'a>(
    components: &mut Vec<std::path::Component<'a>>,
    component: std::path::Component<'a>,
) {
    match component {
        std::path::Component::CurDir => {},
        std::path::Component::ParentDir => {
            let can_pop = matches!(
                components.last(),
                Some(c) if !matches!(c, std::path::Component::ParentDir)
            );
            if can_pop {
                components.pop();
            } else {
                components.push(component);
            }
        },
        other => components.push(other),
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;

    /// Context rooted at `dir` for the working directory, with a `home`
    /// subdirectory standing in for the user home.
    fn context_at(dir: &Path) -> ProcessContext {
        return ProcessContext {
            initial_cwd: Some(dir.to_path_buf()),
            os: OsKind::host(),
            remote_authority: None,
            user_home: Some(dir.join("home")),
        };
    }

    #[test]
    fn resolves_absolute_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("main.rs");
        std::fs::write(&file, "fn main() {}\n").unwrap();

        let target = LocalResolver
            .resolve_link(&context_at(dir.path()), &file.display().to_string())
            .unwrap()
            .unwrap();
        assert_eq!(target.uri, file);
        assert!(!target.is_directory);
    }

    #[test]
    fn resolves_relative_against_cwd() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("main.rs"), "fn main() {}\n").unwrap();

        let target = LocalResolver
            .resolve_link(&context_at(dir.path()), "main.rs")
            .unwrap()
            .unwrap();
        assert_eq!(target.uri, dir.path().join("main.rs"));
    }

    #[test]
    fn resolves_tilde_against_home() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("home")).unwrap();
        std::fs::write(dir.path().join("home").join("notes.txt"), "hi\n").unwrap();

        let target = LocalResolver
            .resolve_link(&context_at(dir.path()), "~/notes.txt")
            .unwrap()
            .unwrap();
        assert_eq!(target.uri, dir.path().join("home").join("notes.txt"));
    }

    #[test]
    fn strips_line_and_column_suffix() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("main.rs"), "fn main() {}\n").unwrap();

        let target = LocalResolver
            .resolve_link(&context_at(dir.path()), "main.rs:12:5")
            .unwrap()
            .unwrap();
        assert_eq!(target.uri, dir.path().join("main.rs"));
    }

    #[test]
    fn strips_parenthesized_suffix() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("main.rs"), "fn main() {}\n").unwrap();

        let resolved = LocalResolver
            .resolve_link(&context_at(dir.path()), "main.rs(12,5)")
            .unwrap();
        assert!(resolved.is_some());
    }

    #[test]
    fn normalizes_dot_segments() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("src")).unwrap();
        std::fs::write(dir.path().join("src").join("lib.rs"), "\n").unwrap();

        let target = LocalResolver
            .resolve_link(&context_at(dir.path()), "src/../src/./lib.rs")
            .unwrap()
            .unwrap();
        assert_eq!(target.uri, dir.path().join("src").join("lib.rs"));
    }

    #[test]
    fn directory_target_reports_is_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("pkg")).unwrap();

        let target = LocalResolver
            .resolve_link(&context_at(dir.path()), "pkg")
            .unwrap()
            .unwrap();
        assert!(target.is_directory);
    }

    #[test]
    fn miss_for_nonexistent_candidate() {
        let dir = tempfile::tempdir().unwrap();
        let resolved = LocalResolver
            .resolve_link(&context_at(dir.path()), "no/such/file.rs")
            .unwrap();
        assert!(resolved.is_none());
    }

    #[test]
    fn relative_candidate_without_cwd_is_miss() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("main.rs"), "\n").unwrap();
        let context = ProcessContext {
            initial_cwd: None,
            os: OsKind::host(),
            remote_authority: None,
            user_home: None,
        };

        let resolved = LocalResolver.resolve_link(&context, "main.rs").unwrap();
        assert!(resolved.is_none());
    }

    #[test]
    fn remote_session_is_always_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("main.rs"), "fn main() {}\n").unwrap();
        let mut context = context_at(dir.path());
        context.remote_authority = Some("build-host:22".to_string());

        let resolved = LocalResolver.resolve_link(&context, "main.rs").unwrap();
        assert!(resolved.is_none());
    }

    #[test]
    fn query_string_is_dropped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("page.html"), "<html>\n").unwrap();

        let resolved = LocalResolver
            .resolve_link(&context_at(dir.path()), "page.html?v=2")
            .unwrap();
        assert!(resolved.is_some());
    }

    #[test]
    fn suffix_stripping_shapes() {
        assert_eq!(strip_position_suffix("a/b.ts:12:5"), "a/b.ts");
        assert_eq!(strip_position_suffix("a/b.ts:12"), "a/b.ts");
        assert_eq!(strip_position_suffix("a/b.ts(3)"), "a/b.ts");
        assert_eq!(strip_position_suffix("a/b.ts [12, 5]"), "a/b.ts");
        assert_eq!(strip_position_suffix("a/b.ts"), "a/b.ts");
        assert_eq!(strip_position_suffix("a:b"), "a:b");
    }

    #[test]
    fn drive_prefix_survives_suffix_stripping() {
        assert_eq!(
            strip_position_suffix(r"C:\proj\main.rs:12"),
            r"C:\proj\main.rs"
        );
        assert_eq!(strip_position_suffix(r"C:\proj\main.rs"), r"C:\proj\main.rs");
    }

    #[test]
    fn empty_candidate_is_miss() {
        let dir = tempfile::tempdir().unwrap();
        let resolved = LocalResolver
            .resolve_link(&context_at(dir.path()), "")
            .unwrap();
        assert!(resolved.is_none());
    }
}
