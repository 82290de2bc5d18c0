//! Workspace roots: folder classification and the `workspace` CLI verbs.

use std::path::{Path, PathBuf};

use crate::config;
use crate::error;
use crate::resolver;
use crate::types::{LinkClass, ResolvedTarget};

/// The set of configured workspace roots.
///
/// Membership decides whether a resolved folder link is classified as
/// inside or outside the workspace. All checks are lexical, so roots are
/// absolutized and normalized when the set is built.
#[derive(Debug, Clone, Default)]
pub struct WorkspaceRoots {
    /// Absolute, normalized root paths.
    roots: Vec<PathBuf>,
}

impl WorkspaceRoots {
    /// Files open in an editor; folders split on workspace membership.
    pub fn classify(&self, target: &ResolvedTarget) -> LinkClass {
        if !target.is_directory {
            return LinkClass::LocalFile;
        }
        if self.contains(&target.uri) {
            return LinkClass::LocalFolderInWorkspace;
        }
        return LinkClass::LocalFolderOutsideWorkspace;
    }

    /// Whether `path` is one of the roots or sits underneath one.
    ///
    /// Comparison is component-wise: `/ws/app2` is not inside `/ws/app`.
    pub fn contains(&self, path: &Path) -> bool {
        return self.roots.iter().any(|root| return path.starts_with(root));
    }

    /// A root set from paths that are already absolute.
    pub fn new(roots: Vec<PathBuf>) -> Self {
        return WorkspaceRoots { roots };
    }

    /// Builds the root set from config values, absolutizing relative roots
    /// against `base` and collapsing dot segments.
    pub fn resolve_against(roots: &[PathBuf], base: &Path) -> Self {
        let resolved = roots
            .iter()
            .map(|root| {
                if root.is_absolute() {
                    return resolver::normalize_path(root);
                }
                return resolver::normalize_path(&base.join(root));
            })
            .collect();
        return WorkspaceRoots { roots: resolved };
    }
}

// ── CLI commands ──────────────────────────────────────────────────────

/// Add a workspace root to the config file.
///
/// # Errors
///
/// Returns errors from config reading or writing.
pub fn cmd_add(path: &str) -> Result<(), error::Error> {
    let root = PathBuf::from(".");
    add_to_config(&root, path)?;
    println!("Added workspace root: {path}");
    return Ok(());
}

/// List all configured workspace roots, sorted alphabetically.
///
/// # Errors
///
/// Returns errors from config loading.
pub fn cmd_list() -> Result<(), error::Error> {
    let root = PathBuf::from(".");
    let config = config::Config::load(&root)?;

    if config.workspace().is_empty() {
        println!("No workspace roots configured.");
        return Ok(());
    }

    let mut sorted: Vec<String> = config
        .workspace()
        .iter()
        .map(|p| return p.display().to_string())
        .collect();
    sorted.sort();
    for entry in sorted {
        println!("{entry}");
    }

    return Ok(());
}

/// Remove a workspace root from the config file.
///
/// # Errors
///
/// Returns `Error::UnknownWorkspaceRoot` if the root isn't configured.
pub fn cmd_remove(path: &str) -> Result<(), error::Error> {
    let root = PathBuf::from(".");
    remove_from_config(&root, path)?;
    println!("Removed workspace root: {path}");
    return Ok(());
}

// ── Config file editing ───────────────────────────────────────────────

/// Add a root to the `workspace` array in `.termlinks.toml`.
/// Creates the array if it doesn't exist; adding a configured root again
/// is a no-op.
///
/// # Errors
///
/// Returns `Error::ConfigParse` if the config can't be parsed or the
/// `workspace` key holds something other than an array, or `Error::Io`
/// if writing fails.
fn add_to_config(root: &Path, workspace_path: &str) -> Result<(), error::Error> {
    let (config_path, mut doc) = read_config_doc(root)?;

    if !doc.contains_key("workspace") {
        doc["workspace"] = toml_edit::Item::Value(toml_edit::Value::Array(toml_edit::Array::new()));
    }

    let array = doc
        .get_mut("workspace")
        .and_then(toml_edit::Item::as_array_mut)
        .ok_or_else(|| {
            return error::Error::ConfigParse {
                path: config_path.clone(),
                reason: "`workspace` is not an array".to_string(),
            };
        })?;

    let already_present = array
        .iter()
        .any(|entry| return entry.as_str() == Some(workspace_path));
    if !already_present {
        array.push(workspace_path);
    }

    std::fs::write(&config_path, doc.to_string())?;
    return Ok(());
}

/// Parse a `.termlinks.toml` into a format-preserving document.
/// Returns an empty document if the file doesn't exist.
///
/// # Errors
///
/// Returns `Error::Io` on read failure or `Error::ConfigParse` on parse
/// failure.
fn read_config_doc(root: &Path) -> Result<(PathBuf, toml_edit::DocumentMut), error::Error> {
    let config_path = root.join(".termlinks.toml");
    let content = match std::fs::read_to_string(&config_path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(error::Error::Io(e)),
    };

    let doc: toml_edit::DocumentMut = content.parse().map_err(|e: toml_edit::TomlError| {
        return error::Error::ConfigParse {
            path: config_path.clone(),
            reason: e.to_string(),
        };
    })?;

    return Ok((config_path, doc));
}

/// Remove a root from the `workspace` array in `.termlinks.toml`.
///
/// # Errors
///
/// Returns `Error::UnknownWorkspaceRoot` if the root isn't present.
fn remove_from_config(root: &Path, workspace_path: &str) -> Result<(), error::Error> {
    let (config_path, mut doc) = read_config_doc(root)?;

    let array = doc
        .get_mut("workspace")
        .and_then(toml_edit::Item::as_array_mut)
        .ok_or_else(|| {
            return error::Error::UnknownWorkspaceRoot {
                path: workspace_path.to_string(),
            };
        })?;

    let position = array
        .iter()
        .position(|entry| return entry.as_str() == Some(workspace_path));
    let Some(position) = position else {
        return Err(error::Error::UnknownWorkspaceRoot {
            path: workspace_path.to_string(),
        });
    };
    array.remove(position);

    std::fs::write(&config_path, doc.to_string())?;
    return Ok(());
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;

    #[test]
    fn classify_splits_on_kind_and_membership() {
        let roots = WorkspaceRoots::new(vec![PathBuf::from("/ws/app")]);
        let file = ResolvedTarget {
            is_directory: false,
            uri: PathBuf::from("/opt/readme.md"),
        };
        let inside = ResolvedTarget {
            is_directory: true,
            uri: PathBuf::from("/ws/app/src"),
        };
        let outside = ResolvedTarget {
            is_directory: true,
            uri: PathBuf::from("/opt/cache"),
        };
        assert_eq!(roots.classify(&file), LinkClass::LocalFile);
        assert_eq!(roots.classify(&inside), LinkClass::LocalFolderInWorkspace);
        assert_eq!(roots.classify(&outside), LinkClass::LocalFolderOutsideWorkspace);
    }

    #[test]
    fn contains_is_component_wise() {
        let roots = WorkspaceRoots::new(vec![PathBuf::from("/ws/app")]);
        assert!(roots.contains(Path::new("/ws/app/src/main.rs")));
        assert!(roots.contains(Path::new("/ws/app")));
        assert!(!roots.contains(Path::new("/ws/app2/src/main.rs")));
        assert!(!roots.contains(Path::new("/elsewhere")));
    }

    #[test]
    fn empty_root_set_contains_nothing() {
        let roots = WorkspaceRoots::default();
        assert!(!roots.contains(Path::new("/ws/app")));
    }

    #[test]
    fn resolve_against_absolutizes_relative_roots() {
        let configured = vec![PathBuf::from("src"), PathBuf::from("/abs/root")];
        let roots = WorkspaceRoots::resolve_against(&configured, Path::new("/base"));
        assert!(roots.contains(Path::new("/base/src/lib.rs")));
        assert!(roots.contains(Path::new("/abs/root/deep/file")));
        assert!(!roots.contains(Path::new("/base/other")));
    }

    #[test]
    fn resolve_against_collapses_dot_segments() {
        let configured = vec![PathBuf::from("./src/../src")];
        let roots = WorkspaceRoots::resolve_against(&configured, Path::new("/base"));
        assert!(roots.contains(Path::new("/base/src/lib.rs")));
    }

    #[test]
    fn add_creates_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        add_to_config(dir.path(), "src").unwrap();

        let content = std::fs::read_to_string(dir.path().join(".termlinks.toml")).unwrap();
        assert!(content.contains("workspace"));
        assert!(content.contains("src"));
    }

    #[test]
    fn add_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        add_to_config(dir.path(), "src").unwrap();
        add_to_config(dir.path(), "src").unwrap();

        let (_, doc) = read_config_doc(dir.path()).unwrap();
        let array = doc.get("workspace").and_then(toml_edit::Item::as_array);
        assert_eq!(array.map(toml_edit::Array::len), Some(1));
    }

    #[test]
    fn add_preserves_unrelated_keys() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join(".termlinks.toml");
        std::fs::write(&config_path, "# viewport width\ncols = 120\n").unwrap();

        add_to_config(dir.path(), "src").unwrap();

        let content = std::fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("# viewport width"));
        assert!(content.contains("cols = 120"));
    }

    #[test]
    fn remove_drops_configured_root() {
        let dir = tempfile::tempdir().unwrap();
        add_to_config(dir.path(), "src").unwrap();
        add_to_config(dir.path(), "vendor").unwrap();
        remove_from_config(dir.path(), "src").unwrap();

        let (_, doc) = read_config_doc(dir.path()).unwrap();
        let array = doc.get("workspace").and_then(toml_edit::Item::as_array);
        assert_eq!(array.map(toml_edit::Array::len), Some(1));
    }

    #[test]
    fn remove_unknown_root_errors() {
        let dir = tempfile::tempdir().unwrap();
        let result = remove_from_config(dir.path(), "nope");
        assert!(matches!(
            result,
            Err(error::Error::UnknownWorkspaceRoot { .. })
        ));
    }
}
