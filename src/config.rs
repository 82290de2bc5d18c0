//! Project configuration from `.termlinks.toml`.

use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::types::{OsKind, ProcessContext};

/// Viewport width assumed when neither config nor CLI provides one.
pub const DEFAULT_COLS: usize = 80;

/// Longest flattened logical line worth scanning, in cells.
pub const DEFAULT_MAX_LINE_LENGTH: usize = 2000;

/// Longest matched fragment worth resolving, in characters.
pub const DEFAULT_MAX_LINK_LENGTH: usize = 1024;

/// Project configuration loaded from `.termlinks.toml`.
/// Workspace roots may be relative; they are absolutized where they are
/// consumed, not here.
pub struct Config {
    /// Viewport width used to re-wrap captured text.
    cols: usize,
    /// Session working directory override for relative candidates.
    cwd: Option<PathBuf>,
    /// Scan guard: flattened lines longer than this are skipped.
    max_line_length: usize,
    /// Resolve guard: fragments longer than this are skipped.
    max_link_length: usize,
    /// Configured workspace roots, as written.
    workspace: Vec<PathBuf>,
}

/// Detection guards handed to the detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectionLimits {
    /// Flattened lines longer than this many cells are not scanned.
    pub max_line_length: usize,
    /// Fragments longer than this many characters are not resolved.
    pub max_link_length: usize,
}

impl Default for DetectionLimits {
    fn default() -> Self {
        return DetectionLimits {
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            max_link_length: DEFAULT_MAX_LINK_LENGTH,
        };
    }
}

/// Raw TOML structure for `.termlinks.toml`.
#[derive(serde::Deserialize)]
struct TermlinksTomlConfig {
    /// Optional viewport width.
    #[serde(default)]
    cols: Option<usize>,
    /// Optional session working directory.
    #[serde(default)]
    cwd: Option<PathBuf>,
    /// Optional scan guard override.
    #[serde(default)]
    max_line_length: Option<usize>,
    /// Optional resolve guard override.
    #[serde(default)]
    max_link_length: Option<usize>,
    /// Workspace roots.
    #[serde(default)]
    workspace: Vec<PathBuf>,
}

impl Config {
    /// Defaults used when no config file exists: an 80-column viewport,
    /// the standard guards, and no workspace roots.
    fn built_in_defaults() -> Self {
        return Self {
            cols: DEFAULT_COLS,
            cwd: None,
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            max_link_length: DEFAULT_MAX_LINK_LENGTH,
            workspace: Vec::new(),
        };
    }

    /// Configured viewport width.
    pub fn cols(&self) -> usize {
        return self.cols;
    }

    /// Detection guards from this config.
    pub fn limits(&self) -> DetectionLimits {
        return DetectionLimits {
            max_line_length: self.max_line_length,
            max_link_length: self.max_link_length,
        };
    }

    /// Load config from `.termlinks.toml` in the given root directory.
    /// Returns built-in defaults if the file doesn't exist. Returns an
    /// error if the file exists but is malformed, never silently falls
    /// back to defaults when the user wrote a config file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if reading fails (other than not-found),
    /// or `Error::TomlDe` if the TOML is malformed.
    pub fn load(root: &Path) -> Result<Self, Error> {
        let path = root.join(".termlinks.toml");
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::built_in_defaults());
            },
            Err(e) => return Err(Error::Io(e)),
        };

        let raw: TermlinksTomlConfig = toml::from_str(&content)?;
        return Ok(Self {
            cols: raw.cols.unwrap_or(DEFAULT_COLS),
            cwd: raw.cwd,
            max_line_length: raw.max_line_length.unwrap_or(DEFAULT_MAX_LINE_LENGTH),
            max_link_length: raw.max_link_length.unwrap_or(DEFAULT_MAX_LINK_LENGTH),
            workspace: raw.workspace,
        });
    }

    /// Ambient session context for resolvers: the configured working
    /// directory when set, the host environment otherwise.
    pub fn process_context(&self) -> ProcessContext {
        let initial_cwd = self
            .cwd
            .clone()
            .or_else(|| return std::env::current_dir().ok());
        return ProcessContext {
            initial_cwd,
            os: OsKind::host(),
            remote_authority: None,
            user_home: dirs::home_dir(),
        };
    }

    /// Configured workspace roots, as written in the config file.
    pub fn workspace(&self) -> &[PathBuf] {
        return &self.workspace;
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.cols(), DEFAULT_COLS);
        assert_eq!(config.limits(), DetectionLimits::default());
        assert!(config.workspace().is_empty());
    }

    #[test]
    fn config_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(".termlinks.toml"),
            "cols = 120\nmax_line_length = 500\nworkspace = [\"src\", \"/abs\"]\n",
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.cols(), 120);
        assert_eq!(config.limits().max_line_length, 500);
        assert_eq!(config.limits().max_link_length, DEFAULT_MAX_LINK_LENGTH);
        assert_eq!(config.workspace().len(), 2);
    }

    #[test]
    fn malformed_config_is_a_hard_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".termlinks.toml"), "cols = [not toml").unwrap();
        assert!(matches!(Config::load(dir.path()), Err(Error::TomlDe(_))));
    }

    #[test]
    fn configured_cwd_feeds_process_context() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".termlinks.toml"), "cwd = \"/srv/session\"\n").unwrap();

        let config = Config::load(dir.path()).unwrap();
        let context = config.process_context();
        assert_eq!(context.initial_cwd, Some(PathBuf::from("/srv/session")));
    }
}
