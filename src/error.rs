//! Crate-level error types for termlinks diagnostics.

use std::path::PathBuf;

/// All errors in termlinks carry enough context to produce a useful diagnostic
/// without a debugger. Each variant names the file, path, or reason for failure.
#[allow(clippy::error_impl_error, reason = "crate-internal error type in binary")]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The capture file given on the command line does not exist on disk.
    #[error("capture not found: {}", path.display())]
    CaptureNotFound {
        /// Path to the missing capture file.
        path: PathBuf,
    },

    /// Config file exists but toml_edit cannot parse it.
    #[error("config parse failed: {}: {reason}", path.display())]
    ConfigParse {
        /// Config file that failed to parse.
        path: PathBuf,
        /// Description of the parse failure.
        reason: String,
    },

    /// Underlying I/O error from the filesystem.
    #[error("io: {0}")]
    Io(
        /// The wrapped I/O error.
        #[from]
        std::io::Error,
    ),

    /// A resolver backend failed outright, as opposed to reporting a miss.
    /// A candidate that simply does not exist is not an error.
    #[error("resolver fault while resolving `{text}`: {reason}")]
    ResolverFault {
        /// Description of the backend failure.
        reason: String,
        /// Candidate text that was being resolved.
        text: String,
    },

    /// TOML deserialization failed.
    #[error("toml deserialize: {0}")]
    TomlDe(
        /// The wrapped TOML deserialization error.
        #[from]
        toml::de::Error,
    ),

    /// No configured workspace root matches the given path.
    #[error("unknown workspace root: `{path}`")]
    UnknownWorkspaceRoot {
        /// Root path that was not found in the config.
        path: String,
    },

    /// The filesystem watcher could not be created or registered.
    #[error("watch setup failed: {reason}")]
    WatchSetup {
        /// Description of the watcher failure.
        reason: String,
    },
}
