//! Core domain types for terminal buffers, candidate matches, and links.

use std::path::PathBuf;

/// One row of a terminal viewport snapshot.
///
/// A logical line that soft-wrapped at the viewport width occupies several
/// consecutive rows: the first has `wrapped == false`, every continuation row
/// has `wrapped == true`. Content is stored as cells, one `char` per cell.
/// Continuation invariant: every row of a wrapped logical line except the
/// last holds exactly the viewport width in characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferLine {
    /// Cell content of this row, trailing blanks trimmed on the final row.
    pub content: String,
    /// Whether this row continues the logical line started on a prior row.
    pub wrapped: bool,
}

impl BufferLine {
    /// A row holding `content`, marked as a continuation when `wrapped`.
    pub fn new(content: impl Into<String>, wrapped: bool) -> Self {
        return BufferLine {
            content: content.into(),
            wrapped,
        };
    }
}

/// A single cell position in the buffer. Both coordinates are one-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct BufferPosition {
    /// One-based column within the row.
    pub col: usize,
    /// One-based row within the viewport snapshot.
    pub row: usize,
}

/// A span of buffer cells. `end` is inclusive: it names the last cell
/// covered, not the cell after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct BufferRange {
    /// Last cell covered by the span.
    pub end: BufferPosition,
    /// First cell covered by the span.
    pub start: BufferPosition,
}

/// A structural `line[:col]` match found in a flattened logical line,
/// before any path has been attached to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateMatch {
    /// One-based column parsed from the fragment, when present.
    pub column: Option<u32>,
    /// One-based line number parsed from the fragment.
    pub line_number: u32,
    /// Exact fragment text the pattern captured, such as `16:5` or a full
    /// diff hunk header.
    pub raw_fragment: String,
}

/// What a resolved link points at. Controls how a consumer opens it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkClass {
    /// A regular file. Open in an editor at the selection.
    LocalFile,
    /// A directory underneath one of the configured workspace roots.
    LocalFolderInWorkspace,
    /// A directory outside every configured workspace root.
    LocalFolderOutsideWorkspace,
}

impl LinkClass {
    /// Short human label used in plain-text output.
    pub fn label(self) -> &'static str {
        return match self {
            LinkClass::LocalFile => "file",
            LinkClass::LocalFolderInWorkspace => "folder in workspace",
            LinkClass::LocalFolderOutsideWorkspace => "folder outside workspace",
        };
    }
}

/// Operating system family the scanned output was produced on. Decides
/// which path shapes count as absolute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsKind {
    /// Linux and other unix-likes. Absolute paths start with `/`.
    Linux,
    /// macOS. Absolute paths start with `/`.
    Macos,
    /// Windows. Absolute paths start with a drive letter or a UNC prefix.
    Windows,
}

impl OsKind {
    /// The kind matching the host this process runs on.
    pub fn host() -> Self {
        if cfg!(target_os = "windows") {
            return OsKind::Windows;
        }
        if cfg!(target_os = "macos") {
            return OsKind::Macos;
        }
        return OsKind::Linux;
    }
}

/// Ambient state of the shell session whose output is being scanned.
/// Resolvers consult it to absolutize relative and tilde paths.
#[derive(Debug, Clone)]
pub struct ProcessContext {
    /// Working directory of the session. `None` disables relative-path
    /// resolution entirely.
    pub initial_cwd: Option<PathBuf>,
    /// Operating system family of the session.
    pub os: OsKind,
    /// Authority of the remote host the session runs on, when it is not
    /// this machine. Resolvers that can only verify local paths must treat
    /// every candidate from a remote session as a miss.
    pub remote_authority: Option<String>,
    /// Home directory of the session user. `None` disables tilde expansion.
    pub user_home: Option<PathBuf>,
}

/// A path candidate that was verified to exist on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    /// Whether the target is a directory rather than a regular file.
    pub is_directory: bool,
    /// Absolute, lexically normalized path of the target.
    pub uri: PathBuf,
}

/// Caret placement for an editor opening the linked file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Selection {
    /// One-based column to place the caret at. Defaults to 1 when the
    /// fragment carried no column.
    pub column: u32,
    /// One-based line to place the caret at.
    pub line: u32,
}

/// A fully assembled link: where it sits in the buffer, what it points at,
/// and where an editor should land.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SimpleLink {
    /// Cells of the logical line the link decorates.
    pub buffer_range: BufferRange,
    /// Classification of the resolved target.
    pub class: LinkClass,
    /// Caret placement parsed from the matched fragment.
    pub selection: Selection,
    /// Fragment text the pattern matched.
    pub text: String,
    /// Resolved target path.
    pub uri: PathBuf,
}
