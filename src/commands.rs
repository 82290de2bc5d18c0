//! Core CLI commands for termlinks: scan, resolve, info.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::buffer;
use crate::config;
use crate::detector::MultiLineDetector;
use crate::error;
use crate::resolver::{LinkResolver, LocalResolver};
use crate::types::{BufferLine, ProcessContext, SimpleLink};
use crate::workspace::WorkspaceRoots;

/// Everything a detection pass needs, loaded from config once.
pub struct Session {
    /// Viewport width in cells.
    pub cols: usize,
    /// Scan and resolve guards.
    pub limits: config::DetectionLimits,
    /// Session context handed to the resolver.
    pub process: ProcessContext,
    /// Workspace roots for folder classification.
    pub workspace: WorkspaceRoots,
}

/// Run detection over every logical line of the snapshot, in order.
///
/// # Errors
///
/// Returns resolver faults from any line.
pub fn detect_all(session: &Session, lines: &[BufferLine]) -> Result<Vec<SimpleLink>, error::Error> {
    let local = LocalResolver;
    let detector = MultiLineDetector::new(
        &local,
        &session.workspace,
        session.process.clone(),
        session.limits,
        session.cols,
    );

    let mut links: Vec<SimpleLink> = Vec::new();
    for (start_row, end_row) in buffer::logical_spans(lines) {
        links.extend(detector.detect(lines, start_row, end_row)?);
    }
    return Ok(links);
}

/// Output a comprehensive reference document for termlinks.
pub fn info(json: bool) {
    return crate::info::run(json);
}

/// Load config from `root` and assemble the detection session.
///
/// # Errors
///
/// Returns errors from config loading or working directory lookup.
pub fn load_session(root: &Path, cols_override: Option<usize>) -> Result<Session, error::Error> {
    let config = config::Config::load(root)?;
    let base = std::env::current_dir()?;
    return Ok(Session {
        cols: cols_override.unwrap_or_else(|| return config.cols()),
        limits: config.limits(),
        process: config.process_context(),
        workspace: WorkspaceRoots::resolve_against(config.workspace(), &base),
    });
}

/// Print one line per link: target, selection, matched text, class.
fn print_human(links: &[SimpleLink]) {
    if links.is_empty() {
        eprintln!("No links found.");
        return;
    }
    for link in links {
        println!(
            "{}:{}:{}  {}  ({})",
            link.uri.display(),
            link.selection.line,
            link.selection.column,
            link.text,
            link.class.label(),
        );
    }
    return;
}

/// Print the full link list as pretty JSON.
fn print_json(links: &[SimpleLink]) {
    let rendered = serde_json::to_string_pretty(links).unwrap_or_default();
    println!("{rendered}");
    return;
}

/// Read the capture to scan: a file when given, stdin otherwise.
///
/// # Errors
///
/// Returns `Error::CaptureNotFound` for an unreadable file and
/// `Error::Io` for stdin failures.
fn read_capture(file: Option<&Path>) -> Result<String, error::Error> {
    match file {
        None => {
            let text = std::io::read_to_string(std::io::stdin())?;
            return Ok(text);
        },
        Some(path) => {
            return std::fs::read_to_string(path).map_err(|_err| {
                return error::Error::CaptureNotFound {
                    path: path.to_path_buf(),
                };
            });
        },
    }
}

/// Resolve a single candidate the way detection would, and report the
/// outcome.
///
/// # Errors
///
/// Returns errors from config loading or the resolver backend.
pub fn resolve(target: &str) -> Result<ExitCode, error::Error> {
    let root = PathBuf::from(".");
    let session = load_session(&root, None)?;
    let local = LocalResolver;

    match local.resolve_link(&session.process, target)? {
        None => {
            eprintln!("Does not resolve: {target}");
            return Ok(ExitCode::from(1));
        },
        Some(found) => {
            let class = session.workspace.classify(&found);
            println!("{}  ({})", found.uri.display(), class.label());
            return Ok(ExitCode::SUCCESS);
        },
    }
}

/// Scan a capture for links and print them.
///
/// # Errors
///
/// Returns errors from config loading, capture reading, or the resolver
/// backend.
pub fn scan(
    file: Option<&Path>,
    json: bool,
    cols_override: Option<usize>,
) -> Result<ExitCode, error::Error> {
    let root = PathBuf::from(".");
    let session = load_session(&root, cols_override)?;
    let capture = read_capture(file)?;
    let lines = buffer::segment(&capture, session.cols);
    let links = detect_all(&session, &lines)?;

    if json {
        print_json(&links);
    } else {
        print_human(&links);
    }

    // Exit code priority: links found (0) over nothing found (1).
    if links.is_empty() {
        return Ok(ExitCode::from(1));
    }
    return Ok(ExitCode::SUCCESS);
}
