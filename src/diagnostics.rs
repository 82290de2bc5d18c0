//! Markdown diagnostics for CLI errors.

use crate::error::Error;

/// ANSI bold escape for headings.
const BOLD: &str = "\x1b[1m";
/// ANSI reset escape.
const RESET: &str = "\x1b[0m";

/// Render an error as valid markdown with bold headings and print to
/// stderr.
pub fn print_error(e: &Error) {
    let md = render_error(e);
    for line in md.lines() {
        if line.starts_with('#') {
            eprintln!("{BOLD}{line}{RESET}");
        } else {
            eprintln!("{line}");
        }
    }
    return;
}

/// `Error::CaptureNotFound` block.
fn render_capture_not_found(path: &std::path::Path) -> String {
    return format!(
        "\
# Error: Capture Not Found

`{}` does not exist.

## Fix

Pass a readable capture file, or pipe terminal output on stdin:

    some-command | termlinks scan
",
        path.display()
    );
}

/// `Error::ConfigParse` block.
fn render_config_parse(path: &std::path::Path, reason: &str) -> String {
    return format!(
        "\
# Error: Config Invalid

`{}`: {reason}

## Fix

Repair the entry in `.termlinks.toml`.
",
        path.display()
    );
}

/// Render an error as a structured markdown diagnostic.
///
/// Each variant produces a block with what happened and how to fix it.
/// Designed to be readable by both humans and LLM agents.
pub fn render_error(e: &Error) -> String {
    match e {
        Error::CaptureNotFound { path } => return render_capture_not_found(path),
        Error::ConfigParse { path, reason } => return render_config_parse(path, reason),
        Error::ResolverFault { reason, text } => return render_resolver_fault(reason, text),
        Error::UnknownWorkspaceRoot { path } => return render_unknown_workspace_root(path),
        Error::WatchSetup { reason } => return render_watch_setup(reason),
        _ => return render_generic(e),
    }
}

/// Variants without a dedicated fix section.
fn render_generic(e: &Error) -> String {
    match e {
        Error::Io(inner) => {
            return format!(
                "\
# Error: I/O

{inner}
"
            );
        },
        Error::TomlDe(inner) => {
            return format!(
                "\
# Error: Invalid TOML

{inner}
"
            );
        },
        // Already handled in render_error, but need exhaustive match.
        _ => {
            return format!(
                "\
# Error

{e}
"
            );
        },
    }
}

/// `Error::ResolverFault` block.
fn render_resolver_fault(reason: &str, text: &str) -> String {
    return format!(
        "\
# Error: Resolver Fault

Resolving `{text}` failed: {reason}
"
    );
}

/// `Error::UnknownWorkspaceRoot` block.
fn render_unknown_workspace_root(path: &str) -> String {
    return format!(
        "\
# Error: Unknown Workspace Root

`{path}` is not a configured workspace root.

## Fix

List the configured roots:

    termlinks workspace list
"
    );
}

/// `Error::WatchSetup` block.
fn render_watch_setup(reason: &str) -> String {
    return format!(
        "\
# Error: Watch Setup

{reason}
"
    );
}
