//! The `info` command: a reference document for humans and agents.

use std::path::PathBuf;

use serde::Serialize;

use crate::config;

/// Output the comprehensive termlinks reference document.
pub fn run(json: bool) {
    let root = PathBuf::from(".");
    let state = gather_state(&root);

    if json {
        print_json(&state);
    } else {
        print_markdown(&state);
    }
    return;
}

// ── State gathering ───────────────────────────────────────────────────

/// Effective settings in the current directory.
struct CurrentState {
    /// Viewport width in effect.
    cols: usize,
    /// Whether a config file exists here.
    config_found: bool,
    /// Configured workspace roots, as written.
    workspace: Vec<String>,
}

/// Read config state, falling back to defaults on any problem.
fn gather_state(root: &std::path::Path) -> CurrentState {
    let config_found = root.join(".termlinks.toml").exists();
    let config = config::Config::load(root).ok();
    let cols = config
        .as_ref()
        .map_or(config::DEFAULT_COLS, |c| return c.cols());
    let workspace = config
        .as_ref()
        .map(|c| {
            return c
                .workspace()
                .iter()
                .map(|p| return p.display().to_string())
                .collect();
        })
        .unwrap_or_default();
    return CurrentState {
        cols,
        config_found,
        workspace,
    };
}

// ── Markdown output ───────────────────────────────────────────────────

/// Print the full markdown document.
fn print_markdown(state: &CurrentState) {
    let version = env!("CARGO_PKG_VERSION");
    print_markdown_header(version);
    print_markdown_state(state);
    println!();
    print_markdown_exit_codes();
    return;
}

/// The exit code table.
fn print_markdown_exit_codes() {
    print!(
        "\
## Exit Codes

| Code | Meaning |
|------|---------|
| 0    | Links found / success |
| 1    | No links found / does not resolve |
| 2    | Runtime error |
"
    );
    return;
}

/// Everything above the current-state section.
fn print_markdown_header(version: &str) {
    print!(
        "\
# termlinks {version}

Find file links in captured terminal output, even when the path and the
line number are on different lines.

## Recognized Output Shapes

Line-prefix listings, where a path heading is followed by rows that open
with `line:col`:

    src/app.ts
      12:4  error  no-unused-vars

Unified diff hunks, where `@@ ... @@` headers follow a `+++ b/` row:

    +++ b/src/app.ts
    @@ -8,11 +8,12 @@

## Workflow

    termlinks scan [FILE]              Detect links in a capture (exit 0/1)
    termlinks scan --json              Machine-readable link list
    termlinks resolve <text>           Check how one candidate resolves
    termlinks watch <FILE>             Re-scan whenever the capture changes
    termlinks workspace add <path>     Classify folders under <path> as in-workspace
    termlinks workspace list           Show configured roots
    termlinks workspace remove <path>  Remove a root

## Configuration (.termlinks.toml)

    cols = 120                         # viewport width used to wrap captures
    cwd = \"/home/user/project\"         # session cwd for relative paths
    max_line_length = 2000             # skip longer flattened lines
    max_link_length = 1024             # skip longer link candidates
    workspace = [\"src\", \"docs\"]        # roots for folder classification

## Current State

"
    );
    return;
}

/// The current-state lines.
fn print_markdown_state(state: &CurrentState) {
    if state.config_found {
        println!("Config:     .termlinks.toml (found)");
    } else {
        println!("Config:     .termlinks.toml (not found)");
    }

    println!("Columns:    {}", state.cols);

    if state.workspace.is_empty() {
        println!("Workspace:  (none)");
    } else {
        println!("Workspace:  {}", state.workspace.join(", "));
    }
    return;
}

// ── JSON output ───────────────────────────────────────────────────────

/// One exit code row.
#[derive(Serialize)]
struct ExitCodeInfo {
    /// Numeric exit code.
    code: u8,
    /// What the code signals.
    meaning: String,
}

/// Top-level JSON document.
#[derive(Serialize)]
struct InfoJson {
    /// Effective settings here.
    current_state: StateJson,
    /// Exit code table.
    exit_codes: Vec<ExitCodeInfo>,
    /// Output shapes detection understands.
    recognized_shapes: Vec<ShapeInfo>,
    /// Crate version.
    version: String,
}

/// One recognized output shape.
#[derive(Serialize)]
struct ShapeInfo {
    /// What the shape looks like in the wild.
    description: String,
    /// A minimal capture exhibiting it.
    example: String,
}

/// JSON mirror of [`CurrentState`].
#[derive(Serialize)]
struct StateJson {
    /// Viewport width in effect.
    cols: usize,
    /// Whether a config file exists here.
    config_found: bool,
    /// Configured workspace roots.
    workspace: Vec<String>,
}

/// Print the document as pretty JSON.
fn print_json(state: &CurrentState) {
    let info = InfoJson {
        current_state: StateJson {
            cols: state.cols,
            config_found: state.config_found,
            workspace: state.workspace.clone(),
        },
        exit_codes: vec![
            ExitCodeInfo {
                code: 0,
                meaning: "Links found / success".to_string(),
            },
            ExitCodeInfo {
                code: 1,
                meaning: "No links found / does not resolve".to_string(),
            },
            ExitCodeInfo {
                code: 2,
                meaning: "Runtime error".to_string(),
            },
        ],
        recognized_shapes: vec![
            ShapeInfo {
                description: "Line-prefix listing: a path heading followed by rows opening with line:col".to_string(),
                example: "src/app.ts\n  12:4  error  no-unused-vars".to_string(),
            },
            ShapeInfo {
                description: "Unified diff hunk: @@ headers after a +++ b/ row".to_string(),
                example: "+++ b/src/app.ts\n@@ -8,11 +8,12 @@".to_string(),
            },
        ],
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    // serde_json::to_string_pretty won't fail on this structure.
    let json = serde_json::to_string_pretty(&info).unwrap_or_default();
    println!("{json}");
    return;
}
