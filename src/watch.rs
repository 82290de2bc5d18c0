//! File watcher: scans a capture on startup, then re-scans on changes.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use notify::{RecursiveMode, Watcher as _};

use crate::commands;
use crate::error;

/// Debounce delay between filesystem events and re-scan.
const DEBOUNCE_MS: u64 = 100;

/// Create a filesystem watcher that sends events on the given channel.
///
/// # Errors
///
/// Returns an error if the watcher cannot be created.
fn create_watcher(
    tx: crossbeam_channel::Sender<()>,
) -> Result<notify::RecommendedWatcher, error::Error> {
    return notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
        if let Ok(event) = res
            && matches!(
                event.kind,
                notify::EventKind::Create(_)
                    | notify::EventKind::Modify(_)
                    | notify::EventKind::Remove(_)
            )
        {
            let _ = tx.send(());
        }
    })
    .map_err(|e| {
        return error::Error::WatchSetup {
            reason: format!("watcher setup failed: {e}"),
        };
    });
}

/// Entry point for the watch command.
///
/// Runs an initial scan, then watches the capture's directory and
/// re-scans on changes.
///
/// # Errors
///
/// Returns errors from watcher setup.
pub fn run(file: &Path, cols: Option<usize>) -> Result<ExitCode, error::Error> {
    eprintln!("watch: initial scan");
    let mut last_code = run_scan(file, cols);

    let dir = watch_dir(file);
    if !dir.exists() {
        return Err(error::Error::WatchSetup {
            reason: format!("directory {} does not exist", dir.display()),
        });
    }

    let (tx, rx) = crossbeam_channel::unbounded();
    let mut watcher = create_watcher(tx)?;
    watcher
        .watch(&dir, RecursiveMode::NonRecursive)
        .map_err(|e| {
            return error::Error::WatchSetup {
                reason: format!("cannot watch {}: {e}", dir.display()),
            };
        })?;

    eprintln!(
        "watch: monitoring {}, press Ctrl+C to stop",
        dir.display()
    );

    while rx.recv().is_ok() {
        let debounce = Duration::from_millis(DEBOUNCE_MS);
        while rx.recv_timeout(debounce).is_ok() {}
        eprintln!("watch: change detected, re-scanning...");
        last_code = run_scan(file, cols);
    }

    return Ok(last_code);
}

/// Run scan once and print results. Returns the exit code from scan.
fn run_scan(file: &Path, cols: Option<usize>) -> ExitCode {
    return match commands::scan(Some(file), false, cols) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(2_u8)
        },
    };
}

/// Directory to monitor for changes to `file`.
fn watch_dir(file: &Path) -> PathBuf {
    let Some(parent) = file.parent() else {
        return PathBuf::from(".");
    };
    if parent.as_os_str().is_empty() {
        return PathBuf::from(".");
    }
    return parent.to_path_buf();
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;

    #[test]
    fn watch_dir_is_the_parent() {
        assert_eq!(
            watch_dir(Path::new("/var/log/build.log")),
            PathBuf::from("/var/log")
        );
    }

    #[test]
    fn bare_file_name_watches_cwd() {
        assert_eq!(watch_dir(Path::new("build.log")), PathBuf::from("."));
    }

    #[test]
    fn root_path_watches_cwd() {
        assert_eq!(watch_dir(Path::new("/")), PathBuf::from("."));
    }
}
