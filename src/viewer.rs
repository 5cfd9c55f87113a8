use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{Error, Result};

/// Names a viewer program that replaces the platform defaults. It is run
/// with the figure path as its only argument and must not exit before the
/// figure is closed.
pub const VIEWER_ENV: &str = "BENCH_PLOT_VIEWER";

/// Viewers that stay in the foreground until their window is closed, tried
/// in order. `xdg-open` is the last resort: most desktops hand the file to
/// a running viewer and return at once.
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const UNIX_VIEWERS: [&str; 4] = ["feh", "display", "eog", "xdg-open"];

/// Open `path` in an image viewer and wait for it to be closed.
///
/// Candidates that are not installed are skipped. A viewer that starts and
/// exits unsuccessfully ends the search with an error.
pub fn open_blocking(path: &Path) -> Result<()> {
    open_with(path, viewer_commands(path, std::env::var_os(VIEWER_ENV)))
}

fn open_with(path: &Path, commands: Vec<Command>) -> Result<()> {
    for mut command in commands {
        log::debug!("opening figure with {:?}", command);

        match command.status() {
            Ok(status) if status.success() => {
                if command.get_program() == "xdg-open" {
                    log::warn!("xdg-open may return before the viewer is closed");
                }
                return Ok(());
            }
            Ok(status) => {
                return Err(Error::Render(format!(
                    "viewer {:?} for {} exited with {status}",
                    command.get_program(),
                    path.display()
                )))
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::debug!("{:?} is not installed", command.get_program());
            }
            Err(source) => {
                return Err(Error::Io {
                    path: PathBuf::from(command.get_program()),
                    source,
                })
            }
        }
    }

    Err(Error::NoViewer {
        path: path.to_path_buf(),
    })
}

/// The commands to try for `path`. A non-empty `custom` viewer replaces the
/// platform list.
fn viewer_commands(path: &Path, custom: Option<OsString>) -> Vec<Command> {
    match custom.filter(|program| !program.is_empty()) {
        Some(program) => {
            let mut command = Command::new(program);
            command.arg(path);
            vec![command]
        }
        None => platform_commands(path),
    }
}

#[cfg(target_os = "macos")]
fn platform_commands(path: &Path) -> Vec<Command> {
    let mut command = Command::new("open");
    command.arg("-W").arg(path);
    vec![command]
}

#[cfg(target_os = "windows")]
fn platform_commands(path: &Path) -> Vec<Command> {
    let mut command = Command::new("cmd");
    command.args(["/C", "start", "/WAIT", ""]).arg(path);
    vec![command]
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn platform_commands(path: &Path) -> Vec<Command> {
    UNIX_VIEWERS
        .iter()
        .map(|program| {
            let mut command = Command::new(program);
            command.arg(path);
            command
        })
        .collect()
}
