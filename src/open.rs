// src/open.rs

use std::{
    io,
    path::Path,
    process::{Command, Stdio},
};
use tracing::{debug, info, warn};

/// What to do with the finished report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpenResult {
    /// Hand the file to the desktop's default viewer.
    #[default]
    Desktop,
    /// Leave the file where it is.
    Disabled,
}

impl OpenResult {
    /// Opens `path` according to `self`. Never fails the run: the report is
    /// already on disk, so a viewer that will not start is only logged.
    pub fn open(self, path: &Path) {
        match self {
            OpenResult::Disabled => debug!("not opening {}", path.display()),
            OpenResult::Desktop => match launch(path) {
                Ok(true) => info!("opened {}", path.display()),
                Ok(false) => debug!("no desktop opener on this platform"),
                Err(e) => warn!("could not open {}: {}", path.display(), e),
            },
        }
    }
}

/// Spawns the platform opener without waiting on it. `Ok(false)` when the
/// platform has none.
fn launch(path: &Path) -> io::Result<bool> {
    let Some(mut cmd) = opener_command(path) else {
        return Ok(false);
    };
    cmd.stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    Ok(true)
}

#[cfg(target_os = "windows")]
fn opener_command(path: &Path) -> Option<Command> {
    let mut cmd = Command::new("cmd");
    // empty title: `start` treats the first quoted argument as one
    cmd.args(["/C", "start", ""]).arg(path);
    Some(cmd)
}

#[cfg(target_os = "macos")]
fn opener_command(path: &Path) -> Option<Command> {
    let mut cmd = Command::new("open");
    cmd.arg(path);
    Some(cmd)
}

#[cfg(any(
    target_os = "linux",
    target_os = "freebsd",
    target_os = "openbsd",
    target_os = "netbsd",
    target_os = "dragonfly"
))]
fn opener_command(path: &Path) -> Option<Command> {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(path);
    Some(cmd)
}

#[cfg(not(any(
    target_os = "windows",
    target_os = "macos",
    target_os = "linux",
    target_os = "freebsd",
    target_os = "openbsd",
    target_os = "netbsd",
    target_os = "dragonfly"
)))]
fn opener_command(_path: &Path) -> Option<Command> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_opens_on_desktop() {
        assert_eq!(OpenResult::default(), OpenResult::Desktop);
    }

    #[test]
    fn test_disabled_is_noop() {
        // must not touch the path at all
        OpenResult::Disabled.open(Path::new("/definitely/not/here.xlsx"));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_linux_uses_xdg_open() {
        let cmd = opener_command(Path::new("report.xlsx")).expect("linux has an opener");
        assert_eq!(cmd.get_program(), "xdg-open");
        assert_eq!(cmd.get_args().collect::<Vec<_>>(), ["report.xlsx"]);
    }
}
