//! Browser-open seam: hand a URL to the platform's default browser.

use std::process::{Command, Stdio};

use crate::error::SessionError;

/// Opens a URL in the user's default browser.
pub trait BrowserOpener {
    fn open(&self, url: &str) -> Result<(), SessionError>;
}

/// Real opener: spawns the platform launcher detached, with null stdio so
/// it cannot interleave with the dev server's console output. The launcher
/// process is not waited on.
pub struct SystemBrowser;

impl SystemBrowser {
    fn launcher(url: &str) -> Command {
        #[cfg(target_os = "macos")]
        {
            let mut cmd = Command::new("open");
            cmd.arg(url);
            cmd
        }
        #[cfg(target_os = "windows")]
        {
            let mut cmd = Command::new("cmd");
            // Empty title argument so `start` treats the URL as the target.
            cmd.args(["/C", "start", "", url]);
            cmd
        }
        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(url);
            cmd
        }
    }
}

impl BrowserOpener for SystemBrowser {
    fn open(&self, url: &str) -> Result<(), SessionError> {
        tracing::info!(url, "opening browser");
        Self::launcher(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(drop)
            .map_err(|source| SessionError::Browser { source })
    }
}
