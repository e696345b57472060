//! `devup open` – open the dev-server URL in the default browser.

use anyhow::Result;
use devup_core::browser::{BrowserOpener, SystemBrowser};
use devup_core::config::SessionConfig;

pub fn run_open(cfg: &SessionConfig, url: Option<&str>) -> Result<()> {
    let url = url.unwrap_or(&cfg.url);
    SystemBrowser.open(url)?;
    println!("Opened {url}");
    Ok(())
}
