//! `devup config` – show the effective configuration and where it lives.

use anyhow::Result;
use devup_core::config::{self, SessionConfig};

pub fn run_config(init: bool) -> Result<()> {
    let path = config::config_path()?;
    if init || path.exists() {
        let cfg = config::load_or_init()?;
        println!("# {}", path.display());
        print!("{}", toml::to_string_pretty(&cfg)?);
    } else {
        let cfg = SessionConfig::default();
        println!("# {} (not written; pass --init to create it)", path.display());
        print!("{}", toml::to_string_pretty(&cfg)?);
    }
    Ok(())
}
