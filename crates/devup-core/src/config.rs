use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Optional TCP readiness probe (section `[readiness]` in config.toml).
/// When present, the launcher polls the server's port instead of sleeping
/// a fixed duration before opening the browser.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessConfig {
    /// Port on 127.0.0.1 to probe.
    pub port: u16,
    /// Interval between probe attempts, in milliseconds.
    pub interval_ms: u64,
    /// Give up probing after this long and open the browser anyway.
    pub timeout_ms: u64,
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        Self {
            port: 3333,
            interval_ms: 250,
            timeout_ms: 15_000,
        }
    }
}

/// Session configuration loaded from `~/.config/devup/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Program that starts the dev server.
    pub command: String,
    /// Arguments passed to the command.
    pub args: Vec<String>,
    /// URL opened in the default browser once the server is (assumed) up.
    pub url: String,
    /// Fixed delay before the browser-open step, in milliseconds.
    /// Ignored when a `[readiness]` probe is configured.
    pub startup_delay_ms: u64,
    /// Optional readiness probe; if missing, the fixed delay is used.
    #[serde(default)]
    pub readiness: Option<ReadinessConfig>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            command: "npm".to_string(),
            args: vec![
                "run".to_string(),
                "dev".to_string(),
                "--workspace".to_string(),
                "studio".to_string(),
                "--".to_string(),
                "--no-cache".to_string(),
            ],
            url: "http://localhost:3333".to_string(),
            startup_delay_ms: 2_000,
            readiness: None,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("devup")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<SessionConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = SessionConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: SessionConfig = toml::from_str(&data)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = SessionConfig::default();
        assert_eq!(cfg.command, "npm");
        assert_eq!(cfg.url, "http://localhost:3333");
        assert_eq!(cfg.startup_delay_ms, 2_000);
        assert!(cfg.readiness.is_none());
        assert!(cfg.args.contains(&"--no-cache".to_string()));
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = SessionConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: SessionConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.command, cfg.command);
        assert_eq!(parsed.args, cfg.args);
        assert_eq!(parsed.url, cfg.url);
        assert_eq!(parsed.startup_delay_ms, cfg.startup_delay_ms);
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            command = "pnpm"
            args = ["dev"]
            url = "http://localhost:4444"
            startup_delay_ms = 500
        "#;
        let cfg: SessionConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.command, "pnpm");
        assert_eq!(cfg.args, vec!["dev"]);
        assert_eq!(cfg.url, "http://localhost:4444");
        assert_eq!(cfg.startup_delay_ms, 500);
        assert!(cfg.readiness.is_none());
    }

    #[test]
    fn config_toml_readiness_section() {
        let toml = r#"
            command = "npm"
            args = ["run", "dev"]
            url = "http://localhost:3333"
            startup_delay_ms = 2000

            [readiness]
            port = 3333
            interval_ms = 100
            timeout_ms = 5000
        "#;
        let cfg: SessionConfig = toml::from_str(toml).unwrap();
        let probe = cfg.readiness.as_ref().unwrap();
        assert_eq!(probe.port, 3333);
        assert_eq!(probe.interval_ms, 100);
        assert_eq!(probe.timeout_ms, 5000);
    }
}
