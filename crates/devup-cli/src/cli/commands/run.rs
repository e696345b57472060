//! `devup run` – start and supervise a dev-server session.

use anyhow::Result;
use devup_core::browser::SystemBrowser;
use devup_core::config::{ReadinessConfig, SessionConfig};
use devup_core::process::SystemSpawner;
use devup_core::readiness::{TokioClock, WaitPolicy};
use devup_core::session::{Session, SessionSettings};

#[allow(clippy::too_many_arguments)]
pub async fn run_session(
    mut cfg: SessionConfig,
    command: Option<String>,
    args: Vec<String>,
    url: Option<String>,
    delay_ms: Option<u64>,
    wait_port: Option<u16>,
    no_browser: bool,
) -> Result<i32> {
    // CLI flags override the loaded config.
    if let Some(command) = command {
        cfg.command = command;
    }
    if !args.is_empty() {
        cfg.args = args;
    }
    if let Some(url) = url {
        cfg.url = url;
    }
    if let Some(ms) = delay_ms {
        cfg.startup_delay_ms = ms;
        cfg.readiness = None;
    }
    if let Some(port) = wait_port {
        cfg.readiness = Some(ReadinessConfig {
            port,
            ..ReadinessConfig::default()
        });
    }

    let settings = SessionSettings {
        command: cfg.command.clone(),
        args: cfg.args.clone(),
        url: cfg.url.clone(),
        wait: WaitPolicy::from_config(&cfg),
        open_browser: !no_browser,
    };

    tracing::info!(command = %settings.command, url = %settings.url, "starting dev session");
    let session = Session::new(SystemSpawner, SystemBrowser, TokioClock, settings);
    let outcome = session
        .run(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    if outcome.interrupted {
        tracing::info!(code = outcome.exit_code, "session interrupted, dev server stopped");
    } else {
        tracing::info!(code = outcome.exit_code, "session ended");
    }
    Ok(outcome.exit_code)
}
