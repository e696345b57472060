//! CLI for the devup dev-session launcher.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use devup_core::config;

use commands::{run_config, run_open, run_session};

/// Top-level CLI for the devup dev-session launcher.
#[derive(Debug, Parser)]
#[command(name = "devup")]
#[command(about = "devup: launch and supervise a local dev-server session", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Start the dev server, open the browser, and supervise it until it
    /// exits or Ctrl-C is pressed.
    Run {
        /// Command that starts the dev server (overrides config).
        #[arg(long)]
        command: Option<String>,

        /// Argument for the dev-server command; repeatable. Replaces the
        /// configured args when given at least once. Values may themselves
        /// look like flags (e.g. `--arg --no-cache`).
        #[arg(long = "arg", value_name = "ARG", allow_hyphen_values = true)]
        args: Vec<String>,

        /// URL to open once the server is up (overrides config).
        #[arg(long)]
        url: Option<String>,

        /// Fixed delay before opening the browser, in milliseconds.
        #[arg(long, value_name = "MS")]
        delay_ms: Option<u64>,

        /// Poll this TCP port for readiness instead of sleeping a fixed delay.
        #[arg(long, value_name = "PORT")]
        wait_port: Option<u16>,

        /// Do not open a browser.
        #[arg(long)]
        no_browser: bool,
    },

    /// Open the configured (or given) URL in the default browser.
    Open {
        /// URL to open (defaults to the configured one).
        url: Option<String>,
    },

    /// Show the effective configuration and where it lives.
    Config {
        /// Write the default config file if none exists yet.
        #[arg(long)]
        init: bool,
    },
}

impl CliCommand {
    /// Parse args, dispatch, and return the process exit code.
    pub async fn run_from_args() -> Result<i32> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Run {
                command,
                args,
                url,
                delay_ms,
                wait_port,
                no_browser,
            } => {
                let cfg = config::load_or_init()?;
                tracing::debug!("loaded config: {:?}", cfg);
                run_session(cfg, command, args, url, delay_ms, wait_port, no_browser).await
            }
            CliCommand::Open { url } => {
                let cfg = config::load_or_init()?;
                run_open(&cfg, url.as_deref())?;
                Ok(0)
            }
            CliCommand::Config { init } => {
                run_config(init)?;
                Ok(0)
            }
        }
    }
}

#[cfg(test)]
mod tests;
