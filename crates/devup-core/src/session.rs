//! Session orchestration: spawn the dev server, wait, open the browser,
//! then supervise until natural exit or interrupt.
//!
//! The sequence is deliberately linear (spawn → wait → open → supervise);
//! the only race the session manages is the user interrupt, which is live
//! from the moment the child is spawned.

use std::future::Future;

use crate::browser::BrowserOpener;
use crate::error::SessionError;
use crate::process::{ServerHandle, ServerSpawner};
use crate::readiness::{wait_until_ready, Clock, WaitPolicy};

/// Resolved inputs for one session (config merged with CLI flags).
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub command: String,
    pub args: Vec<String>,
    pub url: String,
    pub wait: WaitPolicy,
    pub open_browser: bool,
}

/// How the session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOutcome {
    /// The child's exit code, which becomes the launcher's own exit code.
    pub exit_code: i32,
    /// True when the session ended via the interrupt path.
    pub interrupted: bool,
}

/// One interactive dev-server session.
pub struct Session<S, B, C> {
    spawner: S,
    browser: B,
    clock: C,
    settings: SessionSettings,
}

impl<S, B, C> Session<S, B, C>
where
    S: ServerSpawner,
    B: BrowserOpener,
    C: Clock,
{
    pub fn new(spawner: S, browser: B, clock: C, settings: SessionSettings) -> Self {
        Self {
            spawner,
            browser,
            clock,
            settings,
        }
    }

    /// Run the session to completion. `interrupt` resolves when the user
    /// asks to stop (Ctrl-C in production, a channel in tests); it is armed
    /// before the wait step so cleanup covers the whole child lifetime.
    pub async fn run<F>(&self, interrupt: F) -> Result<SessionOutcome, SessionError>
    where
        F: Future<Output = ()>,
    {
        let mut handle = self
            .spawner
            .spawn(&self.settings.command, &self.settings.args)?;
        tokio::pin!(interrupt);

        tokio::select! {
            _ = wait_until_ready(&self.settings.wait, &self.clock) => {}
            _ = &mut interrupt => {
                return self.shutdown(&mut handle).await;
            }
        }

        if self.settings.open_browser {
            if let Err(err) = self.browser.open(&self.settings.url) {
                tracing::warn!(%err, url = %self.settings.url, "could not open browser");
            }
        }

        tokio::select! {
            exit = handle.wait() => {
                let exit = exit?;
                tracing::info!(code = exit.code, "dev server exited");
                Ok(SessionOutcome { exit_code: exit.code, interrupted: false })
            }
            _ = &mut interrupt => self.shutdown(&mut handle).await,
        }
    }

    async fn shutdown(&self, handle: &mut S::Handle) -> Result<SessionOutcome, SessionError> {
        tracing::info!("interrupt received, stopping dev server");
        let exit = handle.terminate().await?;
        Ok(SessionOutcome {
            exit_code: exit.code,
            interrupted: true,
        })
    }
}
