//! Session error taxonomy.
//!
//! The surface is deliberately thin: the launcher's only user-visible
//! failure mode is the child's own exit status plus whatever it printed.
//! These variants exist for logging and for the CLI's anyhow context.

use std::io;
use thiserror::Error;

/// Errors raised while setting up or supervising a dev-server session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The dev-server command could not be started at all.
    #[error("failed to spawn dev server command: {source}")]
    Spawn {
        #[source]
        source: io::Error,
    },

    /// Waiting on the child process failed (reaping error, not a non-zero exit).
    #[error("failed waiting for dev server: {source}")]
    Wait {
        #[source]
        source: io::Error,
    },

    /// The browser launcher process could not be started.
    /// Callers treat this as best-effort and log it instead of aborting.
    #[error("failed to open browser: {source}")]
    Browser {
        #[source]
        source: io::Error,
    },
}
