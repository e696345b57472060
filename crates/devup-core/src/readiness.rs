//! Wait-before-open policy: fixed startup delay or TCP readiness probe.
//!
//! The fixed delay is the historical behavior and the default. The probe
//! polls the server's listening socket instead; it gives up after its
//! overall timeout and lets the session proceed, since the browser-open
//! step is best-effort either way.

use async_trait::async_trait;
use std::time::Duration;
use tokio::net::TcpStream;

use crate::config::SessionConfig;

/// Sleep seam so tests can observe delays instead of serving them.
#[async_trait]
pub trait Clock: Send + Sync {
    async fn sleep(&self, dur: Duration);
}

/// Real clock over `tokio::time`.
pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    async fn sleep(&self, dur: Duration) {
        tokio::time::sleep(dur).await;
    }
}

/// How the session decides the server is ready for the browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaitPolicy {
    /// Sleep a fixed duration, then proceed.
    FixedDelay(Duration),
    /// Poll `127.0.0.1:port` until it accepts a connection, sleeping
    /// `interval` between attempts, for at most `timeout` overall.
    ProbeTcp {
        port: u16,
        interval: Duration,
        timeout: Duration,
    },
}

impl WaitPolicy {
    /// Derive the policy from config: probe when a `[readiness]` section is
    /// present, fixed delay otherwise.
    pub fn from_config(cfg: &SessionConfig) -> Self {
        match &cfg.readiness {
            Some(probe) => WaitPolicy::ProbeTcp {
                port: probe.port,
                interval: Duration::from_millis(probe.interval_ms),
                timeout: Duration::from_millis(probe.timeout_ms),
            },
            None => WaitPolicy::FixedDelay(Duration::from_millis(cfg.startup_delay_ms)),
        }
    }
}

/// Apply the wait policy. Returns `true` if the server was confirmed
/// listening, `false` if we only waited (fixed delay) or gave up probing.
pub async fn wait_until_ready<C: Clock + ?Sized>(policy: &WaitPolicy, clock: &C) -> bool {
    match policy {
        WaitPolicy::FixedDelay(delay) => {
            if !delay.is_zero() {
                clock.sleep(*delay).await;
            }
            false
        }
        WaitPolicy::ProbeTcp {
            port,
            interval,
            timeout,
        } => {
            let interval = (*interval).max(Duration::from_millis(1));
            // Attempt-bounded so an injected clock keeps the loop deterministic.
            let attempts = (timeout.as_millis() / interval.as_millis()).max(1) as u64;
            for attempt in 1..=attempts {
                let connect = TcpStream::connect(("127.0.0.1", *port));
                if let Ok(Ok(_stream)) = tokio::time::timeout(interval, connect).await {
                    tracing::debug!(port, attempt, "dev server port is accepting connections");
                    return true;
                }
                // No point sleeping once the last attempt has failed.
                if attempt < attempts {
                    clock.sleep(interval).await;
                }
            }
            tracing::warn!(
                port = *port,
                "dev server port never became reachable, opening browser anyway"
            );
            false
        }
    }
}
