//! Child-process seam: spawning and supervising the dev-server command.
//!
//! The session talks to the child through the [`ServerSpawner`] and
//! [`ServerHandle`] traits so tests can substitute a scripted child.

use async_trait::async_trait;
use std::process::ExitStatus;
use std::time::Duration;
use tokio::process::{Child, Command};

use crate::error::SessionError;

/// How long to wait after SIGTERM before force-killing the child.
const TERM_GRACE: Duration = Duration::from_secs(5);

/// Final status of a supervised child, reduced to a process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerExit {
    pub code: i32,
}

impl ServerExit {
    /// Map an OS exit status to a launcher exit code. A signal-terminated
    /// child becomes `128 + signo` on Unix (shell convention).
    pub fn from_status(status: ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return Self { code };
        }
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return Self { code: 128 + signal };
            }
        }
        Self { code: 1 }
    }
}

/// A running dev-server child.
#[async_trait]
pub trait ServerHandle: Send {
    /// OS process id, if the child has not been reaped yet.
    fn id(&self) -> Option<u32>;

    /// Wait until the child exits naturally. Cancel-safe: dropping the
    /// returned future does not lose the child.
    async fn wait(&mut self) -> Result<ServerExit, SessionError>;

    /// Terminate the child and reap it, returning the resulting status.
    async fn terminate(&mut self) -> Result<ServerExit, SessionError>;
}

/// Starts the dev-server command.
pub trait ServerSpawner {
    type Handle: ServerHandle;

    fn spawn(&self, command: &str, args: &[String]) -> Result<Self::Handle, SessionError>;
}

/// Real spawner over `tokio::process`.
///
/// Stdio is inherited: the child's output is the session's only diagnostic
/// channel and the launcher stays out of it. On Unix the child gets its own
/// process group so termination reaches whatever grandchildren the dev
/// server forks.
pub struct SystemSpawner;

impl ServerSpawner for SystemSpawner {
    type Handle = SpawnedServer;

    fn spawn(&self, command: &str, args: &[String]) -> Result<SpawnedServer, SessionError> {
        let mut cmd = Command::new(command);
        cmd.args(args).kill_on_drop(true);
        #[cfg(unix)]
        cmd.process_group(0);

        let child = cmd.spawn().map_err(|source| SessionError::Spawn { source })?;
        tracing::debug!(pid = ?child.id(), command, "spawned dev server");
        Ok(SpawnedServer { child })
    }
}

/// Handle over a child spawned by [`SystemSpawner`].
pub struct SpawnedServer {
    child: Child,
}

#[async_trait]
impl ServerHandle for SpawnedServer {
    fn id(&self) -> Option<u32> {
        self.child.id()
    }

    async fn wait(&mut self) -> Result<ServerExit, SessionError> {
        let status = self
            .child
            .wait()
            .await
            .map_err(|source| SessionError::Wait { source })?;
        Ok(ServerExit::from_status(status))
    }

    async fn terminate(&mut self) -> Result<ServerExit, SessionError> {
        #[cfg(unix)]
        {
            if let Some(pid) = self.child.id() {
                use nix::sys::signal::{killpg, Signal};
                use nix::unistd::Pid;

                tracing::info!(pid, "sending SIGTERM to dev server process group");
                if let Err(err) = killpg(Pid::from_raw(pid as i32), Signal::SIGTERM) {
                    tracing::warn!(pid, %err, "SIGTERM failed, killing child directly");
                    self.child
                        .kill()
                        .await
                        .map_err(|source| SessionError::Wait { source })?;
                }
            }

            match tokio::time::timeout(TERM_GRACE, self.child.wait()).await {
                Ok(status) => {
                    let status = status.map_err(|source| SessionError::Wait { source })?;
                    return Ok(ServerExit::from_status(status));
                }
                Err(_elapsed) => {
                    tracing::warn!("dev server ignored SIGTERM for {TERM_GRACE:?}, killing");
                    self.child
                        .kill()
                        .await
                        .map_err(|source| SessionError::Wait { source })?;
                }
            }
        }

        #[cfg(not(unix))]
        {
            self.child
                .kill()
                .await
                .map_err(|source| SessionError::Wait { source })?;
        }

        let status = self
            .child
            .wait()
            .await
            .map_err(|source| SessionError::Wait { source })?;
        Ok(ServerExit::from_status(status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_code_passthrough() {
        // `true`/`false` style statuses via a real shell exit.
        let status = std::process::Command::new("sh")
            .args(["-c", "exit 7"])
            .status()
            .unwrap();
        assert_eq!(ServerExit::from_status(status).code, 7);
    }

    #[tokio::test]
    async fn wait_returns_child_exit_code() {
        let mut handle = SystemSpawner
            .spawn("sh", &["-c".into(), "exit 3".into()])
            .unwrap();
        let exit = handle.wait().await.unwrap();
        assert_eq!(exit.code, 3);
    }

    #[tokio::test]
    async fn spawn_missing_command_is_spawn_error() {
        let err = SystemSpawner
            .spawn("devup-test-no-such-binary", &[])
            .err()
            .unwrap();
        assert!(matches!(err, SessionError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn terminate_maps_sigterm_to_143() {
        let mut handle = SystemSpawner
            .spawn("sh", &["-c".into(), "sleep 30".into()])
            .unwrap();
        let exit = handle.terminate().await.unwrap();
        assert_eq!(exit.code, 128 + 15);
    }
}
