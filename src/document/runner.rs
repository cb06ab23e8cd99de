//! External process execution with a wall-clock timeout.
//!
//! [`CommandRunner`] is the seam between the compiler orchestrator and the
//! operating system. [`SystemRunner`] spawns real processes; tests plug in a
//! scripted runner instead.

use std::io;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::process::Command;

/// A fully resolved process invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub current_dir: Option<PathBuf>,
}

impl Invocation {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            current_dir: None,
        }
    }

    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    pub fn is_version_probe(&self) -> bool {
        self.args.len() == 1 && self.args[0] == "--version"
    }
}

/// Captured result of a process that ran to completion.
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was terminated by a signal.
    pub code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    pub fn stderr_text(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }

    pub fn stdout_text(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }
}

/// Errors raised before a process could report an exit status.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("executable '{0}' not found")]
    NotFound(String),
    #[error("failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("'{program}' timed out after {}s", .timeout.as_secs())]
    TimedOut { program: String, timeout: Duration },
}

/// Runs external commands.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `invocation` to completion, or fail once `timeout` elapses.
    async fn run(&self, invocation: &Invocation, timeout: Duration)
        -> Result<CommandOutput, RunError>;
}

/// Runner backed by `tokio::process`.
///
/// Children are spawned with `kill_on_drop`, so a process whose wait is
/// abandoned by the timeout is killed rather than left running.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(
        &self,
        invocation: &Invocation,
        timeout: Duration,
    ) -> Result<CommandOutput, RunError> {
        let mut command = Command::new(&invocation.program);
        command
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        if let Some(dir) = &invocation.current_dir {
            command.current_dir(dir);
        }

        let child = command.spawn().map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => RunError::NotFound(invocation.program.clone()),
            _ => RunError::Spawn {
                program: invocation.program.clone(),
                source: e,
            },
        })?;

        match tokio::time::timeout(timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => Ok(CommandOutput {
                code: output.status.code(),
                stdout: output.stdout,
                stderr: output.stderr,
            }),
            Ok(Err(e)) => Err(RunError::Spawn {
                program: invocation.program.clone(),
                source: e,
            }),
            Err(_) => Err(RunError::TimedOut {
                program: invocation.program.clone(),
                timeout,
            }),
        }
    }
}
