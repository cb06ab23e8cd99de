//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use lesson_pdf_server::document::engine::OUTPUT_FILE;
use lesson_pdf_server::document::{CommandOutput, CommandRunner, Invocation, RunError};
use lesson_pdf_server::{AppConfig, AppState};

pub const TEST_SECRET: &str = "test-secret-token";
pub const FAKE_PDF: &[u8] = b"%PDF-1.5\n% fake lesson\n%%EOF\n";

/// What a scripted compiler does when asked to compile.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// Exit 0 and write these bytes as the output PDF.
    WritePdf(Vec<u8>),
    /// Exit 1 with the given stderr.
    Fail(String),
    /// Exceed the run timeout.
    TimeOut,
    /// Exit 0 without producing a PDF.
    NoOutput,
}

/// A `CommandRunner` that never spawns processes.
///
/// Programs registered with [`ScriptedRunner::with`] answer `--version`
/// probes; everything else looks like a missing executable.
#[derive(Default)]
pub struct ScriptedRunner {
    outcomes: HashMap<String, Outcome>,
    calls: Mutex<Vec<Invocation>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, program: &str, outcome: Outcome) -> Self {
        self.outcomes.insert(program.to_string(), outcome);
        self
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().unwrap().clone()
    }

    /// Compile invocations (probes excluded) for `program`.
    pub fn compile_calls(&self, program: &str) -> Vec<Invocation> {
        self.calls()
            .into_iter()
            .filter(|c| c.program == program && !c.is_version_probe())
            .collect()
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(
        &self,
        invocation: &Invocation,
        timeout: Duration,
    ) -> Result<CommandOutput, RunError> {
        self.calls.lock().unwrap().push(invocation.clone());

        let Some(outcome) = self.outcomes.get(&invocation.program) else {
            return Err(RunError::NotFound(invocation.program.clone()));
        };

        if invocation.is_version_probe() {
            return Ok(CommandOutput {
                code: Some(0),
                stdout: format!("{} 1.0", invocation.program).into_bytes(),
                stderr: Vec::new(),
            });
        }

        match outcome {
            Outcome::WritePdf(bytes) => {
                let dir = invocation
                    .current_dir
                    .as_ref()
                    .expect("compile invocations run inside the work directory");
                std::fs::write(dir.join(OUTPUT_FILE), bytes).unwrap();
                Ok(CommandOutput {
                    code: Some(0),
                    ..Default::default()
                })
            }
            Outcome::Fail(stderr) => Ok(CommandOutput {
                code: Some(1),
                stdout: Vec::new(),
                stderr: stderr.clone().into_bytes(),
            }),
            Outcome::TimeOut => Err(RunError::TimedOut {
                program: invocation.program.clone(),
                timeout,
            }),
            Outcome::NoOutput => Ok(CommandOutput {
                code: Some(0),
                ..Default::default()
            }),
        }
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        api_secret: TEST_SECRET.to_string(),
        ..AppConfig::default()
    }
}

pub fn test_state(config: AppConfig, runner: Arc<ScriptedRunner>) -> AppState {
    AppState::with_runner(config, runner)
}

pub fn bearer() -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", TEST_SECRET))
}
