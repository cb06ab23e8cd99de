//! LaTeX rendering engine.
//!
//! Writes the source into a private temporary directory and walks the ranked
//! backend list: probe, run every pass, check for the PDF. The first backend
//! that produces a PDF wins. The temporary directory is a [`TempDir`], so it
//! is removed on every exit path.
//!
//! [`TempDir`]: tempfile::TempDir

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use super::backend::CompilerBackend;
use super::common::tail_lines;
use super::runner::{CommandOutput, CommandRunner, RunError};
use super::CompilationError;

pub const SOURCE_FILE: &str = "output.tex";
pub const OUTPUT_FILE: &str = "output.pdf";

pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_RUN_TIMEOUT: Duration = Duration::from_secs(30);

const STDOUT_TAIL_LINES: usize = 20;

/// Compiler orchestrator shared by all requests.
pub struct LatexRenderEngine {
    backends: Vec<CompilerBackend>,
    runner: Arc<dyn CommandRunner>,
    probe_timeout: Duration,
    run_timeout: Duration,
}

impl LatexRenderEngine {
    pub fn new(backends: Vec<CompilerBackend>, runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            backends,
            runner,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            run_timeout: DEFAULT_RUN_TIMEOUT,
        }
    }

    pub fn with_timeouts(mut self, probe_timeout: Duration, run_timeout: Duration) -> Self {
        self.probe_timeout = probe_timeout;
        self.run_timeout = run_timeout;
        self
    }

    /// Run the `--version` probe. Any failure means "unavailable".
    pub async fn is_available(&self, backend: &CompilerBackend) -> bool {
        match self
            .runner
            .run(&backend.probe_invocation(), self.probe_timeout)
            .await
        {
            Ok(output) if output.success() => true,
            Ok(output) => {
                log::debug!(
                    "{} probe exited with status {:?}",
                    backend.name,
                    output.code
                );
                false
            }
            Err(e) => {
                log::debug!("{} probe failed: {}", backend.name, e);
                false
            }
        }
    }

    /// Names of all configured backends whose probe succeeds, in rank order.
    pub async fn available_compilers(&self) -> Vec<String> {
        let mut available = Vec::new();
        for backend in &self.backends {
            if self.is_available(backend).await {
                available.push(backend.name.clone());
            }
        }
        available
    }

    /// Compile LaTeX source to PDF bytes, falling back through the backends.
    pub async fn compile(&self, latex_source: &str) -> Result<Vec<u8>, CompilationError> {
        let temp_dir = tempfile::Builder::new()
            .prefix("lesson-pdf-")
            .tempdir()
            .map_err(CompilationError::TempDir)?;
        let source_path = temp_dir.path().join(SOURCE_FILE);

        tokio::fs::write(&source_path, latex_source)
            .await
            .map_err(CompilationError::WriteSource)?;
        log::info!("Wrote LaTeX source to {}", source_path.display());

        let mut attempted = Vec::new();
        let mut unavailable = Vec::new();
        let mut last_error: Option<String> = None;

        for backend in &self.backends {
            if !self.is_available(backend).await {
                log::debug!("{} not available, trying next compiler", backend.name);
                unavailable.push(backend.name.clone());
                continue;
            }

            attempted.push(backend.name.clone());
            match self.run_backend(backend, temp_dir.path(), &source_path).await {
                Ok(pdf) => {
                    log::info!("{} produced {} bytes of PDF", backend.name, pdf.len());
                    return Ok(pdf);
                }
                Err(e) => {
                    log::error!("{}", e);
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(last_error) => Err(CompilationError::Exhausted {
                attempted,
                unavailable,
                last_error,
            }),
            None => Err(CompilationError::NoCompilerAvailable { tried: unavailable }),
        }
    }

    async fn run_backend(
        &self,
        backend: &CompilerBackend,
        workdir: &Path,
        source: &Path,
    ) -> Result<Vec<u8>, String> {
        let invocation = backend.invocation(workdir, source);

        for run in 1..=backend.passes {
            log::info!("Running {} (run {}/{})", backend.name, run, backend.passes);
            match self.runner.run(&invocation, self.run_timeout).await {
                Ok(output) if output.success() => {}
                Ok(output) => {
                    return Err(format!(
                        "{} compilation failed: {}",
                        backend.name,
                        failure_detail(&output)
                    ))
                }
                Err(RunError::TimedOut { .. }) => {
                    return Err(format!("{} compilation timed out", backend.name))
                }
                Err(e) => return Err(format!("{} compilation failed: {}", backend.name, e)),
            }
        }
        log::info!("{} compilation successful", backend.name);

        let pdf_path = workdir.join(OUTPUT_FILE);
        if !tokio::fs::try_exists(&pdf_path).await.unwrap_or(false) {
            return Err(format!("{}: PDF file was not created", backend.name));
        }

        tokio::fs::read(&pdf_path)
            .await
            .map_err(|e| format!("{}: failed to read generated PDF: {}", backend.name, e))
    }
}

/// Best diagnostic text for a failed pass. pdflatex reports errors on
/// stdout, so fall back to its tail when stderr is empty.
fn failure_detail(output: &CommandOutput) -> String {
    let stderr = output.stderr_text();
    if !stderr.trim().is_empty() {
        return stderr.trim().to_string();
    }

    let stdout = output.stdout_text();
    if !stdout.trim().is_empty() {
        return tail_lines(stdout.trim_end(), STDOUT_TAIL_LINES);
    }

    match output.code {
        Some(code) => format!("exited with status {}", code),
        None => "terminated by signal".to_string(),
    }
}
