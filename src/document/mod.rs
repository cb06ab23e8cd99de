//! Document pipeline: LaTeX escaping, lesson rendering and PDF compilation.
//!
//! - `common` - escaping and small text helpers
//! - `generator` - `LatexLessonGenerator`, lesson to LaTeX source
//! - `backend` - the ranked `CompilerBackend` list
//! - `runner` - process execution behind the `CommandRunner` seam
//! - `engine` - `LatexRenderEngine`, the fallback orchestrator

pub mod backend;
pub mod common;
pub mod engine;
pub mod generator;
pub mod runner;
pub mod traits;

pub use backend::{default_backends, CompilerBackend};
pub use common::escape_latex;
pub use engine::LatexRenderEngine;
pub use generator::LatexLessonGenerator;
pub use runner::{CommandOutput, CommandRunner, Invocation, RunError, SystemRunner};
pub use traits::{Generator, Validator};

use thiserror::Error;

/// Errors that can occur while compiling a document.
#[derive(Debug, Error)]
pub enum CompilationError {
    #[error("failed to create temporary directory: {0}")]
    TempDir(#[source] std::io::Error),
    #[error("failed to write LaTeX source: {0}")]
    WriteSource(#[source] std::io::Error),
    #[error("No LaTeX compiler available (tried: {})", .tried.join(", "))]
    NoCompilerAvailable { tried: Vec<String> },
    #[error(
        "LaTeX compilation failed (tried: {}; unavailable: {}). Last error: {}",
        name_list(.attempted),
        name_list(.unavailable),
        .last_error
    )]
    Exhausted {
        attempted: Vec<String>,
        unavailable: Vec<String>,
        last_error: String,
    },
}

fn name_list(names: &[String]) -> String {
    if names.is_empty() {
        "none".to_string()
    } else {
        names.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exhausted_names_attempted_and_unavailable() {
        let err = CompilationError::Exhausted {
            attempted: vec!["pdflatex".to_string()],
            unavailable: vec!["tectonic".to_string()],
            last_error: "pdflatex compilation failed: ! Emergency stop.".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "LaTeX compilation failed (tried: pdflatex; unavailable: tectonic). \
             Last error: pdflatex compilation failed: ! Emergency stop."
        );

        let err = CompilationError::Exhausted {
            attempted: vec!["tectonic".to_string(), "pdflatex".to_string()],
            unavailable: Vec::new(),
            last_error: "boom".to_string(),
        };
        assert!(err.to_string().contains("(tried: tectonic, pdflatex; unavailable: none)"));
    }
}
