//! Compiler backend definitions.
//!
//! A backend is plain data: an executable, an argument template and the
//! number of passes it needs. The orchestrator treats every backend the same
//! way, so adding one means adding a constructor here.

use std::path::Path;

use super::common::fill_template;
use super::runner::Invocation;

/// A LaTeX compiler the orchestrator may fall back to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerBackend {
    pub name: String,
    pub program: String,
    /// Arguments with `{workdir}` and `{source}` placeholders.
    pub args: Vec<String>,
    /// Sequential runs needed to resolve cross-references.
    pub passes: u32,
}

impl CompilerBackend {
    pub fn new(name: &str, program: &str, args: &[&str], passes: u32) -> Self {
        Self {
            name: name.to_string(),
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            passes: passes.max(1),
        }
    }

    /// Tectonic fetches packages on demand and resolves references in one run.
    pub fn tectonic() -> Self {
        Self::new("tectonic", "tectonic", &["-o", "{workdir}", "{source}"], 1)
    }

    /// Classic pdflatex; the second pass fills in `\pageref{LastPage}`.
    pub fn pdflatex() -> Self {
        Self::new(
            "pdflatex",
            "pdflatex",
            &[
                "-interaction=nonstopmode",
                "-output-directory",
                "{workdir}",
                "{source}",
            ],
            2,
        )
    }

    /// Look up a built-in backend by name.
    pub fn by_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "tectonic" => Some(Self::tectonic()),
            "pdflatex" => Some(Self::pdflatex()),
            _ => None,
        }
    }

    /// The lightweight availability check.
    pub fn probe_invocation(&self) -> Invocation {
        Invocation::new(&self.program, vec!["--version".to_string()])
    }

    /// The compile command for a source file inside `workdir`.
    pub fn invocation(&self, workdir: &Path, source: &Path) -> Invocation {
        let workdir_str = workdir.to_string_lossy();
        let source_str = source.to_string_lossy();
        let pairs = [("workdir", &*workdir_str), ("source", &*source_str)];
        let args = self
            .args
            .iter()
            .map(|arg| fill_template(arg, &pairs))
            .collect();

        Invocation::new(&self.program, args).in_dir(workdir)
    }
}

/// Default ranking: the fast modern engine first, legacy pdflatex second.
pub fn default_backends() -> Vec<CompilerBackend> {
    vec![CompilerBackend::tectonic(), CompilerBackend::pdflatex()]
}
