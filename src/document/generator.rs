//! LaTeX source generator for lesson worksheets.
//!
//! The output is a complete `article` document: theory first (when given),
//! then one page per exercise with hints and room for a solution. Every piece
//! of user text goes through [`escape_latex`] exactly once.

use std::fmt::Write;

use super::common::{escape_latex, fill_template};
use super::traits::Generator;
use crate::lesson::{Exercise, LessonRequest};

const PREAMBLE: &str = r"\documentclass[12pt]{article}
\usepackage[utf8]{inputenc}
\usepackage{amsmath, amssymb}
\usepackage{geometry}
\geometry{letterpaper, margin=1.0in}
\usepackage{parskip}
\setlength{\parskip}{1em}
\usepackage{fancyhdr}
\usepackage{lastpage}

\pagestyle{fancy}
\fancyhead[L]{{title}}
\fancyhead[R]{\today}
\fancyfoot[C]{Page \thepage\ of \pageref{LastPage}}

\begin{document}

";

const SOLUTION_PLACEHOLDER: &str = r"\textit{(Space for solution...)}";

/// Stateless generator turning a validated lesson into LaTeX source.
#[derive(Debug, Default, Clone, Copy)]
pub struct LatexLessonGenerator;

impl LatexLessonGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Render one exercise page.
    ///
    /// The `Hints:` label and its `itemize` are written only when at least
    /// one usable hint survived deserialization. An exercise whose hints were
    /// all blank gets no hint block at all instead of an empty list, which
    /// LaTeX rejects with "missing \item".
    fn render_exercise(out: &mut String, index: usize, exercise: &Exercise) {
        let _ = writeln!(
            out,
            r"\subsection*{{Question {} ({})}}",
            index,
            escape_latex(exercise.difficulty())
        );
        out.push_str(&escape_latex(&exercise.question));
        out.push_str("\n\n");

        if !exercise.hints.is_empty() {
            out.push_str("\\textbf{Hints:}\n");
            out.push_str("\\begin{itemize}\n");
            for hint in &exercise.hints {
                let _ = writeln!(out, r"\item {}", escape_latex(hint));
            }
            out.push_str("\\end{itemize}\n\n");
        }

        out.push_str("\\vfill\n");
        out.push_str(SOLUTION_PLACEHOLDER);
        out.push('\n');
    }
}

impl Generator<LessonRequest> for LatexLessonGenerator {
    fn generate(&self, request: &LessonRequest) -> String {
        let title = escape_latex(request.topic_title());
        let mut latex = fill_template(PREAMBLE, &[("title", title.as_str())]);

        if let Some(theory) = request.theory() {
            latex.push_str("\\section*{Theory}\n");
            latex.push_str(&escape_latex(theory));
            latex.push('\n');
            latex.push_str("\\newpage\n\n");
        }

        latex.push_str("\\section*{Exercises}\n\n");

        let total = request.exercises.len();
        for (i, exercise) in request.exercises.iter().enumerate() {
            let index = i + 1;
            Self::render_exercise(&mut latex, index, exercise);

            if index < total {
                latex.push_str("\\newpage\n\n");
            }
        }

        latex.push_str("\\end{document}\n");
        latex
    }
}
