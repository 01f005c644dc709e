//! The question bank: file loading, validation, and selection entry points.
//!
//! The bank is the immutable parsed corpus. Generation does not overwrite it;
//! it returns a separate [`Selection`] so the full corpus stays available for
//! diagnostics and repeated runs.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rand::Rng;

use crate::error::{Diagnostic, SelectError};
use crate::model::Question;
use crate::parser::Parser;
use crate::select::{self, GenerateOptions, Selection};

/// Marker for full-line comments in QBL source and avoid files.
pub const COMMENT_MARKER: char = '%';

/// An ordered collection of parsed questions with their provenance.
#[derive(Debug, Default)]
pub struct QuestionBank {
    questions: Vec<Question>,
    loaded_files: Vec<PathBuf>,
    parse_diagnostics: Vec<Diagnostic>,
}

impl QuestionBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse one QBL file and append its questions to the bank.
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read question file: {}", path.display()))?;
        self.load_str(&content, path);
        Ok(())
    }

    /// Parse QBL source text as if read from `path` (useful for testing).
    pub fn load_str(&mut self, content: &str, path: &Path) {
        let mut parser = Parser::new();
        parser.start_file(path);
        for line in content.lines() {
            if line.trim_start().starts_with(COMMENT_MARKER) {
                parser.skip_line();
            } else {
                parser.add_line(line);
            }
        }
        let (questions, diagnostics) = parser.finish();
        tracing::debug!(
            file = %path.display(),
            questions = questions.len(),
            diagnostics = diagnostics.len(),
            "loaded question file"
        );
        self.questions.extend(questions);
        self.parse_diagnostics.extend(diagnostics);
        self.loaded_files.push(path.to_path_buf());
    }

    /// The questions in load order.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// The files loaded so far, in load order.
    pub fn loaded_files(&self) -> &[PathBuf] {
        &self.loaded_files
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Check all bank-wide invariants and return every violation found:
    /// the accumulated parse diagnostics plus duplicate-id checks across
    /// files. An empty result means the bank is safe to render.
    pub fn validate(&self) -> Vec<Diagnostic> {
        let mut diagnostics = self.parse_diagnostics.clone();

        let mut first_seen: HashMap<&str, &Question> = HashMap::new();
        for q in &self.questions {
            if let Some(original) = first_seen.get(q.id.as_str()) {
                diagnostics.push(Diagnostic {
                    file: q.source_file.clone(),
                    line_start: q.line_start,
                    line_end: q.line_end,
                    question_id: Some(q.id.clone()),
                    message: format!(
                        "duplicate question id (first defined at {}:{})",
                        original.source_file, original.line_start
                    ),
                });
            } else {
                first_seen.insert(&q.id, q);
            }
        }

        diagnostics
    }

    /// Run a tag-constrained generation pass over the whole corpus.
    pub fn generate(
        &self,
        opts: &GenerateOptions,
        rng: &mut impl Rng,
    ) -> Result<Selection, SelectError> {
        select::generate(&self.questions, opts, rng)
    }
}

/// Load one avoid file: question ids one per line, with `%` comments and
/// blank lines ignored. The output of [`write_selection_log`] parses back
/// with this.
pub fn load_avoid_file(path: &Path) -> Result<HashSet<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read avoid file: {}", path.display()))?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with(COMMENT_MARKER))
        .map(str::to_string)
        .collect())
}

/// Log the ids of the chosen questions, one per line in current order, for
/// use as a future avoid list.
pub fn write_selection_log(path: &Path, questions: &[Question]) -> Result<()> {
    let mut log = String::new();
    for q in questions {
        log.push_str(&q.id);
        log.push('\n');
    }
    std::fs::write(path, log)
        .with_context(|| format!("failed to write selection log: {}", path.display()))
}
