//! Diagnostic and error types.
//!
//! Parse and validation problems are accumulated as [`Diagnostic`] values and
//! reported in batch, so a user can fix many source-text errors per run.
//! Selection failures are hard errors and fail fast.

use std::fmt;

use thiserror::Error;

/// A problem found in the question source text, with enough provenance to
/// locate and fix it.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Source file the problem was found in.
    pub file: String,
    /// First line of the offending entry (1-based).
    pub line_start: usize,
    /// Last line of the offending entry (1-based).
    pub line_end: usize,
    /// The question id, when one is known.
    pub question_id: Option<String>,
    /// Human-readable description of the problem.
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}: ", self.file, self.line_start, self.line_end)?;
        if let Some(id) = &self.question_id {
            write!(f, "[{id}] ")?;
        }
        write!(f, "{}", self.message)
    }
}

/// Errors raised by question selection.
#[derive(Debug, Error)]
pub enum SelectError {
    /// A `sample_tags` entry could not be satisfied: no eligible question
    /// carries the tag (or all of them are already chosen).
    #[error("no eligible questions carry sample tag '{tag}'")]
    EmptySamplePool { tag: String },
}
