//! Core data model types for QBL.
//!
//! These are the fundamental types the entire toolkit uses to represent
//! questions and their provenance.

use serde::{Deserialize, Serialize};

/// One answer choice of a multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    /// The literal answer text.
    pub text: String,
    /// Whether this choice is a correct answer.
    pub is_correct: bool,
}

impl AnswerOption {
    pub fn new(text: impl Into<String>, is_correct: bool) -> Self {
        Self {
            text: text.into(),
            is_correct,
        }
    }
}

/// A single quiz question, immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier within a loaded bank. Either declared in the source
    /// text with `#:ID` or derived positionally as `FILESTEM.N`.
    pub id: String,
    /// Whether the id was declared explicitly in the source text.
    #[serde(default)]
    pub explicit_id: bool,
    /// Tags in declaration order.
    #[serde(default)]
    pub tags: Vec<String>,
    /// The question text, normalized to a single line.
    pub prompt: String,
    /// Answer choices in declaration order.
    pub options: Vec<AnswerOption>,
    /// Source file this question was parsed from.
    #[serde(default)]
    pub source_file: String,
    /// First source line of the entry (1-based).
    #[serde(default)]
    pub line_start: usize,
    /// Last source line of the entry (1-based).
    #[serde(default)]
    pub line_end: usize,
}

impl Question {
    /// Does this question carry the given tag?
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Does this question carry at least one of the given tags?
    pub fn has_any_tag(&self, tags: &[String]) -> bool {
        tags.iter().any(|t| self.has_tag(t))
    }

    /// Number of options marked correct.
    pub fn correct_count(&self) -> usize {
        self.options.iter().filter(|o| o.is_correct).count()
    }

    /// True when more than one option is correct (multi-select question).
    pub fn is_multi_select(&self) -> bool {
        self.correct_count() > 1
    }

    /// The first correct option, if any.
    pub fn first_correct(&self) -> Option<&AnswerOption> {
        self.options.iter().find(|o| o.is_correct)
    }
}
