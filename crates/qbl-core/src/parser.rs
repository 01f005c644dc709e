//! Line-oriented QBL entry parser.
//!
//! Entries are blank-line delimited. Within an entry, lines classify by their
//! leading token:
//!
//! - `#` starts a tag line: whitespace-separated `#NAME` tokens add tags, and
//!   the special `#:ID` token declares the question id.
//! - `*` or `-` followed by whitespace starts an answer option (`*` marks it
//!   correct).
//! - Anything else extends the prompt, or continues the text of the most
//!   recent option once options have started.
//!
//! Malformed entries are collected as [`Diagnostic`]s rather than aborting
//! the load; a later validation pass surfaces them all at once.

use std::path::Path;

use crate::error::Diagnostic;
use crate::model::{AnswerOption, Question};

/// Accumulator for one in-progress entry.
#[derive(Debug, Default)]
struct EntryBuilder {
    id: Option<String>,
    tags: Vec<String>,
    prompt_parts: Vec<String>,
    options: Vec<AnswerOption>,
    problems: Vec<String>,
    line_start: usize,
    line_end: usize,
}

/// Streaming parser over the lines of one or more QBL files.
///
/// Feed lines with [`add_line`](Parser::add_line) (and [`skip_line`] for
/// lines the file layer removed, so line numbers stay accurate), switch files
/// with [`start_file`] (a pending entry never spans a file boundary), then
/// call [`finish`] to collect the questions and diagnostics.
///
/// [`skip_line`]: Parser::skip_line
/// [`start_file`]: Parser::start_file
/// [`finish`]: Parser::finish
#[derive(Debug, Default)]
pub struct Parser {
    file: String,
    file_stem: String,
    line_no: usize,
    entry_no: usize,
    current: Option<EntryBuilder>,
    questions: Vec<Question>,
    diagnostics: Vec<Diagnostic>,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin parsing a new source file. Finalizes any pending entry from the
    /// previous file and resets line and entry numbering.
    pub fn start_file(&mut self, path: &Path) {
        self.finalize_entry();
        self.file = path.display().to_string();
        self.file_stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "bank".to_string());
        self.line_no = 0;
        self.entry_no = 0;
    }

    /// Account for a line the file layer stripped (e.g. a `%` comment)
    /// without feeding it to the grammar.
    pub fn skip_line(&mut self) {
        self.line_no += 1;
    }

    /// Consume one raw source line.
    pub fn add_line(&mut self, line: &str) {
        self.line_no += 1;

        let trimmed = line.trim();
        if trimmed.is_empty() {
            // Blank line: entry boundary. Consecutive blanks are idempotent
            // because `current` is only created by content lines.
            self.finalize_entry();
            return;
        }

        let line_no = self.line_no;
        let entry = self.current.get_or_insert_with(|| EntryBuilder {
            line_start: line_no,
            ..EntryBuilder::default()
        });
        entry.line_end = line_no;

        if trimmed.starts_with('#') {
            Self::add_tag_line(entry, trimmed);
        } else if let Some((marker, rest)) = split_option_marker(trimmed) {
            let text = rest.trim();
            if text.is_empty() {
                entry.problems.push("option with empty text".to_string());
            }
            entry.options.push(AnswerOption::new(text, marker == '*'));
        } else if entry.options.is_empty() {
            entry.prompt_parts.push(trimmed.to_string());
        } else {
            // Continuation of the most recent option's text.
            let last = entry.options.last_mut().unwrap();
            last.text.push(' ');
            last.text.push_str(trimmed);
        }
    }

    fn add_tag_line(entry: &mut EntryBuilder, line: &str) {
        for token in line.split_whitespace() {
            if let Some(id) = token.strip_prefix("#:") {
                if id.is_empty() {
                    entry.problems.push("empty question id".to_string());
                } else if entry.id.is_some() {
                    entry
                        .problems
                        .push(format!("duplicate id declaration '#:{id}'"));
                } else {
                    entry.id = Some(id.to_string());
                }
            } else if let Some(tag) = token.strip_prefix('#') {
                if tag.is_empty() {
                    entry.problems.push("empty tag".to_string());
                } else {
                    entry.tags.push(tag.to_string());
                }
            } else {
                entry
                    .problems
                    .push(format!("malformed tag token '{token}'"));
            }
        }
    }

    /// Close the current entry, emitting either a `Question` or diagnostics.
    fn finalize_entry(&mut self) {
        let Some(entry) = self.current.take() else {
            return;
        };
        self.entry_no += 1;

        // Positional ids count every entry, valid or not, so that fixing one
        // bad entry does not renumber its neighbors.
        let explicit_id = entry.id.is_some();
        let id = entry
            .id
            .unwrap_or_else(|| format!("{}.{}", self.file_stem, self.entry_no));

        let prompt = entry.prompt_parts.join(" ");

        let mut problems = entry.problems;
        if prompt.is_empty() {
            problems.push("entry has no prompt text".to_string());
        }
        if entry.options.is_empty() {
            problems.push("entry has no answer options".to_string());
        } else if !entry.options.iter().any(|o| o.is_correct) {
            problems.push("no option marked correct".to_string());
        }

        if problems.is_empty() {
            self.questions.push(Question {
                id,
                explicit_id,
                tags: entry.tags,
                prompt,
                options: entry.options,
                source_file: self.file.clone(),
                line_start: entry.line_start,
                line_end: entry.line_end,
            });
        } else {
            for message in problems {
                self.diagnostics.push(Diagnostic {
                    file: self.file.clone(),
                    line_start: entry.line_start,
                    line_end: entry.line_end,
                    question_id: Some(id.clone()),
                    message,
                });
            }
        }
    }

    /// Finalize any pending entry and return everything parsed so far.
    pub fn finish(mut self) -> (Vec<Question>, Vec<Diagnostic>) {
        self.finalize_entry();
        (self.questions, self.diagnostics)
    }
}

/// Split an option line into its marker and text, if it is one.
///
/// A line is an option line when it starts with `*` or `-` and the marker is
/// either the whole line or followed by whitespace; `-x` with no space is
/// ordinary prompt text.
fn split_option_marker(line: &str) -> Option<(char, &str)> {
    let mut chars = line.chars();
    let marker = chars.next()?;
    if marker != '*' && marker != '-' {
        return None;
    }
    let rest = chars.as_str();
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some((marker, rest))
    } else {
        None
    }
}
