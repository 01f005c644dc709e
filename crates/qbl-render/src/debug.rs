//! Debug dump renderer: a plain-text view of every question with its
//! provenance, tags, and correctness marking.

use qbl_core::model::Question;

pub fn render(questions: &[Question]) -> String {
    let mut out = format!("{} question(s)\n", questions.len());
    for (i, q) in questions.iter().enumerate() {
        out.push_str(&format!(
            "[{}] {} ({}:{}-{})",
            i + 1,
            q.id,
            q.source_file,
            q.line_start,
            q.line_end
        ));
        if !q.tags.is_empty() {
            out.push_str(" tags:");
            for tag in &q.tags {
                out.push_str(" #");
                out.push_str(tag);
            }
        }
        out.push('\n');
        out.push_str(&format!("    {}\n", q.prompt));
        for option in &q.options {
            out.push_str(if option.is_correct { "      * " } else { "      - " });
            out.push_str(&option.text);
            out.push('\n');
        }
    }
    out
}
