//! Canonical QBL renderer.
//!
//! Re-parsing this renderer's output reproduces an equivalent question
//! sequence. Positional ids are emitted explicitly so the round trip is
//! stable even after reordering.

use qbl_core::model::Question;

pub fn render(questions: &[Question]) -> String {
    let mut out = String::new();
    for (i, q) in questions.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str("#:");
        out.push_str(&q.id);
        for tag in &q.tags {
            out.push_str(" #");
            out.push_str(tag);
        }
        out.push('\n');
        out.push_str(&q.prompt);
        out.push('\n');
        for option in &q.options {
            out.push_str(if option.is_correct { "* " } else { "- " });
            out.push_str(&option.text);
            out.push('\n');
        }
    }
    out
}
