//! D2L / Brightspace CSV quiz-import renderer.
//!
//! Emits one row group per question: `NewQuestion,MC` (or `MS` when several
//! options are correct), id, title, question text, points, and one `Option`
//! row per choice. MC options carry a percentage weight (100/0); MS options
//! carry a checked flag (1/0).

use qbl_core::model::Question;

/// Quote a CSV field when it contains a comma, quote, or newline.
fn csv_field(s: &str) -> String {
    if s.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

pub fn render(questions: &[Question]) -> String {
    let mut out = String::new();
    for q in questions {
        let multi = q.is_multi_select();
        out.push_str(if multi { "NewQuestion,MS\n" } else { "NewQuestion,MC\n" });
        out.push_str(&format!("ID,{}\n", csv_field(&q.id)));
        out.push_str(&format!("Title,{}\n", csv_field(&q.id)));
        out.push_str(&format!("QuestionText,{}\n", csv_field(&q.prompt)));
        out.push_str("Points,1\n");
        for option in &q.options {
            let weight = match (multi, option.is_correct) {
                (false, true) => "100",
                (true, true) => "1",
                (_, false) => "0",
            };
            out.push_str(&format!("Option,{},{}\n", weight, csv_field(&option.text)));
        }
        out.push('\n');
    }
    out
}
