//! GradeScope renderer: an `exam`-class LaTeX packet with correct choices
//! marked via `\correctchoice`, suitable for GradeScope's answer-key import.

use qbl_core::model::Question;

use crate::latex::latex_escape;

pub fn render(questions: &[Question], title: &str, compressed: bool) -> String {
    // oneparchoices packs the choices onto shared lines to save paper.
    let choices_env = if compressed { "oneparchoices" } else { "choices" };

    let mut out = String::new();
    out.push_str("\\documentclass[11pt,answers]{exam}\n");
    out.push_str("\\usepackage[utf8]{inputenc}\n");
    out.push_str("\\begin{document}\n");
    out.push_str(&format!(
        "\\begin{{center}}{{\\Large {}}}\\end{{center}}\n\n",
        latex_escape(title)
    ));
    out.push_str("\\begin{questions}\n");
    for q in questions {
        out.push_str(&format!("\\question {}\n", latex_escape(&q.prompt)));
        out.push_str(&format!("\\begin{{{choices_env}}}\n"));
        for option in &q.options {
            let cmd = if option.is_correct {
                "\\correctchoice"
            } else {
                "\\choice"
            };
            out.push_str(&format!("{cmd} {}\n", latex_escape(&option.text)));
        }
        out.push_str(&format!("\\end{{{choices_env}}}\n\n"));
    }
    out.push_str("\\end{questions}\n");
    out.push_str("\\end{document}\n");
    out
}
