//! Plain LaTeX renderer: a student-facing `article` document with enumerated
//! questions and lettered choices. Correct answers are not marked.

use qbl_core::model::Question;

/// Escape LaTeX special characters in user text.
pub(crate) fn latex_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\textbackslash{}"),
            '{' => out.push_str("\\{"),
            '}' => out.push_str("\\}"),
            '$' | '&' | '#' | '_' | '%' => {
                out.push('\\');
                out.push(c);
            }
            '^' => out.push_str("\\textasciicircum{}"),
            '~' => out.push_str("\\textasciitilde{}"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render(questions: &[Question], title: &str) -> String {
    let mut out = String::new();
    out.push_str("\\documentclass[11pt]{article}\n");
    out.push_str("\\usepackage[utf8]{inputenc}\n");
    out.push_str("\\usepackage{enumitem}\n");
    out.push_str(&format!("\\title{{{}}}\n", latex_escape(title)));
    out.push_str("\\date{}\n");
    out.push_str("\\begin{document}\n");
    out.push_str("\\maketitle\n\n");
    out.push_str("\\begin{enumerate}\n");
    for q in questions {
        out.push_str(&format!("\\item {}\n", latex_escape(&q.prompt)));
        out.push_str("\\begin{enumerate}[label=\\alph*)]\n");
        for option in &q.options {
            out.push_str(&format!("\\item {}\n", latex_escape(&option.text)));
        }
        out.push_str("\\end{enumerate}\n\n");
    }
    out.push_str("\\end{enumerate}\n");
    out.push_str("\\end{document}\n");
    out
}
