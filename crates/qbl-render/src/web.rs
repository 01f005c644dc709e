//! Web renderer: a self-contained HTML/JS/CSS quiz.
//!
//! The three artifacts must agree on shared identifiers: each question's
//! radio-group `name` in the markup is its question id, and the generated
//! answer-key object in the script is keyed by those same names. The scoring
//! script compares the selected radio's `value` against the key, so option
//! values and key values both carry the raw option text.

use qbl_core::model::Question;

/// The three coordinated output artifacts. Callers must write all of them
/// (or none); markup without its script is a broken quiz.
#[derive(Debug, Clone)]
pub struct WebArtifacts {
    pub html: String,
    pub js: String,
    pub css: String,
}

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Escape a string as a JS string literal (JSON is a subset of JS).
fn js_string(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string())
}

/// Render the quiz for `stem.html`, `stem.js`, and `stem.css`.
pub fn render(questions: &[Question], title: &str, stem: &str) -> WebArtifacts {
    WebArtifacts {
        html: render_html(questions, title, stem),
        js: render_js(questions),
        css: CSS.to_string(),
    }
}

fn render_html(questions: &[Question], title: &str, stem: &str) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n");
    html.push_str("<html lang=\"en\">\n");
    html.push_str("<head>\n");
    html.push_str("  <meta charset=\"UTF-8\">\n");
    html.push_str("  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    html.push_str(&format!("  <title>{}</title>\n", html_escape(title)));
    html.push_str(&format!(
        "  <link rel=\"stylesheet\" href=\"{stem}.css\">\n"
    ));
    html.push_str("</head>\n<body>\n\n");
    html.push_str("<form id=\"quizForm\">\n");
    html.push_str(&format!("  <h1>{}</h1>\n\n", html_escape(title)));

    for (i, q) in questions.iter().enumerate() {
        let name = html_escape(&q.id);
        html.push_str(&format!(
            "  <div class=\"question\">{}. {}</div>\n",
            i + 1,
            html_escape(&q.prompt)
        ));
        html.push_str("  <div class=\"options\">\n");
        for option in &q.options {
            let text = html_escape(&option.text);
            html.push_str(&format!(
                "    <label><input type=\"radio\" name=\"{name}\" value=\"{text}\"> {text}</label>\n"
            ));
        }
        html.push_str("  </div>\n");
        html.push_str(&format!(
            "  <div class=\"answer\" data-question=\"{name}\"></div>\n\n"
        ));
    }

    html.push_str("  <hr><p>\n");
    html.push_str("  Click <b>Check Answers</b> to identify any errors and try again.  Click <b>Show Answers</b> if you also want to know which answer is the correct one.\n");
    html.push_str("  </p>\n");
    html.push_str("  <button type=\"button\" id=\"checkAnswersBtn\">Check Answers</button>\n");
    html.push_str("  <button type=\"button\" id=\"showAnswersBtn\">Show Answers</button>\n");
    html.push_str("</form>\n");
    html.push_str("<div id=\"results\"></div>\n");
    html.push_str(&format!("<script src=\"{stem}.js\"></script>\n"));
    html.push_str("</body>\n</html>\n");
    html
}

fn render_js(questions: &[Question]) -> String {
    let mut js = String::new();
    js.push_str(JS_HEADER);

    // The answer key: question id -> correct option text. Radio groups hold
    // one choice, so multi-select questions key on their first correct
    // option.
    for q in questions {
        if let Some(correct) = q.first_correct() {
            js.push_str(&format!(
                "    {}: {},\n",
                js_string(&q.id),
                js_string(&correct.text)
            ));
        }
    }

    js.push_str(JS_FOOTER);
    js
}

const JS_HEADER: &str = r#"// Fetch all the radio buttons in the quiz
let radioButtons = document.querySelectorAll('input[type="radio"]');

// Add a click event to each radio button
radioButtons.forEach(button => {
  button.addEventListener('click', function() { clearResults(button.name); });
});

function clearResults(button_name) {
  // Clear main results
  document.getElementById('results').innerHTML = '';

  // Clear answers displayed beneath each question
  let answerDiv = document.querySelector(`.answer[data-question="${button_name}"]`);
  answerDiv.innerHTML = "";
}

function PrintResults(show_correct) {
  event.preventDefault(); // Prevent form from submitting to a server
  let correctAnswers = {
"#;

const JS_FOOTER: &str = r#"  };

  let userAnswers = {};
  for (let key in correctAnswers) {
    let selectedAnswer = document.querySelector(`input[name="${key}"]:checked`);
    userAnswers[key] = selectedAnswer ? selectedAnswer.value : "";
  }

  let score = 0;
  let results = [];

  for (let key in correctAnswers) {
    if (userAnswers[key] === correctAnswers[key]) {
      score++;
      results.push({
        question: key,
        status: 1,
        correctAnswer: correctAnswers[key]
      });
    } else {
      results.push({
        question: key,
        status: 0,
        correctAnswer: correctAnswers[key]
      });
    }
  }

  displayResults(score, results, show_correct);
};

function displayResults(score, results, show_correct) {
  let resultsDiv = document.getElementById('results');
  resultsDiv.innerHTML = `<p>You got ${score} out of ${Object.keys(results).length} correct!</p>`;

  // Reset all answer texts
  let answerDivs = document.querySelectorAll('.answer');
  answerDivs.forEach(div => div.innerHTML = "");

  results.forEach(item => {
    let answerDiv = document.querySelector(`.answer[data-question="${item.question}"]`);
    if (item.status === 0) {
      if (show_correct) {
        answerDiv.innerHTML = `<b>Incorrect</b>. The correct answer is: ${item.correctAnswer}`;
      } else {
        answerDiv.innerHTML = `<b>Incorrect</b>.`;
      }
      answerDiv.style.color = "red";
    } else {
      answerDiv.innerHTML = `<b>Correct!</b>`;
      answerDiv.style.color = "green";
    }
  });
};

document.getElementById('showAnswersBtn').addEventListener('click', function() {
  PrintResults(1);
});

document.getElementById('checkAnswersBtn').addEventListener('click', function() {
  PrintResults(0);
});
"#;

const CSS: &str = r#"body {
  font-family: Arial, sans-serif;
  margin: 50px;
}

.question {
  margin-bottom: 20px;
  color: black;
}
.options {
  color: #000088;
}

label {
  display: block;
  margin-bottom: 5px;
}

input[type="submit"] {
  padding: 10px 15px;
  background-color: #007BFF;
  color: white;
  border: none;
  cursor: pointer;
}

input[type="submit"]:hover {
  background-color: #0056b3;
}
"#;
