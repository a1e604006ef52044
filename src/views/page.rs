// src/views/page.rs

use std::fmt::Write;

use axum::response::Html;

use crate::{
    config::MAX_QUESTION_COUNT,
    models::{
        generation::ArtifactKind,
        quiz::{LoadedQuiz, QuestionOutcome, ScoreReport},
    },
    services::session::{Notice, Session},
    utils::html::escape,
};

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; display: flex; }
main { flex: 1; padding: 1.5rem 2rem; max-width: 60rem; }
aside { width: 18rem; background: #f3f4f6; padding: 1.5rem; min-height: 100vh; }
section { margin-bottom: 2rem; }
textarea { width: 100%; min-height: 6rem; }
.notice { padding: .6rem 1rem; border-radius: .3rem; margin-bottom: .6rem; }
.success { background: #dcfce7; }
.error { background: #fee2e2; }
.busy { font-style: italic; color: #555; }
.summary { white-space: pre-wrap; }
fieldset { margin-bottom: 1rem; }
"#;

const ABOUT: &str = "This app allows you to upload PDF, Word, or PowerPoint files and generate an interactive quiz or summary based on the content. It also allows you to input custom prompts for content generation.";

const INSTRUCTIONS: [&str; 7] = [
    "Upload a file (PDF, Word, or PowerPoint)",
    "Alternatively, enter a custom prompt in the text area",
    "Specify the number of quiz questions (if generating a quiz)",
    "Select the content type to generate (Quiz or Summary)",
    "Click 'Generate' to create the selected content",
    "If generating a quiz, answer the questions by selecting the appropriate options",
    "Click 'Check Answers' to see your score and correct answers (if generating a quiz)",
];

/// Everything one render of the page needs.
pub struct PageView<'a> {
    pub session: &'a Session,
    pub notices: &'a [Notice],
    pub report: Option<&'a ScoreReport>,
}

impl<'a> PageView<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self {
            session,
            notices: &[],
            report: None,
        }
    }

    pub fn with_notices(mut self, notices: &'a [Notice]) -> Self {
        self.notices = notices;
        self
    }

    pub fn with_report(mut self, report: Option<&'a ScoreReport>) -> Self {
        self.report = report;
        self
    }
}

pub fn render(view: &PageView<'_>) -> Html<String> {
    let mut out = String::with_capacity(8 * 1024);
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\"><head><meta charset=\"utf-8\">");
    out.push_str("<title>PDF Assistant</title><style>");
    out.push_str(STYLE);
    out.push_str("</style></head><body><main>");
    out.push_str("<h1>PDF Assistant for Students and Researchers</h1>");

    render_notices(&mut out, view.notices);
    render_upload(&mut out, view.session);
    render_generate(&mut out, view.session);
    if let Some(loaded) = view.session.loaded_quiz() {
        render_quiz(&mut out, loaded, view.report);
    }
    if let Some(summary) = view.session.summary() {
        let _ = write!(
            out,
            "<section id=\"summary\"><h2>Summary</h2><div class=\"summary\">{}</div></section>",
            escape(summary)
        );
    }

    out.push_str("</main>");
    render_sidebar(&mut out);
    out.push_str("</body></html>");
    Html(out)
}

fn render_notices(out: &mut String, notices: &[Notice]) {
    for notice in notices {
        let class = if notice.is_error() { "error" } else { "success" };
        let _ = write!(
            out,
            "<div class=\"notice {class}\" role=\"status\">{}</div>",
            escape(notice.message())
        );
    }
}

/// Inline script that reveals a form's progress message on submit.
fn busy_on_submit(busy_id: &str) -> String {
    format!("document.getElementById('{busy_id}').hidden=false")
}

fn render_upload(out: &mut String, session: &Session) {
    out.push_str("<section id=\"upload\"><h2>Upload your file</h2>");
    let _ = write!(
        out,
        "<form method=\"post\" action=\"/upload\" enctype=\"multipart/form-data\" onsubmit=\"{}\">",
        busy_on_submit("upload-busy")
    );
    out.push_str(
        "<input type=\"file\" name=\"file\" accept=\".pdf,.docx,.pptx,application/pdf,\
         application/vnd.openxmlformats-officedocument.wordprocessingml.document,\
         application/vnd.openxmlformats-officedocument.presentationml.presentation\" required> \
         <button type=\"submit\">Process File</button>\
         <p id=\"upload-busy\" class=\"busy\" hidden>Processing your file...</p></form>",
    );
    if let Some(text) = session.document_text() {
        let _ = write!(
            out,
            "<p id=\"document-status\">Document loaded ({} characters of text).</p>",
            text.char_count()
        );
    }
    out.push_str("</section>");
}

fn render_generate(out: &mut String, session: &Session) {
    out.push_str("<section id=\"generate\"><h2>Or input your own custom prompt</h2>");
    out.push_str(
        "<form method=\"post\" action=\"/generate\" \
         onsubmit=\"var q=this.querySelector('input[name=artifact_kind]:checked');\
         var b=document.getElementById('generate-busy');\
         b.textContent=(q&&q.value==='summary')?'Summarizing content...':'Generating quiz...';\
         b.hidden=false\">",
    );
    let _ = write!(
        out,
        "<label>Enter your prompt (optional)<br><textarea name=\"custom_prompt\">{}</textarea></label>",
        escape(session.custom_prompt())
    );
    let _ = write!(
        out,
        "<p><label>Number of quiz questions \
         <input type=\"number\" name=\"question_count\" min=\"1\" max=\"{MAX_QUESTION_COUNT}\" value=\"{}\" required></label></p>",
        session.question_count()
    );

    out.push_str("<p>Select content type to generate: ");
    for kind in [ArtifactKind::Quiz, ArtifactKind::Summary] {
        let checked = if session.artifact_kind() == kind { " checked" } else { "" };
        let _ = write!(
            out,
            "<label><input type=\"radio\" name=\"artifact_kind\" value=\"{}\"{checked}> {kind}</label> ",
            kind.as_str()
        );
    }
    out.push_str("</p>");

    if !session.has_context() {
        out.push_str("<p class=\"busy\">Upload a file or enter a prompt to generate content.</p>");
    }
    out.push_str(
        "<button type=\"submit\">Generate</button>\
         <p id=\"generate-busy\" class=\"busy\" hidden>Generating quiz...</p></form></section>",
    );
}

fn render_quiz(out: &mut String, loaded: &LoadedQuiz, report: Option<&ScoreReport>) {
    let quiz = &loaded.quiz;
    out.push_str("<section id=\"quiz\"><h2>Quiz</h2>");
    let _ = write!(
        out,
        "<form method=\"post\" action=\"/quiz/check\"><input type=\"hidden\" name=\"quiz_id\" value=\"{}\">",
        quiz.id
    );

    for (i, question) in quiz.questions.iter().enumerate() {
        let number = i + 1;
        let _ = write!(
            out,
            "<fieldset><legend><strong>Question {number}:</strong> {}</legend>",
            escape(&question.text)
        );
        let selected = loaded.answers.get(i);
        for (label, text) in question.options() {
            let checked = if selected == Some(label) { " checked" } else { "" };
            let _ = write!(
                out,
                "<label><input type=\"radio\" name=\"q{i}\" value=\"{label}\"{checked}> {label}: {}</label><br>",
                escape(text)
            );
        }

        match report.and_then(|r| r.outcomes.get(i)) {
            Some(QuestionOutcome::Correct) => {
                let _ = write!(
                    out,
                    "<div class=\"notice success\">Question {number}: Correct!</div>"
                );
            }
            Some(QuestionOutcome::Incorrect {
                selected,
                correct,
                correct_text,
            }) => {
                let unanswered = if selected.is_none() { " (no answer selected)" } else { "" };
                let _ = write!(
                    out,
                    "<div class=\"notice error\">Question {number}: Incorrect{unanswered}. \
                     The correct answer is {correct}: {}</div>",
                    escape(correct_text)
                );
            }
            None => {}
        }
        out.push_str("</fieldset>");
    }

    out.push_str("<button type=\"submit\">Check Answers</button></form>");
    if let Some(report) = report {
        let _ = write!(
            out,
            "<p id=\"score\">Your score: {}/{}</p>",
            report.correct_count, report.total
        );
    }
    out.push_str("</section>");
}

fn render_sidebar(out: &mut String) {
    out.push_str("<aside><h2>About</h2>");
    let _ = write!(out, "<p>{ABOUT}</p>");
    out.push_str("<h2>Instructions</h2><ol>");
    for step in INSTRUCTIONS {
        let _ = write!(out, "<li>{step}</li>");
    }
    out.push_str("</ol></aside>");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::quiz::{AnswerSheet, OptionLabel},
        services::quiz::{parse, score},
    };

    fn loaded() -> LoadedQuiz {
        let quiz = parse(
            r#"{"questions":[{"question":"<b>Q1</b>","options":{"A":"x","B":"y","C":"z","D":"w"},"correct_answer":"B"}]}"#,
        )
        .unwrap();
        LoadedQuiz::new(quiz)
    }

    #[test]
    fn empty_session_renders_forms_and_sidebar() {
        let session = Session::new();
        let Html(body) = render(&PageView::new(&session));

        assert!(body.contains("action=\"/upload\""));
        assert!(body.contains("action=\"/generate\""));
        assert!(body.contains("name=\"question_count\" min=\"1\""));
        assert!(body.contains("value=\"5\""));
        assert!(body.contains("<h2>Instructions</h2>"));
        assert!(!body.contains("id=\"quiz\""));
        assert!(!body.contains("id=\"summary\""));
    }

    #[test]
    fn quiz_text_is_escaped_and_feedback_rendered() {
        let mut out = String::new();
        let loaded = loaded();
        let report = score(&loaded.quiz, &AnswerSheet::new());

        render_quiz(&mut out, &loaded, Some(&report));

        assert!(!out.contains("<b>Q1</b>"));
        assert!(out.contains("name=\"q0\" value=\"A\""));
        assert!(out.contains("Question 1: Incorrect (no answer selected). The correct answer is B: y"));
        assert!(out.contains("Your score: 0/1"));
    }

    #[test]
    fn recorded_answers_are_preselected() {
        let mut out = String::new();
        let mut loaded = loaded();
        loaded.answers = [(0, OptionLabel::B)].into_iter().collect();
        let report = score(&loaded.quiz, &loaded.answers);

        render_quiz(&mut out, &loaded, Some(&report));

        assert!(out.contains("value=\"B\" checked"));
        assert!(out.contains("Question 1: Correct!"));
        assert!(out.contains("Your score: 1/1"));
    }
}
