// src/utils/prompt.rs

//! Prompt construction for the inference endpoint.
//!
//! Both builders are pure: the same context always yields the same prompt.
//! An empty context is not rejected here.

/// Wraps a task in the envelope the model is prompted with.
fn envelope(context: &str, task: &str) -> String {
    format!("Context: {context}\n\nTask: {task}\n\nResponse:")
}

/// Builds the instruction asking the model for an `n`-question quiz.
///
/// The JSON shape spelled out here is exactly what `services::quiz::parse`
/// accepts.
pub fn build_quiz_prompt(context: &str, n: u32) -> String {
    let noun = if n == 1 { "question" } else { "questions" };
    let task = format!(
        r#"Generate a quiz with exactly {n} multiple-choice {noun} based on the given context: "{context}".
For each question, provide exactly 4 options labelled A, B, C and D, and indicate the single correct option.
Ensure the questions are relevant to the topic: {context}.
If the request is about learning a language or grammar, such as 'take a quiz on present tense' or any other tense, prepare fill-in-the-blank or usage questions and options that practise that topic instead of refusing.
Do not include meta-level questions like 'What is the purpose of this quiz?'.
Respond with only a JSON object and no other text, no explanations and no Markdown code fences. Use exactly this structure:
{{
    "questions": [
        {{
            "question": "Question text here",
            "options": {{
                "A": "Option A text",
                "B": "Option B text",
                "C": "Option C text",
                "D": "Option D text"
            }},
            "correct_answer": "A"
        }}
    ]
}}
The "correct_answer" value must be one of "A", "B", "C" or "D"."#
    );
    envelope(context, &task)
}

/// Builds the instruction asking the model for a summary.
pub fn build_summary_prompt(context: &str) -> String {
    let task = format!(
        "Summarize the following content: \"{context}\".\nProvide a concise summary that captures only the main points and key information."
    );
    envelope(context, &task)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiz_prompt_requests_exact_question_count() {
        let prompt = build_quiz_prompt("Photosynthesis converts light into energy.", 5);
        assert!(prompt.contains("exactly 5 multiple-choice questions"));
        assert!(!prompt.contains("exactly 4 multiple-choice"));
    }

    #[test]
    fn quiz_prompt_uses_singular_for_one_question() {
        let prompt = build_quiz_prompt("ctx", 1);
        assert!(prompt.contains("exactly 1 multiple-choice question based"));
    }

    #[test]
    fn quiz_prompt_spells_out_wire_format() {
        let prompt = build_quiz_prompt("ctx", 3);
        for needle in [
            "\"questions\"",
            "\"question\"",
            "\"options\"",
            "\"correct_answer\"",
            "\"A\"",
            "\"D\"",
            "no Markdown code fences",
            "meta-level questions",
            "present tense",
        ] {
            assert!(prompt.contains(needle), "missing {needle}");
        }
    }

    #[test]
    fn prompts_are_wrapped_in_context_envelope() {
        let prompt = build_summary_prompt("The mitochondria is the powerhouse.");
        assert!(prompt.starts_with("Context: The mitochondria is the powerhouse.\n\nTask: "));
        assert!(prompt.ends_with("\n\nResponse:"));
        assert!(prompt.contains("concise summary"));
    }

    #[test]
    fn empty_context_still_yields_prompt() {
        let quiz = build_quiz_prompt("", 2);
        assert!(quiz.starts_with("Context: \n\nTask: "));
        assert!(quiz.contains("exactly 2"));
        assert!(build_summary_prompt("").ends_with("Response:"));
    }

    #[test]
    fn builders_are_deterministic() {
        assert_eq!(build_quiz_prompt("x", 4), build_quiz_prompt("x", 4));
        assert_eq!(build_summary_prompt("x"), build_summary_prompt("x"));
    }
}
