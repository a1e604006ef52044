// src/services/session.rs

//! Per-session state and the actions a user can take on it.
//!
//! Every action catches its own failures and reports them as a [`Notice`],
//! so a failed upload or generation never leaves the session unusable.

use std::time::Instant;

use uuid::Uuid;
use validator::Validate;

use crate::{
    clients::inference::{InferenceClient, InferenceError},
    config::DEFAULT_QUESTION_COUNT,
    models::{
        document::{DocumentText, Upload},
        generation::{ArtifactKind, GenerateForm, GenerationRequest},
        quiz::{LoadedQuiz, OptionLabel, Quiz, ScoreReport},
    },
    services::{
        extractor::{ExtractError, TextExtractor},
        quiz::{self, ParseError},
    },
    utils::prompt::{build_quiz_prompt, build_summary_prompt},
};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Upload a file or enter a custom prompt before generating.")]
    NoContext,
    #[error("There is no quiz to check. Generate a quiz first.")]
    NoQuiz,
    #[error("This quiz has been replaced by a newer one; your answers were not recorded.")]
    StaleQuiz,
    #[error("Question {} does not exist in this quiz.", .index + 1)]
    QuestionOutOfRange { index: usize },
    #[error("{0}")]
    Invalid(String),
    #[error(transparent)]
    Extract(#[from] ExtractError),
    #[error(transparent)]
    Inference(#[from] InferenceError),
    #[error("Failed to generate a valid quiz: {0}")]
    Parse(#[from] ParseError),
}

/// A user-visible message produced by an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }

    pub fn message(&self) -> &str {
        match self {
            Notice::Success(m) | Notice::Error(m) => m,
        }
    }
}

impl From<SessionError> for Notice {
    fn from(err: SessionError) -> Self {
        Notice::Error(err.to_string())
    }
}

/// Answers posted by the quiz form.
#[derive(Debug, Clone)]
pub struct AnswerSubmission {
    pub quiz_id: Uuid,
    pub selections: Vec<(usize, OptionLabel)>,
}

/// What the model produced for one generation request.
#[derive(Debug)]
enum Artifact {
    Quiz(Quiz),
    Summary(String),
}

#[derive(Debug)]
pub struct Session {
    document_text: Option<DocumentText>,
    custom_prompt: String,
    quiz: Option<LoadedQuiz>,
    summary: Option<String>,
    question_count: u32,
    artifact_kind: ArtifactKind,
    last_seen: Instant,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            document_text: None,
            custom_prompt: String::new(),
            quiz: None,
            summary: None,
            question_count: DEFAULT_QUESTION_COUNT,
            artifact_kind: ArtifactKind::Quiz,
            last_seen: Instant::now(),
        }
    }

    pub fn document_text(&self) -> Option<&DocumentText> {
        self.document_text.as_ref()
    }

    pub fn custom_prompt(&self) -> &str {
        &self.custom_prompt
    }

    pub fn loaded_quiz(&self) -> Option<&LoadedQuiz> {
        self.quiz.as_ref()
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub fn question_count(&self) -> u32 {
        self.question_count
    }

    pub fn artifact_kind(&self) -> ArtifactKind {
        self.artifact_kind
    }

    pub(crate) fn touch(&mut self) {
        self.last_seen = Instant::now();
    }

    pub(crate) fn last_seen(&self) -> Instant {
        self.last_seen
    }

    /// True once there is something to generate from.
    pub fn has_context(&self) -> bool {
        !self.custom_prompt.is_empty() || self.document_text.as_ref().is_some_and(|t| !t.is_empty())
    }

    /// Extracts an uploaded document and makes it the current document text.
    pub async fn upload(&mut self, extractor: &TextExtractor, upload: Upload) -> Notice {
        if upload.bytes.is_empty() {
            return SessionError::Invalid("Choose a non-empty file to upload.".to_string()).into();
        }

        match extractor.extract_upload(&upload).await {
            Ok(text) => {
                tracing::info!(file = %upload.describe(), chars = text.char_count(), "Document loaded");
                self.document_text = Some(text);
                Notice::Success("File uploaded and processed successfully!".to_string())
            }
            Err(e) => {
                tracing::warn!(file = %upload.describe(), "Upload failed: {}", e);
                SessionError::from(e).into()
            }
        }
    }

    /// Builds the request for the current state: the custom prompt when
    /// present, otherwise the document text.
    pub fn generation_request(
        &self,
        artifact_kind: ArtifactKind,
        question_count: u32,
    ) -> Result<GenerationRequest, SessionError> {
        let source_text = if !self.custom_prompt.is_empty() {
            self.custom_prompt.clone()
        } else {
            match &self.document_text {
                Some(text) if !text.is_empty() => text.as_str().to_string(),
                _ => return Err(SessionError::NoContext),
            }
        };

        Ok(GenerationRequest {
            source_text,
            artifact_kind,
            question_count,
        })
    }

    /// Handles the generate form: stores the form values, asks the model and
    /// installs the resulting quiz or summary.
    pub async fn generate(&mut self, client: &dyn InferenceClient, form: GenerateForm) -> Notice {
        if let Err(errors) = form.validate() {
            return SessionError::Invalid(errors.to_string()).into();
        }

        self.custom_prompt = form.custom_prompt.trim().to_string();
        self.question_count = form.question_count;
        self.artifact_kind = form.artifact_kind;

        let result = match self.generation_request(form.artifact_kind, form.question_count) {
            Ok(request) => run(client, &request).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(Artifact::Quiz(quiz)) => {
                let count = quiz.len();
                tracing::info!(quiz_id = %quiz.id, questions = count, "Quiz loaded");
                self.quiz = Some(LoadedQuiz::new(quiz));
                let noun = if count == 1 { "question" } else { "questions" };
                Notice::Success(format!("Generated a quiz with {count} {noun}."))
            }
            Ok(Artifact::Summary(summary)) => {
                tracing::info!(chars = summary.len(), "Summary generated");
                self.summary = Some(summary);
                Notice::Success("Summary generated.".to_string())
            }
            Err(e) => {
                tracing::warn!(kind = %form.artifact_kind, "Generation failed: {}", e);
                e.into()
            }
        }
    }

    /// Records one selection against the loaded quiz.
    pub fn record_answer(&mut self, index: usize, label: OptionLabel) -> Result<(), SessionError> {
        let loaded = self.quiz.as_mut().ok_or(SessionError::NoQuiz)?;
        if index >= loaded.quiz.len() {
            return Err(SessionError::QuestionOutOfRange { index });
        }
        quiz::record_answer(&mut loaded.answers, index, label);
        Ok(())
    }

    /// Records every submitted selection, then scores the loaded quiz.
    pub fn check_answers(&mut self, submission: AnswerSubmission) -> Result<ScoreReport, Notice> {
        let result = self.try_check_answers(submission);
        if let Err(e) = &result {
            tracing::warn!("Answer check rejected: {}", e);
        }
        result.map_err(Notice::from)
    }

    fn try_check_answers(&mut self, submission: AnswerSubmission) -> Result<ScoreReport, SessionError> {
        let loaded = self.quiz.as_ref().ok_or(SessionError::NoQuiz)?;
        if loaded.quiz.id != submission.quiz_id {
            return Err(SessionError::StaleQuiz);
        }
        if let Some((index, _)) = submission
            .selections
            .iter()
            .find(|(index, _)| *index >= loaded.quiz.len())
        {
            return Err(SessionError::QuestionOutOfRange { index: *index });
        }

        for (index, label) in submission.selections {
            self.record_answer(index, label)?;
        }

        let loaded = self.quiz.as_ref().ok_or(SessionError::NoQuiz)?;
        let report = quiz::score(&loaded.quiz, &loaded.answers);
        tracing::info!(
            quiz_id = %loaded.quiz.id,
            correct = report.correct_count,
            total = report.total,
            "Answers checked"
        );
        Ok(report)
    }
}

async fn run(client: &dyn InferenceClient, request: &GenerationRequest) -> Result<Artifact, SessionError> {
    match request.artifact_kind {
        ArtifactKind::Quiz => {
            let prompt = build_quiz_prompt(&request.source_text, request.question_count);
            let raw = client.infer(&prompt).await?;
            Ok(Artifact::Quiz(quiz::parse(raw.trim())?))
        }
        ArtifactKind::Summary => {
            let prompt = build_summary_prompt(&request.source_text);
            let summary = client.infer(&prompt).await?;
            Ok(Artifact::Summary(summary))
        }
    }
}
