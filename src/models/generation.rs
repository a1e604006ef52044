// src/models/generation.rs

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::config::{DEFAULT_QUESTION_COUNT, MAX_QUESTION_COUNT};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    #[default]
    Quiz,
    Summary,
}

impl ArtifactKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ArtifactKind::Quiz => "quiz",
            ArtifactKind::Summary => "summary",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::Quiz => f.write_str("Quiz"),
            ArtifactKind::Summary => f.write_str("Summary"),
        }
    }
}

/// Everything needed to ask the model for one artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub source_text: String,
    pub artifact_kind: ArtifactKind,
    /// Only meaningful for quizzes.
    pub question_count: u32,
}

fn default_question_count() -> u32 {
    DEFAULT_QUESTION_COUNT
}

/// DTO for the generate form.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenerateForm {
    #[serde(default)]
    #[validate(length(max = 20000, message = "The custom prompt is limited to 20000 characters."))]
    pub custom_prompt: String,

    #[serde(default = "default_question_count")]
    #[validate(range(
        min = 1,
        max = MAX_QUESTION_COUNT,
        message = "Number of quiz questions is outside the allowed range."
    ))]
    pub question_count: u32,

    #[serde(default)]
    pub artifact_kind: ArtifactKind,
}
