use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::ids::{CategoryId, QuestionId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question title cannot be empty")]
    EmptyTitle,
}

/// How challenging a question is.
///
/// Values outside the known set are preserved verbatim so they can still be
/// displayed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Other(String),
}

impl Difficulty {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "easy" => Self::Easy,
            "medium" => Self::Medium,
            "hard" => Self::Hard,
            other => Self::Other(other.to_owned()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::Other(raw) => raw,
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored fields of a question, as read from any backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    pub id: QuestionId,
    pub category_id: CategoryId,
    pub title: String,
    pub description: Option<String>,
    pub difficulty: String,
    pub tips: Option<String>,
    pub example_answer: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl QuestionDraft {
    /// Normalise optional text and validate the title.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyTitle` if the title is blank.
    pub fn validate(self) -> Result<Question, QuestionError> {
        if self.title.trim().is_empty() {
            return Err(QuestionError::EmptyTitle);
        }
        Ok(Question {
            id: self.id,
            category_id: self.category_id,
            title: self.title,
            description: self.description.unwrap_or_default(),
            difficulty: Difficulty::parse(&self.difficulty),
            tips: self.tips.unwrap_or_default(),
            example_answer: self.example_answer.unwrap_or_default(),
            created_at: self.created_at,
        })
    }
}

/// An interview question. Read-only from the app's perspective.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    category_id: CategoryId,
    title: String,
    description: String,
    difficulty: Difficulty,
    tips: String,
    example_answer: String,
    created_at: DateTime<Utc>,
}

impl Question {
    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn category_id(&self) -> CategoryId {
        self.category_id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn difficulty(&self) -> &Difficulty {
        &self.difficulty
    }

    /// Tips text; empty when the question has none.
    #[must_use]
    pub fn tips(&self) -> &str {
        &self.tips
    }

    /// Example answer text; empty when the question has none.
    #[must_use]
    pub fn example_answer(&self) -> &str {
        &self.example_answer
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
