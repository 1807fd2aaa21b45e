use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::ids::{ProgressId, QuestionId, UserId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("invalid progress status: {0}")]
    InvalidStatus(String),

    #[error("completed progress must carry a completion time")]
    MissingCompletionTime,
}

/// Where a user stands on a single question.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ProgressStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

impl ProgressStatus {
    /// Parse the wire name used by every backend.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::InvalidStatus` for unknown names.
    pub fn parse(raw: &str) -> Result<Self, ProgressError> {
        match raw {
            "not_started" => Ok(Self::NotStarted),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            other => Err(ProgressError::InvalidStatus(other.to_owned())),
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::NotStarted => "Not started",
            Self::InProgress => "In progress",
            Self::Completed => "Completed",
        }
    }
}

/// Fields written when progress is saved.
///
/// `completed_at` is derived from the status: it is set exactly when the
/// status is `Completed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressDraft {
    user_id: UserId,
    question_id: QuestionId,
    status: ProgressStatus,
    notes: String,
    completed_at: Option<DateTime<Utc>>,
}

impl ProgressDraft {
    #[must_use]
    pub fn new(
        user_id: UserId,
        question_id: QuestionId,
        status: ProgressStatus,
        notes: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        let completed_at = (status == ProgressStatus::Completed).then_some(now);
        Self {
            user_id,
            question_id,
            status,
            notes: notes.into(),
            completed_at,
        }
    }

    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    #[must_use]
    pub fn question_id(&self) -> QuestionId {
        self.question_id
    }

    #[must_use]
    pub fn status(&self) -> ProgressStatus {
        self.status
    }

    #[must_use]
    pub fn notes(&self) -> &str {
        &self.notes
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Attach a persisted id, producing the stored record.
    #[must_use]
    pub fn assign_id(self, id: ProgressId) -> UserProgress {
        UserProgress {
            id,
            user_id: self.user_id,
            question_id: self.question_id,
            status: self.status,
            notes: self.notes,
            completed_at: self.completed_at,
        }
    }
}

/// A persisted per-user, per-question progress record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProgress {
    id: ProgressId,
    user_id: UserId,
    question_id: QuestionId,
    status: ProgressStatus,
    notes: String,
    completed_at: Option<DateTime<Utc>>,
}

impl UserProgress {
    /// Rebuild a record read back from storage.
    ///
    /// Rows written by other clients may carry a stale `completed_at` on a
    /// non-completed status; that is tolerated. A completed row without a
    /// timestamp is not.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::MissingCompletionTime` for a completed record
    /// without `completed_at`.
    pub fn from_persisted(
        id: ProgressId,
        user_id: UserId,
        question_id: QuestionId,
        status: ProgressStatus,
        notes: String,
        completed_at: Option<DateTime<Utc>>,
    ) -> Result<Self, ProgressError> {
        if status == ProgressStatus::Completed && completed_at.is_none() {
            return Err(ProgressError::MissingCompletionTime);
        }
        Ok(Self {
            id,
            user_id,
            question_id,
            status,
            notes,
            completed_at,
        })
    }

    #[must_use]
    pub fn id(&self) -> ProgressId {
        self.id
    }

    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    #[must_use]
    pub fn question_id(&self) -> QuestionId {
        self.question_id
    }

    #[must_use]
    pub fn status(&self) -> ProgressStatus {
        self.status
    }

    #[must_use]
    pub fn notes(&self) -> &str {
        &self.notes
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }
}
