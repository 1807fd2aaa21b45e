//! Wire shapes of the hosted tables.

use chrono::{DateTime, Utc};
use prep_core::model::{
    Category, CategoryIcon, CategoryId, ProgressDraft, ProgressId, ProgressStatus, Question,
    QuestionDraft, QuestionId, UserId, UserProgress,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::repository::StorageError;

#[derive(Debug, Deserialize)]
pub(crate) struct CategoryRow {
    id: Uuid,
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    icon: Option<String>,
}

impl CategoryRow {
    pub(crate) fn into_category(self) -> Result<Category, StorageError> {
        let icon = self
            .icon
            .as_deref()
            .map_or_else(CategoryIcon::default, CategoryIcon::from_key);
        let category = Category::new(
            CategoryId::new(self.id),
            self.name,
            self.description.unwrap_or_default(),
            icon,
        )
        .map_err(prep_core::Error::from)?;
        Ok(category)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct QuestionRow {
    id: Uuid,
    category_id: Uuid,
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    difficulty: Option<String>,
    #[serde(default)]
    tips: Option<String>,
    #[serde(default)]
    example_answer: Option<String>,
    created_at: DateTime<Utc>,
}

impl QuestionRow {
    pub(crate) fn into_question(self) -> Result<Question, StorageError> {
        let question = QuestionDraft {
            id: QuestionId::new(self.id),
            category_id: CategoryId::new(self.category_id),
            title: self.title,
            description: self.description,
            difficulty: self.difficulty.unwrap_or_default(),
            tips: self.tips,
            example_answer: self.example_answer,
            created_at: self.created_at,
        }
        .validate()
        .map_err(prep_core::Error::from)?;
        Ok(question)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProgressRow {
    id: Uuid,
    user_id: Uuid,
    question_id: Uuid,
    status: String,
    #[serde(default)]
    notes: Option<String>,
    #[serde(default)]
    completed_at: Option<DateTime<Utc>>,
}

impl ProgressRow {
    pub(crate) fn into_progress(self) -> Result<UserProgress, StorageError> {
        let status = ProgressStatus::parse(&self.status).map_err(prep_core::Error::from)?;
        let progress = UserProgress::from_persisted(
            ProgressId::new(self.id),
            UserId::new(self.user_id),
            QuestionId::new(self.question_id),
            status,
            self.notes.unwrap_or_default(),
            self.completed_at,
        )
        .map_err(prep_core::Error::from)?;
        Ok(progress)
    }
}

/// Body sent on insert, update and upsert. `completed_at` is always written so
/// moving away from `completed` clears it.
#[derive(Debug, Serialize)]
pub(crate) struct ProgressPayload<'a> {
    user_id: Uuid,
    question_id: Uuid,
    status: &'static str,
    notes: &'a str,
    completed_at: Option<DateTime<Utc>>,
}

impl<'a> From<&'a ProgressDraft> for ProgressPayload<'a> {
    fn from(draft: &'a ProgressDraft) -> Self {
        Self {
            user_id: draft.user_id().value(),
            question_id: draft.question_id().value(),
            status: draft.status().as_str(),
            notes: draft.notes(),
            completed_at: draft.completed_at(),
        }
    }
}
