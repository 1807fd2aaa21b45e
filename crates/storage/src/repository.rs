use async_trait::async_trait;
use prep_core::model::{
    Category, CategoryId, ProgressDraft, ProgressId, Question, QuestionId, UserId, UserProgress,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("unauthorized")]
    Unauthorized,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<prep_core::Error> for StorageError {
    fn from(err: prep_core::Error) -> Self {
        StorageError::Serialization(err.to_string())
    }
}

/// Collect mapped catalog rows, dropping any that fail validation.
///
/// Catalog data is written out of band, so one malformed row is logged and
/// skipped instead of failing the whole listing.
pub(crate) fn keep_valid_rows<T>(
    kind: &'static str,
    rows: impl IntoIterator<Item = Result<T, StorageError>>,
) -> Vec<T> {
    rows.into_iter()
        .filter_map(|row| {
            row.inspect_err(|e| tracing::warn!(kind, error = %e, "skipping invalid row"))
                .ok()
        })
        .collect()
}

/// Read access to question categories.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// List every category ordered by name ascending.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    async fn list_categories(&self) -> Result<Vec<Category>, StorageError>;
}

/// Read access to interview questions.
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// List questions ordered by creation time, newest first, optionally
    /// restricted to one category.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    async fn list_questions(
        &self,
        category: Option<CategoryId>,
    ) -> Result<Vec<Question>, StorageError>;

    /// Fetch exactly one question.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` when no row matches.
    async fn get_question(&self, id: QuestionId) -> Result<Question, StorageError>;
}

/// Per-user progress records. One logical record per (user, question).
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Fetch the record for a (user, question) pair; `None` when absent.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    async fn find_progress(
        &self,
        user_id: UserId,
        question_id: QuestionId,
    ) -> Result<Option<UserProgress>, StorageError>;

    /// Insert a new record. The app writes through `upsert_progress`; this is
    /// the plain insert the hosted table exposes, kept for callers that must
    /// not overwrite an existing record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if the pair already has a record.
    async fn insert_progress(&self, draft: &ProgressDraft) -> Result<UserProgress, StorageError>;

    /// Overwrite the record with the given id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if no record has that id.
    async fn update_progress(
        &self,
        id: ProgressId,
        draft: &ProgressDraft,
    ) -> Result<UserProgress, StorageError>;

    /// Insert, or update the existing record for the same (user, question).
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    async fn upsert_progress(&self, draft: &ProgressDraft) -> Result<UserProgress, StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    categories: Arc<Mutex<Vec<Category>>>,
    questions: Arc<Mutex<Vec<Question>>>,
    progress: Arc<Mutex<HashMap<ProgressId, UserProgress>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a category to the catalog.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` for a duplicate id.
    pub fn insert_category(&self, category: Category) -> Result<(), StorageError> {
        let mut guard = self
            .categories
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        if guard.iter().any(|c| c.id() == category.id()) {
            return Err(StorageError::Conflict);
        }
        guard.push(category);
        Ok(())
    }

    /// Add a question to the catalog.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` for a duplicate id.
    pub fn insert_question(&self, question: Question) -> Result<(), StorageError> {
        let mut guard = self
            .questions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        if guard.iter().any(|q| q.id() == question.id()) {
            return Err(StorageError::Conflict);
        }
        guard.push(question);
        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for InMemoryRepository {
    async fn list_categories(&self) -> Result<Vec<Category>, StorageError> {
        let guard = self
            .categories
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let mut categories = guard.clone();
        categories.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(categories)
    }
}

#[async_trait]
impl QuestionRepository for InMemoryRepository {
    async fn list_questions(
        &self,
        category: Option<CategoryId>,
    ) -> Result<Vec<Question>, StorageError> {
        let guard = self
            .questions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let mut questions: Vec<Question> = guard
            .iter()
            .filter(|q| category.is_none_or(|id| q.category_id() == id))
            .cloned()
            .collect();
        questions.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(questions)
    }

    async fn get_question(&self, id: QuestionId) -> Result<Question, StorageError> {
        let guard = self
            .questions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard
            .iter()
            .find(|q| q.id() == id)
            .cloned()
            .ok_or(StorageError::NotFound)
    }
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn find_progress(
        &self,
        user_id: UserId,
        question_id: QuestionId,
    ) -> Result<Option<UserProgress>, StorageError> {
        let guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard
            .values()
            .find(|p| p.user_id() == user_id && p.question_id() == question_id)
            .cloned())
    }

    async fn insert_progress(&self, draft: &ProgressDraft) -> Result<UserProgress, StorageError> {
        let mut guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let taken = guard
            .values()
            .any(|p| p.user_id() == draft.user_id() && p.question_id() == draft.question_id());
        if taken {
            return Err(StorageError::Conflict);
        }
        let record = draft.clone().assign_id(ProgressId::random());
        guard.insert(record.id(), record.clone());
        Ok(record)
    }

    async fn update_progress(
        &self,
        id: ProgressId,
        draft: &ProgressDraft,
    ) -> Result<UserProgress, StorageError> {
        let mut guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let slot = guard.get_mut(&id).ok_or(StorageError::NotFound)?;
        *slot = draft.clone().assign_id(id);
        Ok(slot.clone())
    }

    async fn upsert_progress(&self, draft: &ProgressDraft) -> Result<UserProgress, StorageError> {
        let mut guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let id = guard
            .values()
            .find(|p| p.user_id() == draft.user_id() && p.question_id() == draft.question_id())
            .map_or_else(ProgressId::random, UserProgress::id);
        let record = draft.clone().assign_id(id);
        guard.insert(id, record.clone());
        Ok(record)
    }
}

/// Aggregates the three collections behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub categories: Arc<dyn CategoryRepository>,
    pub questions: Arc<dyn QuestionRepository>,
    pub progress: Arc<dyn ProgressRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_repository(InMemoryRepository::new())
    }

    /// Wire every collection to the same repository value.
    #[must_use]
    pub fn from_repository<R>(repo: R) -> Self
    where
        R: CategoryRepository + QuestionRepository + ProgressRepository + Clone + 'static,
    {
        let categories: Arc<dyn CategoryRepository> = Arc::new(repo.clone());
        let questions: Arc<dyn QuestionRepository> = Arc::new(repo.clone());
        let progress: Arc<dyn ProgressRepository> = Arc::new(repo);
        Self {
            categories,
            questions,
            progress,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use prep_core::model::{CategoryIcon, ProgressStatus, QuestionDraft};
    use prep_core::time::fixed_now;

    fn category(name: &str) -> Category {
        Category::new(CategoryId::random(), name, "", CategoryIcon::Code).unwrap()
    }

    fn question(category_id: CategoryId, title: &str, age_minutes: i64) -> Question {
        QuestionDraft {
            id: QuestionId::random(),
            category_id,
            title: title.to_owned(),
            description: None,
            difficulty: "medium".into(),
            tips: None,
            example_answer: None,
            created_at: fixed_now() - Duration::minutes(age_minutes),
        }
        .validate()
        .unwrap()
    }

    #[tokio::test]
    async fn categories_are_sorted_by_name() {
        let repo = InMemoryRepository::new();
        repo.insert_category(category("System Design")).unwrap();
        repo.insert_category(category("Behavioral")).unwrap();

        let names: Vec<_> = repo
            .list_categories()
            .await
            .unwrap()
            .iter()
            .map(|c| c.name().to_owned())
            .collect();
        assert_eq!(names, ["Behavioral", "System Design"]);
    }

    #[tokio::test]
    async fn questions_are_newest_first_and_filterable() {
        let repo = InMemoryRepository::new();
        let a = category("A");
        let b = category("B");
        repo.insert_question(question(a.id(), "old", 10)).unwrap();
        repo.insert_question(question(a.id(), "new", 1)).unwrap();
        repo.insert_question(question(b.id(), "other", 5)).unwrap();

        let all = repo.list_questions(None).await.unwrap();
        let titles: Vec<_> = all.iter().map(Question::title).collect();
        assert_eq!(titles, ["new", "other", "old"]);

        let only_a = repo.list_questions(Some(a.id())).await.unwrap();
        assert_eq!(only_a.len(), 2);
        assert!(only_a.iter().all(|q| q.category_id() == a.id()));
    }

    #[tokio::test]
    async fn missing_question_is_not_found() {
        let repo = InMemoryRepository::new();
        let err = repo.get_question(QuestionId::random()).await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound));
    }

    #[tokio::test]
    async fn upsert_reuses_the_pair_record() {
        let repo = InMemoryRepository::new();
        let user = UserId::random();
        let question_id = QuestionId::random();
        let first = repo
            .upsert_progress(&ProgressDraft::new(
                user,
                question_id,
                ProgressStatus::InProgress,
                "draft",
                fixed_now(),
            ))
            .await
            .unwrap();
        let second = repo
            .upsert_progress(&ProgressDraft::new(
                user,
                question_id,
                ProgressStatus::Completed,
                "final",
                fixed_now(),
            ))
            .await
            .unwrap();

        assert_eq!(first.id(), second.id());
        let stored = repo.find_progress(user, question_id).await.unwrap().unwrap();
        assert_eq!(stored.notes(), "final");
        assert_eq!(stored.status(), ProgressStatus::Completed);
    }

    #[tokio::test]
    async fn second_insert_for_pair_conflicts() {
        let repo = InMemoryRepository::new();
        let draft = ProgressDraft::new(
            UserId::random(),
            QuestionId::random(),
            ProgressStatus::InProgress,
            "",
            fixed_now(),
        );
        repo.insert_progress(&draft).await.unwrap();
        let err = repo.insert_progress(&draft).await.unwrap_err();
        assert!(matches!(err, StorageError::Conflict));
    }

    #[tokio::test]
    async fn update_of_unknown_id_is_not_found() {
        let repo = InMemoryRepository::new();
        let draft = ProgressDraft::new(
            UserId::random(),
            QuestionId::random(),
            ProgressStatus::InProgress,
            "",
            fixed_now(),
        );
        let err = repo
            .update_progress(ProgressId::random(), &draft)
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound));
    }

    #[test]
    fn invalid_rows_are_dropped_in_order() {
        let rows = vec![
            Ok(1),
            Err(StorageError::Serialization("bad row".into())),
            Ok(3),
        ];
        assert_eq!(keep_valid_rows("question", rows), vec![1, 3]);
    }
}
