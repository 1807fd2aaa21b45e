use std::sync::Arc;

use prep_core::model::{Category, CategoryId, Question, QuestionId};
use storage::repository::{CategoryRepository, QuestionRepository, StorageError};

use crate::error::CatalogError;

/// Read-only access to categories and questions.
#[derive(Clone)]
pub struct CatalogService {
    categories: Arc<dyn CategoryRepository>,
    questions: Arc<dyn QuestionRepository>,
}

impl CatalogService {
    #[must_use]
    pub fn new(
        categories: Arc<dyn CategoryRepository>,
        questions: Arc<dyn QuestionRepository>,
    ) -> Self {
        Self {
            categories,
            questions,
        }
    }

    /// List every category ordered by name.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Storage` if repository access fails.
    pub async fn list_categories(&self) -> Result<Vec<Category>, CatalogError> {
        let categories = self.categories.list_categories().await.inspect_err(|e| {
            tracing::warn!(error = %e, "listing categories failed");
        })?;
        Ok(categories)
    }

    /// List questions newest first, optionally narrowed to one category.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Storage` if repository access fails.
    pub async fn list_questions(
        &self,
        category: Option<CategoryId>,
    ) -> Result<Vec<Question>, CatalogError> {
        tracing::debug!(?category, "listing questions");
        let questions = self.questions.list_questions(category).await.inspect_err(|e| {
            tracing::warn!(error = %e, "listing questions failed");
        })?;
        Ok(questions)
    }

    /// Fetch a single question.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` when no question has this id.
    /// Returns `CatalogError::Storage` if repository access fails.
    pub async fn get_question(&self, id: QuestionId) -> Result<Question, CatalogError> {
        match self.questions.get_question(id).await {
            Ok(question) => Ok(question),
            Err(StorageError::NotFound) => Err(CatalogError::NotFound),
            Err(e) => {
                tracing::warn!(question_id = %id, error = %e, "loading question failed");
                Err(e.into())
            }
        }
    }
}
