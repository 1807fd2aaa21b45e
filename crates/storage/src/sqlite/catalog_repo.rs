use async_trait::async_trait;
use prep_core::model::{Category, CategoryId, Question, QuestionId};

use super::SqliteRepository;
use super::mapping::{map_category_row, map_question_row, write_err};
use crate::repository::{
    CategoryRepository, QuestionRepository, StorageError, keep_valid_rows,
};

impl SqliteRepository {
    /// Insert or refresh a category. The catalog is written out-of-band
    /// (seeding), never by the views.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    pub async fn upsert_category(&self, category: &Category) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO categories (id, name, description, icon)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                description = excluded.description,
                icon = excluded.icon
            ",
        )
        .bind(category.id().to_string())
        .bind(category.name())
        .bind(category.description())
        .bind(category.icon().key())
        .execute(&self.pool)
        .await
        .map_err(write_err)?;
        Ok(())
    }

    /// Insert or refresh a question.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write fails (including an unknown category).
    pub async fn upsert_question(&self, question: &Question) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO questions (id, category_id, title, description, difficulty, tips, example_answer, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ON CONFLICT(id) DO UPDATE SET
                category_id = excluded.category_id,
                title = excluded.title,
                description = excluded.description,
                difficulty = excluded.difficulty,
                tips = excluded.tips,
                example_answer = excluded.example_answer
            ",
        )
        .bind(question.id().to_string())
        .bind(question.category_id().to_string())
        .bind(question.title())
        .bind(question.description())
        .bind(question.difficulty().as_str())
        .bind(question.tips())
        .bind(question.example_answer())
        .bind(question.created_at())
        .execute(&self.pool)
        .await
        .map_err(write_err)?;
        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for SqliteRepository {
    async fn list_categories(&self) -> Result<Vec<Category>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, name, description, icon
            FROM categories
            ORDER BY name ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(keep_valid_rows("category", rows.iter().map(map_category_row)))
    }
}

#[async_trait]
impl QuestionRepository for SqliteRepository {
    async fn list_questions(
        &self,
        category: Option<CategoryId>,
    ) -> Result<Vec<Question>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, category_id, title, description, difficulty, tips, example_answer, created_at
            FROM questions
            WHERE ?1 IS NULL OR category_id = ?1
            ORDER BY created_at DESC
            ",
        )
        .bind(category.map(|id| id.to_string()))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(keep_valid_rows("question", rows.iter().map(map_question_row)))
    }

    async fn get_question(&self, id: QuestionId) -> Result<Question, StorageError> {
        let row = sqlx::query(
            r"
            SELECT id, category_id, title, description, difficulty, tips, example_answer, created_at
            FROM questions
            WHERE id = ?1
            ",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        match row {
            Some(row) => map_question_row(&row),
            None => Err(StorageError::NotFound),
        }
    }
}
