use async_trait::async_trait;
use prep_core::model::{ProgressDraft, ProgressId, QuestionId, UserId, UserProgress};

use super::SqliteRepository;
use super::mapping::{map_progress_row, write_err};
use crate::repository::{ProgressRepository, StorageError};

#[async_trait]
impl ProgressRepository for SqliteRepository {
    async fn find_progress(
        &self,
        user_id: UserId,
        question_id: QuestionId,
    ) -> Result<Option<UserProgress>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT id, user_id, question_id, status, notes, completed_at
            FROM user_progress
            WHERE user_id = ?1 AND question_id = ?2
            ",
        )
        .bind(user_id.to_string())
        .bind(question_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        row.as_ref().map(map_progress_row).transpose()
    }

    async fn insert_progress(&self, draft: &ProgressDraft) -> Result<UserProgress, StorageError> {
        let row = sqlx::query(
            r"
            INSERT INTO user_progress (id, user_id, question_id, status, notes, completed_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            RETURNING id, user_id, question_id, status, notes, completed_at
            ",
        )
        .bind(ProgressId::random().to_string())
        .bind(draft.user_id().to_string())
        .bind(draft.question_id().to_string())
        .bind(draft.status().as_str())
        .bind(draft.notes())
        .bind(draft.completed_at())
        .fetch_one(&self.pool)
        .await
        .map_err(write_err)?;

        map_progress_row(&row)
    }

    async fn update_progress(
        &self,
        id: ProgressId,
        draft: &ProgressDraft,
    ) -> Result<UserProgress, StorageError> {
        let row = sqlx::query(
            r"
            UPDATE user_progress
            SET user_id = ?2, question_id = ?3, status = ?4, notes = ?5, completed_at = ?6
            WHERE id = ?1
            RETURNING id, user_id, question_id, status, notes, completed_at
            ",
        )
        .bind(id.to_string())
        .bind(draft.user_id().to_string())
        .bind(draft.question_id().to_string())
        .bind(draft.status().as_str())
        .bind(draft.notes())
        .bind(draft.completed_at())
        .fetch_optional(&self.pool)
        .await
        .map_err(write_err)?;

        match row {
            Some(row) => map_progress_row(&row),
            None => Err(StorageError::NotFound),
        }
    }

    async fn upsert_progress(&self, draft: &ProgressDraft) -> Result<UserProgress, StorageError> {
        let row = sqlx::query(
            r"
            INSERT INTO user_progress (id, user_id, question_id, status, notes, completed_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT(user_id, question_id) DO UPDATE SET
                status = excluded.status,
                notes = excluded.notes,
                completed_at = excluded.completed_at
            RETURNING id, user_id, question_id, status, notes, completed_at
            ",
        )
        .bind(ProgressId::random().to_string())
        .bind(draft.user_id().to_string())
        .bind(draft.question_id().to_string())
        .bind(draft.status().as_str())
        .bind(draft.notes())
        .bind(draft.completed_at())
        .fetch_one(&self.pool)
        .await
        .map_err(write_err)?;

        map_progress_row(&row)
    }
}
