use std::sync::Arc;

use prep_core::model::{
    ProgressDraft, ProgressId, ProgressStatus, QuestionId, UserId, UserProgress,
};
use storage::repository::ProgressRepository;

use crate::Clock;
use crate::error::ProgressServiceError;

/// Reads and writes a user's progress on individual questions.
#[derive(Clone)]
pub struct ProgressService {
    clock: Clock,
    progress: Arc<dyn ProgressRepository>,
}

impl ProgressService {
    #[must_use]
    pub fn new(clock: Clock, progress: Arc<dyn ProgressRepository>) -> Self {
        Self { clock, progress }
    }

    /// Fetch the progress record for a (user, question) pair.
    ///
    /// Returns `Ok(None)` when the user has never saved progress here.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` if repository access fails.
    pub async fn find_progress(
        &self,
        user_id: UserId,
        question_id: QuestionId,
    ) -> Result<Option<UserProgress>, ProgressServiceError> {
        let record = self
            .progress
            .find_progress(user_id, question_id)
            .await
            .inspect_err(|e| {
                tracing::warn!(question_id = %question_id, error = %e, "loading progress failed");
            })?;
        Ok(record)
    }

    /// Persist a status change and the current notes.
    ///
    /// With a known record id the record is updated in place; otherwise the
    /// write is an upsert keyed by (user, question), so a first save never
    /// creates a second record for the pair. `completed_at` is stamped from
    /// the service clock when `status` is completed and cleared otherwise.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` if the write fails.
    pub async fn save_progress(
        &self,
        existing: Option<ProgressId>,
        user_id: UserId,
        question_id: QuestionId,
        status: ProgressStatus,
        notes: &str,
    ) -> Result<UserProgress, ProgressServiceError> {
        let draft = ProgressDraft::new(user_id, question_id, status, notes, self.clock.now());
        let saved = match existing {
            Some(id) => {
                tracing::debug!(progress_id = %id, status = status.as_str(), "updating progress");
                self.progress.update_progress(id, &draft).await
            }
            None => {
                tracing::debug!(question_id = %question_id, status = status.as_str(), "upserting progress");
                self.progress.upsert_progress(&draft).await
            }
        }
        .inspect_err(|e| {
            tracing::warn!(question_id = %question_id, error = %e, "saving progress failed");
        })?;
        Ok(saved)
    }
}
