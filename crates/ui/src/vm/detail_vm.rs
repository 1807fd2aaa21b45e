use chrono::{DateTime, Utc};
use prep_core::model::{ProgressId, ProgressStatus, UserProgress};

use crate::vm::time_fmt::format_datetime;

/// Snapshot handed to the save call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaveRequest {
    pub existing: Option<ProgressId>,
    pub notes: String,
}

/// Editable progress state of the question detail page. Defaults to
/// not started with empty notes until a stored record is applied.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DetailVm {
    progress_id: Option<ProgressId>,
    status: ProgressStatus,
    notes: String,
    completed_at: Option<DateTime<Utc>>,
    saving: bool,
}

impl DetailVm {
    /// Adopt a stored record. `None` keeps the current values.
    pub fn apply_progress(&mut self, progress: Option<UserProgress>) {
        let Some(progress) = progress else {
            return;
        };
        self.progress_id = Some(progress.id());
        self.status = progress.status();
        self.notes = progress.notes().to_owned();
        self.completed_at = progress.completed_at();
    }

    pub fn edit_notes(&mut self, text: impl Into<String>) {
        self.notes = text.into();
    }

    /// Mark a save as outstanding. Returns `None` while another save is running.
    pub fn begin_save(&mut self) -> Option<SaveRequest> {
        if self.saving {
            return None;
        }
        self.saving = true;
        Some(SaveRequest {
            existing: self.progress_id,
            notes: self.notes.clone(),
        })
    }

    /// Adopt the persisted record's id and status. Notes typed while the save
    /// was in flight are kept.
    pub fn save_succeeded(&mut self, saved: &UserProgress) {
        self.saving = false;
        self.progress_id = Some(saved.id());
        self.status = saved.status();
        self.completed_at = saved.completed_at();
    }

    pub fn save_failed(&mut self) {
        self.saving = false;
    }

    #[must_use]
    pub fn progress_id(&self) -> Option<ProgressId> {
        self.progress_id
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
    pub fn is_saving(&self) -> bool {
        self.saving
    }

    #[must_use]
    pub fn status_line(&self) -> String {
        match (self.status, self.completed_at) {
            (ProgressStatus::Completed, Some(at)) => {
                format!("Status: {} on {}", self.status.label(), format_datetime(at))
            }
            (status, _) => format!("Status: {}", status.label()),
        }
    }
}
