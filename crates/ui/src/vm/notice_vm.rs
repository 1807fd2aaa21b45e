#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Error,
    Success,
}

impl NoticeKind {
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Error => "Error",
            Self::Success => "Success",
        }
    }

    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Error => "notice notice--error",
            Self::Success => "notice notice--success",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NoticeVm {
    pub id: u64,
    pub kind: NoticeKind,
    pub message: String,
}

/// Notices currently on screen, oldest first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NoticeQueue {
    next_id: u64,
    items: Vec<NoticeVm>,
}

impl NoticeQueue {
    pub fn push(&mut self, kind: NoticeKind, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(NoticeVm {
            id,
            kind,
            message: message.into(),
        });
        id
    }

    /// Returns whether a notice was removed.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|notice| notice.id != id);
        self.items.len() != before
    }

    #[must_use]
    pub fn items(&self) -> &[NoticeVm] {
        &self.items
    }

    #[must_use]
    pub fn ids(&self) -> Vec<u64> {
        self.items.iter().map(|notice| notice.id).collect()
    }
}
