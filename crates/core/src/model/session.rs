use crate::model::ids::UserId;

/// Identity of the signed-in user, as reported by the auth provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSession {
    user_id: UserId,
    email: String,
}

impl UserSession {
    #[must_use]
    pub fn new(user_id: UserId, email: impl Into<String>) -> Self {
        Self {
            user_id,
            email: email.into(),
        }
    }

    /// Session for a locally configured user whose id is derived from the email.
    #[must_use]
    pub fn local(email: &str) -> Self {
        Self::new(UserId::from_email(email), email.trim())
    }

    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Display string for the header.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }
}
