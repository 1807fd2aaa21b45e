use dioxus::prelude::*;

/// User-facing failures. Each variant carries the notice text shown for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    LoadCategories,
    LoadQuestions,
    LoadQuestion,
    LoadProgress,
    SaveProgress,
    SignInRequired,
    SignOut,
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::LoadCategories => "Failed to load categories",
            Self::LoadQuestions => "Failed to load questions",
            Self::LoadQuestion => "Failed to load question",
            Self::LoadProgress => "Failed to load progress",
            Self::SaveProgress => "Failed to save progress",
            Self::SignInRequired => "Sign in to save progress",
            Self::SignOut => "Failed to sign out",
            Self::Unknown => "Something went wrong. Please try again.",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(*err),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}
