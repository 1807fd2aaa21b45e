mod auth;
mod dashboard;
mod landing;
mod notice;
mod question;
mod state;

#[cfg(test)]
mod action_smoke;
#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use auth::AuthView;
pub use dashboard::DashboardView;
pub use landing::LandingView;
pub use notice::{NoticeTray, Notices, use_notice_provider, use_notices};
pub use question::QuestionView;
pub use state::{ViewError, ViewState, view_state_from_resource};
