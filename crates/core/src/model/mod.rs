mod category;
mod ids;
mod progress;
mod question;
mod session;

pub use ids::{CategoryId, ParseIdError, ProgressId, QuestionId, UserId};

pub use category::{Category, CategoryError, CategoryIcon};
pub use progress::{ProgressDraft, ProgressError, ProgressStatus, UserProgress};
pub use question::{Difficulty, Question, QuestionDraft, QuestionError};
pub use session::UserSession;
