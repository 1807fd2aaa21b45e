mod badge_vm;
mod category_vm;
mod dashboard_vm;
mod detail_vm;
mod notice_vm;
mod time_fmt;

pub use badge_vm::{BadgePalette, DifficultyBadgeVm, badge_palette, map_difficulty_badge};
pub use category_vm::{CategoryTileVm, category_glyph, map_category_tiles};
pub use dashboard_vm::{DashboardVm, QuestionRequest, QuestionRowVm};
pub use detail_vm::{DetailVm, SaveRequest};
pub use notice_vm::{NoticeKind, NoticeQueue, NoticeVm};
pub use time_fmt::format_datetime;
