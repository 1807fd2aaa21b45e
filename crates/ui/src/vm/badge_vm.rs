use prep_core::model::Difficulty;

/// Visual tone of a difficulty badge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BadgePalette {
    Success,
    Warning,
    Destructive,
    Neutral,
}

impl BadgePalette {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Success => "badge badge--success",
            Self::Warning => "badge badge--warning",
            Self::Destructive => "badge badge--destructive",
            Self::Neutral => "badge badge--neutral",
        }
    }
}

#[must_use]
pub fn badge_palette(difficulty: &Difficulty) -> BadgePalette {
    match difficulty {
        Difficulty::Easy => BadgePalette::Success,
        Difficulty::Medium => BadgePalette::Warning,
        Difficulty::Hard => BadgePalette::Destructive,
        Difficulty::Other(_) => BadgePalette::Neutral,
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DifficultyBadgeVm {
    pub label: String,
    pub class: &'static str,
}

#[must_use]
pub fn map_difficulty_badge(difficulty: &Difficulty) -> DifficultyBadgeVm {
    DifficultyBadgeVm {
        label: difficulty.as_str().to_owned(),
        class: badge_palette(difficulty).class(),
    }
}
