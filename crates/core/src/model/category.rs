use thiserror::Error;

use crate::model::ids::CategoryId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CategoryError {
    #[error("category name cannot be empty")]
    EmptyName,
}

/// Symbolic icon attached to a category.
///
/// The store keeps a free-form key; anything unrecognised falls back to
/// [`CategoryIcon::Code`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CategoryIcon {
    #[default]
    Code,
    Users,
    Network,
    Crown,
    Lightbulb,
}

impl CategoryIcon {
    pub const ALL: [Self; 5] = [
        Self::Code,
        Self::Users,
        Self::Network,
        Self::Crown,
        Self::Lightbulb,
    ];

    /// Resolve a stored icon key, defaulting when the key is unknown.
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        match key.trim() {
            "Code" => Self::Code,
            "Users" => Self::Users,
            "Network" => Self::Network,
            "Crown" => Self::Crown,
            "Lightbulb" => Self::Lightbulb,
            _ => Self::default(),
        }
    }

    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Code => "Code",
            Self::Users => "Users",
            Self::Network => "Network",
            Self::Crown => "Crown",
            Self::Lightbulb => "Lightbulb",
        }
    }
}

/// A grouping label for questions. Read-only from the app's perspective.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    id: CategoryId,
    name: String,
    description: String,
    icon: CategoryIcon,
}

impl Category {
    /// Build a category from stored fields.
    ///
    /// # Errors
    ///
    /// Returns `CategoryError::EmptyName` if the name is blank.
    pub fn new(
        id: CategoryId,
        name: impl Into<String>,
        description: impl Into<String>,
        icon: CategoryIcon,
    ) -> Result<Self, CategoryError> {
        let name = name.into().trim().to_owned();
        if name.is_empty() {
            return Err(CategoryError::EmptyName);
        }
        Ok(Self {
            id,
            name,
            description: description.into(),
            icon,
        })
    }

    #[must_use]
    pub fn id(&self) -> CategoryId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn icon(&self) -> CategoryIcon {
        self.icon
    }
}
