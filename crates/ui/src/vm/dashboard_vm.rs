use prep_core::model::{Category, CategoryId, Question};

use crate::vm::badge_vm::{DifficultyBadgeVm, map_difficulty_badge};

/// A question fetch tagged with the generation it was issued under.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuestionRequest {
    pub generation: u64,
    pub category: Option<CategoryId>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionRowVm {
    pub id: String,
    pub title: String,
    pub badge: DifficultyBadgeVm,
}

/// Dashboard state: catalog lists, the active filter and the latest question
/// request generation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DashboardVm {
    categories: Vec<Category>,
    questions: Vec<Question>,
    selected: Option<CategoryId>,
    generation: u64,
    categories_loaded: bool,
}

impl DashboardVm {
    /// Request a question reload under the current filter.
    pub fn begin_load(&mut self) -> QuestionRequest {
        self.generation += 1;
        QuestionRequest {
            generation: self.generation,
            category: self.selected,
        }
    }

    /// Selecting the active category clears the filter; any other narrows to it.
    pub fn select_category(&mut self, id: CategoryId) -> QuestionRequest {
        self.selected = if self.selected == Some(id) {
            None
        } else {
            Some(id)
        };
        self.begin_load()
    }

    /// Store the category fetch result. A failed fetch passes an empty list.
    pub fn finish_categories(&mut self, categories: Vec<Category>) {
        self.categories = categories;
        self.categories_loaded = true;
    }

    /// Replace the question list unless a newer request has been issued.
    /// Returns whether the response was applied.
    pub fn apply_questions(&mut self, generation: u64, questions: Vec<Question>) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.questions = questions;
        true
    }

    #[must_use]
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        !self.categories_loaded
    }

    #[must_use]
    pub fn selected(&self) -> Option<CategoryId> {
        self.selected
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn heading(&self) -> String {
        let name = self.selected.and_then(|id| {
            self.categories
                .iter()
                .find(|category| category.id() == id)
                .map(Category::name)
        });
        match name {
            Some(name) => format!("{name} Questions"),
            None => "All Questions".to_owned(),
        }
    }

    #[must_use]
    pub fn count_label(&self) -> String {
        format!("{} questions", self.questions.len())
    }

    #[must_use]
    pub fn question_rows(&self) -> Vec<QuestionRowVm> {
        self.questions
            .iter()
            .map(|question| QuestionRowVm {
                id: question.id().to_string(),
                title: question.title().to_owned(),
                badge: map_difficulty_badge(question.difficulty()),
            })
            .collect()
    }
}
