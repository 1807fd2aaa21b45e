use prep_core::model::{Category, CategoryIcon, CategoryId};

#[must_use]
pub fn category_glyph(icon: CategoryIcon) -> &'static str {
    match icon {
        CategoryIcon::Code => "</>",
        CategoryIcon::Users => "👥",
        CategoryIcon::Network => "🌐",
        CategoryIcon::Crown => "👑",
        CategoryIcon::Lightbulb => "💡",
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryTileVm {
    pub id: CategoryId,
    pub name: String,
    pub glyph: &'static str,
    pub active: bool,
}

#[must_use]
pub fn map_category_tiles(
    categories: &[Category],
    selected: Option<CategoryId>,
) -> Vec<CategoryTileVm> {
    categories
        .iter()
        .map(|category| CategoryTileVm {
            id: category.id(),
            name: category.name().to_owned(),
            glyph: category_glyph(category.icon()),
            active: selected == Some(category.id()),
        })
        .collect()
}
