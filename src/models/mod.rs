mod catalog;
mod ingredient_line;
mod meal;
mod note;

pub mod api;

#[cfg(test)]
pub mod test_fixtures;

pub use catalog::{CatalogMeal, CatalogResponse, MAX_INGREDIENT_SLOTS};
pub use ingredient_line::IngredientLine;
pub use meal::MealRecord;
pub use note::NoteRecord;
