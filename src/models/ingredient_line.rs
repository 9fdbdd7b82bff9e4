/// One ingredient/measure pair as it came from the recipe catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientLine {
    pub ingredient: String,
    pub measure: String,
}

impl IngredientLine {
    pub fn new(ingredient: impl Into<String>, measure: impl Into<String>) -> Self {
        Self {
            ingredient: ingredient.into(),
            measure: measure.into(),
        }
    }

    /// Grouping key: the trimmed, lowercased ingredient name.
    pub fn key(&self) -> String {
        self.ingredient.trim().to_lowercase()
    }
}
