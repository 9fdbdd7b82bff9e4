use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use super::IngredientLine;

/// The catalog numbers ingredient slots 1 through 20.
pub const MAX_INGREDIENT_SLOTS: usize = 20;

/// A meal record in the shape returned by the recipe catalog's lookup endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogMeal {
    #[serde(rename = "idMeal")]
    pub id: String,
    #[serde(rename = "strMeal")]
    pub name: String,
    #[serde(rename = "strCategory", default)]
    pub category: Option<String>,
    #[serde(rename = "strArea", default)]
    pub area: Option<String>,
    #[serde(rename = "strInstructions", default)]
    pub instructions: Option<String>,
    #[serde(rename = "strMealThumb", default)]
    pub thumbnail: Option<String>,
    /// Everything else, including the numbered `strIngredientN`/`strMeasureN` slots.
    #[serde(flatten)]
    slots: HashMap<String, Value>,
}

/// Body of a catalog lookup or search response. `meals` is `null` when
/// nothing matched.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogResponse {
    pub meals: Option<Vec<CatalogMeal>>,
}

impl CatalogResponse {
    pub fn from_json(body: &str) -> serde_json::Result<Self> {
        serde_json::from_str(body)
    }

    pub fn into_meals(self) -> Vec<CatalogMeal> {
        self.meals.unwrap_or_default()
    }
}

impl CatalogMeal {
    fn slot(&self, prefix: &str, index: usize) -> Option<&str> {
        self.slots
            .get(&format!("{prefix}{index}"))
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    /// Collects the numbered slots into an ordered list of ingredient lines.
    ///
    /// Slots with a blank or missing ingredient name are skipped along with
    /// their measure; a missing measure becomes an empty string.
    pub fn ingredient_lines(&self) -> Vec<IngredientLine> {
        (1..=MAX_INGREDIENT_SLOTS)
            .filter_map(|index| {
                let ingredient = self.slot("strIngredient", index)?;
                let measure = self.slot("strMeasure", index).unwrap_or_default();
                Some(IngredientLine::new(ingredient, measure))
            })
            .collect()
    }
}
