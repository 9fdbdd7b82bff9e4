use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::{CatalogMeal, IngredientLine};

/// A step number such as "2." inside a line of instructions. The character
/// after the dot must not be a digit, so "2.5 cups" is left alone.
static INLINE_STEP_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+(\d+\.)(?:\D|$)").expect("inline step pattern"));
static LEADING_STEP_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.(?:\D|$)").expect("leading step pattern"));

/// A meal with its ingredient lines in catalog order.
#[derive(Debug, Clone)]
pub struct Meal {
    pub id: String,
    pub name: String,
    pub category: Option<String>,
    pub area: Option<String>,
    pub instructions: Option<String>,
    pub thumbnail: Option<String>,
    pub ingredients: Vec<IngredientLine>,
    pub created_at: String,
}

/// Search result row.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct MealSummary {
    pub id: String,
    pub name: String,
    pub thumbnail: Option<String>,
}

impl Meal {
    /// The instructions as separate steps, see [`instruction_steps`].
    pub fn steps(&self) -> Vec<String> {
        self.instructions
            .as_deref()
            .map(instruction_steps)
            .unwrap_or_default()
    }
}

/// Splits free-text instructions into steps.
///
/// Steps are separated by line breaks (`\r\n` or `\n`) and by inline step
/// numbers ("1. Mix. 2. Bake"). Existing numbering is removed, blank steps
/// are dropped and every step ends with a period.
pub fn instruction_steps(instructions: &str) -> Vec<String> {
    let mut pieces = Vec::new();
    for line in instructions.lines() {
        let mut start = 0;
        for caps in INLINE_STEP_NUMBER.captures_iter(line) {
            if let Some(number) = caps.get(1) {
                pieces.push(&line[start..number.start()]);
                start = number.start();
            }
        }
        pieces.push(&line[start..]);
    }

    pieces
        .into_iter()
        .map(|piece| strip_step_number(piece.trim()))
        .filter(|step| !step.is_empty())
        .map(|step| {
            if step.ends_with('.') {
                step.to_string()
            } else {
                format!("{step}.")
            }
        })
        .collect()
}

fn strip_step_number(step: &str) -> &str {
    if !LEADING_STEP_NUMBER.is_match(step) {
        return step;
    }
    match step.find('.') {
        Some(dot) => step[dot + 1..].trim_start(),
        None => step,
    }
}

impl From<&CatalogMeal> for Meal {
    fn from(meal: &CatalogMeal) -> Self {
        Self {
            id: meal.id.clone(),
            name: meal.name.trim().to_string(),
            category: meal.category.clone(),
            area: meal.area.clone(),
            instructions: meal.instructions.clone(),
            thumbnail: meal.thumbnail.clone(),
            ingredients: meal.ingredient_lines(),
            created_at: String::new(),
        }
    }
}

impl fmt::Display for Meal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Meal: {}", self.name)?;
        writeln!(f, "ID: {}", self.id)?;

        let origin: Vec<&str> = [self.category.as_deref(), self.area.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        if !origin.is_empty() {
            writeln!(f, "Category: {}", origin.join(", "))?;
        }

        let steps = self.steps();
        if !steps.is_empty() {
            writeln!(f, "\nInstructions:")?;
            for (number, step) in steps.iter().enumerate() {
                writeln!(f, "{}. {}", number + 1, step)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    fn sample_meal() -> Meal {
        Meal {
            id: "52772".to_string(),
            name: "Teriyaki Chicken Casserole".to_string(),
            category: Some("Chicken".to_string()),
            area: Some("Japanese".to_string()),
            instructions: Some("Preheat oven to 350F.\n".to_string()),
            thumbnail: None,
            ingredients: vec![IngredientLine::new("soy sauce", "3/4 cup")],
            created_at: String::new(),
        }
    }

    #[test]
    fn test_meal_display_with_all_fields() {
        let output = sample_meal().to_string();

        assert!(output.contains("Meal: Teriyaki Chicken Casserole"));
        assert!(output.contains("ID: 52772"));
        assert!(output.contains("Category: Chicken, Japanese"));
        assert!(output.contains("Instructions:\n1. Preheat oven to 350F.\n"));
    }

    #[test]
    fn test_meal_display_without_optional_fields() {
        let meal = Meal {
            category: None,
            area: None,
            instructions: None,
            ..sample_meal()
        };

        let output = meal.to_string();

        assert!(output.contains("Meal: Teriyaki Chicken Casserole"));
        assert!(!output.contains("Category:"));
        assert!(!output.contains("Instructions:"));
    }

    #[rstest]
    #[case("Preheat oven.\r\nMix flour\r\n\r\nBake", vec!["Preheat oven.", "Mix flour.", "Bake."])]
    #[case("1. Mix. 2. Bake", vec!["Mix.", "Bake."])]
    #[case("1.Whisk the eggs\n2. Fold in flour", vec!["Whisk the eggs.", "Fold in flour."])]
    #[case("Add 2.5 cups flour", vec!["Add 2.5 cups flour."])]
    #[case("Serve warm", vec!["Serve warm."])]
    #[case("  \n\n ", vec![])]
    fn test_instruction_steps(#[case] instructions: &str, #[case] expected: Vec<&str>) {
        assert_eq!(instruction_steps(instructions), expected);
    }

    #[test]
    fn test_meal_display_numbers_steps() {
        let meal = Meal {
            instructions: Some("STEP one: soak rice\r\n2. Simmer 20 minutes. 3. Rest".to_string()),
            ..sample_meal()
        };

        let output = meal.to_string();

        assert!(output.contains(
            "Instructions:\n1. STEP one: soak rice.\n2. Simmer 20 minutes.\n3. Rest.\n"
        ));
    }

    #[test]
    fn test_meal_without_instructions_has_no_steps() {
        let meal = Meal {
            instructions: None,
            ..sample_meal()
        };

        assert!(meal.steps().is_empty());
    }
}
