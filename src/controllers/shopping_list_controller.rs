use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

use crate::measure::{scale, to_metric_display};
use crate::models::IngredientLine;
use crate::models::api::{Meal, ShoppingEntry};

/// Staples assumed to be in every kitchen. Whole words only, so
/// "peppercorns" and "salted butter" still make the list.
static PANTRY_STAPLES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:water|salt|pepper)\b").expect("staples pattern"));

pub fn is_excluded_from_shopping(ingredient: &str) -> bool {
    PANTRY_STAPLES.is_match(ingredient.trim())
}

/// Scale every measure by `factor`, dropping lines without an ingredient name
pub fn scale_lines(lines: &[IngredientLine], factor: f64) -> Vec<IngredientLine> {
    lines
        .iter()
        .filter(|line| !line.ingredient.trim().is_empty())
        .map(|line| IngredientLine {
            ingredient: line.ingredient.clone(),
            measure: scale(line.measure.trim(), factor),
        })
        .collect()
}

/// Shown in place of the ingredient list when a meal has none.
pub const NO_INGREDIENTS: &str = "No ingredients found.";

/// The full ingredient list for display, staples included
/// Each line reads "<measure with metric> <ingredient>", or just the ingredient
pub fn ingredient_display(lines: &[IngredientLine], factor: f64) -> Vec<String> {
    scale_lines(lines, factor)
        .iter()
        .map(|line| {
            if line.measure.is_empty() {
                line.key()
            } else {
                format!("{} {}", to_metric_display(&line.measure), line.key())
            }
        })
        .collect()
}

/// Group scaled lines by normalized ingredient name, in first-seen order
/// Staples (water, salt, pepper) are left off
pub fn build_shopping_list(lines: &[IngredientLine], factor: f64) -> Vec<ShoppingEntry> {
    let mut entries: IndexMap<String, ShoppingEntry> = IndexMap::new();

    for line in scale_lines(lines, factor) {
        let key = line.key();
        if is_excluded_from_shopping(&key) {
            continue;
        }

        let entry = entries
            .entry(key)
            .or_insert_with_key(|key| ShoppingEntry::new(key.clone()));
        if !line.measure.is_empty() {
            entry.measures.push(line.measure);
        }
    }

    entries.into_values().collect()
}

/// Clipboard text: one rendered entry per line
pub fn shopping_list_text(entries: &[ShoppingEntry]) -> String {
    entries
        .iter()
        .map(ShoppingEntry::render)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Plain-text report of a meal at a serving size: details, numbered
/// instructions, the scaled ingredients and the shopping list
pub fn meal_report(meal: &Meal, servings: u32, factor: f64) -> String {
    let mut report = meal.to_string();

    report.push_str(&format!("\nIngredients ({servings} servings):\n"));
    let lines = ingredient_display(&meal.ingredients, factor);
    if lines.is_empty() {
        report.push_str(&format!("  {NO_INGREDIENTS}\n"));
    }
    for line in lines {
        report.push_str(&format!("  - {line}\n"));
    }

    let entries = build_shopping_list(&meal.ingredients, factor);
    if !entries.is_empty() {
        report.push_str("\nShopping list:\n");
        for entry in entries {
            report.push_str(&format!("  - {entry}\n"));
        }
    }

    report
}
