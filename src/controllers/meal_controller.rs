use std::path::Path;

use sqlx::{Row, SqlitePool};
use tracing::{debug, info};

use crate::error::{FeedMeError, Result};
use crate::models::api::{Meal, MealSummary};
use crate::models::{CatalogMeal, CatalogResponse, IngredientLine, MealRecord};

/// Read meals from a saved catalog lookup or search response
pub async fn read_catalog_file(path: &Path) -> Result<Vec<CatalogMeal>> {
    let body = tokio::fs::read_to_string(path).await?;
    let meals = CatalogResponse::from_json(&body)?.into_meals();

    debug!(path = %path.display(), meals = meals.len(), "read catalog file");
    Ok(meals)
}

/// Fetch a meal by ID with its ingredient lines in catalog order
pub async fn get_meal(pool: &SqlitePool, meal_id: &str) -> Result<Meal> {
    let meal = sqlx::query_as::<_, MealRecord>(
        "SELECT id, name, category, area, instructions, thumbnail, created_at FROM meals WHERE id = ?",
    )
    .bind(meal_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| FeedMeError::MealNotFound(meal_id.to_string()))?;

    let rows = sqlx::query(
        "SELECT ingredient, measure FROM meal_ingredients WHERE meal_id = ? ORDER BY position",
    )
    .bind(meal_id)
    .fetch_all(pool)
    .await?;

    let ingredients = rows
        .iter()
        .map(|row| IngredientLine {
            ingredient: row.get("ingredient"),
            measure: row.get("measure"),
        })
        .collect();

    Ok(Meal {
        id: meal.id,
        name: meal.name,
        category: meal.category,
        area: meal.area,
        instructions: meal.instructions,
        thumbnail: meal.thumbnail,
        ingredients,
        created_at: meal.created_at,
    })
}

/// Store a catalog record locally
/// Importing the same meal again replaces its details and ingredient lines
pub async fn import_meal(pool: &SqlitePool, meal: &CatalogMeal) -> Result<String> {
    let lines = meal.ingredient_lines();
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO meals (id, name, category, area, instructions, thumbnail)
        VALUES (?, ?, ?, ?, ?, ?)
        ON CONFLICT(id) DO UPDATE SET
            name = excluded.name,
            category = excluded.category,
            area = excluded.area,
            instructions = excluded.instructions,
            thumbnail = excluded.thumbnail
        "#,
    )
    .bind(&meal.id)
    .bind(meal.name.trim())
    .bind(&meal.category)
    .bind(&meal.area)
    .bind(&meal.instructions)
    .bind(&meal.thumbnail)
    .execute(&mut *tx)
    .await?;

    sqlx::query("DELETE FROM meal_ingredients WHERE meal_id = ?")
        .bind(&meal.id)
        .execute(&mut *tx)
        .await?;

    for (position, line) in lines.iter().enumerate() {
        sqlx::query(
            "INSERT INTO meal_ingredients (meal_id, position, ingredient, measure) VALUES (?, ?, ?, ?)",
        )
        .bind(&meal.id)
        .bind(position as i64 + 1)
        .bind(&line.ingredient)
        .bind(&line.measure)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    info!(meal_id = %meal.id, name = %meal.name, ingredients = lines.len(), "imported meal");
    Ok(meal.id.clone())
}

/// Find meals using an ingredient
/// Case-insensitive substring match on ingredient names; a blank query matches nothing
pub async fn search_meals(pool: &SqlitePool, ingredient: &str) -> Result<Vec<MealSummary>> {
    let query = ingredient.trim();
    if query.is_empty() {
        return Ok(Vec::new());
    }

    let meals = sqlx::query_as::<_, MealSummary>(
        r#"
        SELECT DISTINCT m.id, m.name, m.thumbnail
        FROM meals m
        JOIN meal_ingredients mi ON mi.meal_id = m.id
        WHERE instr(lower(mi.ingredient), lower(?)) > 0
        ORDER BY m.name
        "#,
    )
    .bind(query)
    .fetch_all(pool)
    .await?;

    Ok(meals)
}
