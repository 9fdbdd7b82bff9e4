use rstest::*;
use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};

use super::IngredientLine;

/// Test fixture that creates an in-memory SQLite database with migrations applied
///
/// Shared by the model and controller tests so every test starts from the
/// same schema.
#[fixture]
pub async fn test_db() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// The water/flour/flour lines used by the shopping list scenarios.
#[fixture]
pub fn flour_and_water() -> Vec<IngredientLine> {
    vec![
        IngredientLine::new("Water", "1 cup"),
        IngredientLine::new("flour", "2 cups"),
        IngredientLine::new("Flour", "1/2 cup"),
    ]
}
