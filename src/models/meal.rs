use sqlx::prelude::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct MealRecord {
    pub id: String,
    pub name: String,
    pub category: Option<String>,
    pub area: Option<String>,
    pub instructions: Option<String>,
    pub thumbnail: Option<String>,
    pub created_at: String,
}
