use sqlx::prelude::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct NoteRecord {
    pub id: i64,
    pub title: String,
    pub ingredients: String,
    pub steps: String,
    pub created_at: String,
    pub updated_at: String,
}
