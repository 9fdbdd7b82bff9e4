use std::collections::HashMap;

use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::info;

use crate::error::{FeedMeError, Result};
use crate::models::NoteRecord;
use crate::models::api::{NewNote, Note, NotePatch};

fn into_note(record: NoteRecord, tags: Vec<String>) -> Note {
    Note {
        id: record.id,
        title: record.title,
        ingredients: record.ingredients,
        steps: record.steps,
        tags,
        created_at: record.created_at,
        updated_at: record.updated_at,
    }
}

async fn replace_tags(tx: &mut Transaction<'_, Sqlite>, note_id: i64, tags: &[String]) -> Result<()> {
    sqlx::query("DELETE FROM note_tags WHERE note_id = ?")
        .bind(note_id)
        .execute(&mut **tx)
        .await?;

    for tag in tags {
        sqlx::query("INSERT INTO note_tags (note_id, tag) VALUES (?, ?)")
            .bind(note_id)
            .bind(tag)
            .execute(&mut **tx)
            .await?;
    }

    Ok(())
}

/// Create a new note
/// Returns the stored note with its generated ID and timestamps
pub async fn create_note(pool: &SqlitePool, note: &NewNote) -> Result<Note> {
    let note = note.normalized();
    let mut tx = pool.begin().await?;

    let note_id = sqlx::query("INSERT INTO notes (title, ingredients, steps) VALUES (?, ?, ?)")
        .bind(&note.title)
        .bind(&note.ingredients)
        .bind(&note.steps)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

    replace_tags(&mut tx, note_id, &note.tags).await?;
    tx.commit().await?;

    info!(note_id, title = %note.title, "created note");
    get_note(pool, note_id).await
}

/// Fetch a note by ID with its tags
pub async fn get_note(pool: &SqlitePool, note_id: i64) -> Result<Note> {
    let record = sqlx::query_as::<_, NoteRecord>(
        "SELECT id, title, ingredients, steps, created_at, updated_at FROM notes WHERE id = ?",
    )
    .bind(note_id)
    .fetch_optional(pool)
    .await?
    .ok_or(FeedMeError::NoteNotFound(note_id))?;

    let tags: Vec<String> =
        sqlx::query_scalar("SELECT tag FROM note_tags WHERE note_id = ? ORDER BY id")
            .bind(note_id)
            .fetch_all(pool)
            .await?;

    Ok(into_note(record, tags))
}

/// Get all notes, newest first
pub async fn list_notes(pool: &SqlitePool) -> Result<Vec<Note>> {
    let records = sqlx::query_as::<_, NoteRecord>(
        "SELECT id, title, ingredients, steps, created_at, updated_at FROM notes ORDER BY created_at DESC, id DESC",
    )
    .fetch_all(pool)
    .await?;

    let tag_rows: Vec<(i64, String)> =
        sqlx::query_as("SELECT note_id, tag FROM note_tags ORDER BY id")
            .fetch_all(pool)
            .await?;

    let mut tags: HashMap<i64, Vec<String>> = HashMap::new();
    for (note_id, tag) in tag_rows {
        tags.entry(note_id).or_default().push(tag);
    }

    Ok(records
        .into_iter()
        .map(|record| {
            let note_tags = tags.remove(&record.id).unwrap_or_default();
            into_note(record, note_tags)
        })
        .collect())
}

/// Apply a partial update to a note
/// Unset fields keep their stored value; `updated_at` is always bumped
pub async fn update_note(pool: &SqlitePool, note_id: i64, patch: &NotePatch) -> Result<Note> {
    let current = get_note(pool, note_id).await?;
    let merged = patch.apply(&current);

    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        UPDATE notes
        SET title = ?, ingredients = ?, steps = ?,
            updated_at = strftime('%Y-%m-%d %H:%M:%f', 'now')
        WHERE id = ?
        "#,
    )
    .bind(&merged.title)
    .bind(&merged.ingredients)
    .bind(&merged.steps)
    .bind(note_id)
    .execute(&mut *tx)
    .await?;

    replace_tags(&mut tx, note_id, &merged.tags).await?;
    tx.commit().await?;

    info!(note_id, "updated note");
    get_note(pool, note_id).await
}

/// Delete a note and its tags
/// Returns false when no note had that ID
pub async fn delete_note(pool: &SqlitePool, note_id: i64) -> Result<bool> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM note_tags WHERE note_id = ?")
        .bind(note_id)
        .execute(&mut *tx)
        .await?;

    let deleted = sqlx::query("DELETE FROM notes WHERE id = ?")
        .bind(note_id)
        .execute(&mut *tx)
        .await?
        .rows_affected()
        > 0;

    tx.commit().await?;

    if deleted {
        info!(note_id, "deleted note");
    }
    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::test_fixtures::test_db;
    use rstest::*;

    fn new_note(title: &str, tags: &[&str]) -> NewNote {
        NewNote {
            title: title.to_string(),
            ingredients: "flour\nwater".to_string(),
            steps: "mix".to_string(),
            tags: tags.iter().map(|tag| tag.to_string()).collect(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn test_create_note(#[future] test_db: SqlitePool) {
        let pool = test_db.await;

        let note = create_note(&pool, &new_note("  Focaccia ", &["bread", " ", " weekend "]))
            .await
            .expect("Failed to create note");

        assert!(note.id > 0);
        assert_eq!(note.title, "Focaccia");
        assert_eq!(note.tags, vec!["bread", "weekend"]);
        assert!(!note.created_at.is_empty());
        assert_eq!(note.created_at, note.updated_at);
    }

    #[rstest]
    #[tokio::test]
    async fn test_get_note_not_found(#[future] test_db: SqlitePool) {
        let pool = test_db.await;

        let result = get_note(&pool, 999).await;

        match result {
            Err(FeedMeError::NoteNotFound(id)) => assert_eq!(id, 999),
            _ => panic!("Expected NoteNotFound error"),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn test_list_notes_newest_first(#[future] test_db: SqlitePool) {
        let pool = test_db.await;

        let first = create_note(&pool, &new_note("First", &["a"]))
            .await
            .expect("Failed to create first note");
        let second = create_note(&pool, &new_note("Second", &["b", "c"]))
            .await
            .expect("Failed to create second note");

        let notes = list_notes(&pool).await.expect("Failed to list notes");

        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].id, second.id);
        assert_eq!(notes[0].tags, vec!["b", "c"]);
        assert_eq!(notes[1].id, first.id);
        assert_eq!(notes[1].tags, vec!["a"]);
    }

    #[rstest]
    #[tokio::test]
    async fn test_list_notes_empty(#[future] test_db: SqlitePool) {
        let pool = test_db.await;

        let notes = list_notes(&pool).await.expect("Failed to list notes");

        assert!(notes.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn test_update_note(#[future] test_db: SqlitePool) {
        let pool = test_db.await;

        let note = create_note(&pool, &new_note("Focaccia", &["bread"]))
            .await
            .expect("Failed to create note");

        let patch = NotePatch {
            steps: Some(" mix, proof, bake ".to_string()),
            tags: Some(vec!["bread".to_string(), "oven".to_string()]),
            ..Default::default()
        };
        let updated = update_note(&pool, note.id, &patch)
            .await
            .expect("Failed to update note");

        assert_eq!(updated.title, "Focaccia");
        assert_eq!(updated.steps, "mix, proof, bake");
        assert_eq!(updated.tags, vec!["bread", "oven"]);
        assert_eq!(updated.created_at, note.created_at);
        assert!(updated.updated_at >= note.updated_at);
    }

    #[rstest]
    #[tokio::test]
    async fn test_update_missing_note(#[future] test_db: SqlitePool) {
        let pool = test_db.await;

        let result = update_note(&pool, 42, &NotePatch::default()).await;

        assert!(matches!(result, Err(FeedMeError::NoteNotFound(42))));
    }

    #[rstest]
    #[tokio::test]
    async fn test_delete_note(#[future] test_db: SqlitePool) {
        let pool = test_db.await;

        let note = create_note(&pool, &new_note("Focaccia", &["bread"]))
            .await
            .expect("Failed to create note");

        assert!(delete_note(&pool, note.id).await.expect("Failed to delete"));
        assert!(!delete_note(&pool, note.id).await.expect("Failed to delete twice"));

        let tag_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM note_tags")
            .fetch_one(&pool)
            .await
            .expect("Failed to count tags");
        assert_eq!(tag_count, 0);
    }
}
