use serde::{Deserialize, Serialize};
use sqlx::{Row, SqlitePool};

use crate::db::operations::now_iso;

/// Chapter as stored and as served. `cards` is computed at read time, never
/// written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub cards: i64,
    pub created_at: String,
    pub updated_at: String,
}

const SELECT_WITH_COUNT: &str = r#"
    SELECT
        c.id,
        c.title,
        c.description,
        c.is_active,
        c.created_at,
        c.updated_at,
        COUNT(f.id) AS cards
    FROM chapters c
    LEFT JOIN flashcards f ON f.chapter_id = c.id
"#;

pub async fn list_chapters(pool: &SqlitePool) -> Result<Vec<Chapter>, sqlx::Error> {
    let rows = sqlx::query(&format!(
        "{SELECT_WITH_COUNT} GROUP BY c.id ORDER BY c.created_at ASC, c.id ASC"
    ))
    .fetch_all(pool)
    .await?;
    Ok(rows.iter().map(map_chapter).collect())
}

pub async fn get_chapter(pool: &SqlitePool, id: &str) -> Result<Option<Chapter>, sqlx::Error> {
    let row = sqlx::query(&format!("{SELECT_WITH_COUNT} WHERE c.id = ?1 GROUP BY c.id"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.as_ref().map(map_chapter))
}

pub async fn chapter_exists(pool: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
    let row = sqlx::query("SELECT id FROM chapters WHERE id = ?1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.is_some())
}

pub async fn insert_chapter(
    pool: &SqlitePool,
    id: &str,
    title: &str,
    description: Option<&str>,
) -> Result<(), sqlx::Error> {
    let now = now_iso();
    sqlx::query(
        r#"
        INSERT INTO chapters (id, title, description, is_active, created_at, updated_at)
        VALUES (?1, ?2, ?3, 1, ?4, ?4)
        "#,
    )
    .bind(id)
    .bind(title)
    .bind(description)
    .bind(&now)
    .execute(pool)
    .await?;
    Ok(())
}

/// Returns false when no chapter with `id` exists.
pub async fn update_chapter(
    pool: &SqlitePool,
    id: &str,
    title: &str,
    description: Option<&str>,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE chapters SET title = ?1, description = ?2, updated_at = ?3 WHERE id = ?4",
    )
    .bind(title)
    .bind(description)
    .bind(now_iso())
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Cascade removal of owned flashcards is handled by the store's foreign key.
pub async fn delete_chapter(pool: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM chapters WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

fn map_chapter(row: &sqlx::sqlite::SqliteRow) -> Chapter {
    Chapter {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        is_active: row.get::<i64, _>("is_active") != 0,
        cards: row.get("cards"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}
