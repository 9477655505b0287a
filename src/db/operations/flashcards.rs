use serde::{Deserialize, Serialize};
use sqlx::{Row, SqlitePool};

use crate::db::operations::now_iso;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flashcard {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: String,
    pub chapter_id: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Field set for create and update; the store owns id and timestamps.
#[derive(Debug, Clone)]
pub struct FlashcardInput<'a> {
    pub question: &'a str,
    pub answer: &'a str,
    pub category: &'a str,
    pub chapter_id: &'a str,
}

pub async fn list_flashcards(
    pool: &SqlitePool,
    chapter_id: Option<&str>,
) -> Result<Vec<Flashcard>, sqlx::Error> {
    let rows = match chapter_id {
        Some(chapter_id) => {
            sqlx::query(
                "SELECT * FROM flashcards WHERE chapter_id = ?1 ORDER BY created_at ASC, id ASC",
            )
            .bind(chapter_id)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query("SELECT * FROM flashcards ORDER BY created_at ASC, id ASC")
                .fetch_all(pool)
                .await?
        }
    };
    Ok(rows.iter().map(map_flashcard).collect())
}

pub async fn get_flashcard(pool: &SqlitePool, id: i64) -> Result<Option<Flashcard>, sqlx::Error> {
    let row = sqlx::query("SELECT * FROM flashcards WHERE id = ?1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.as_ref().map(map_flashcard))
}

/// Returns the id the store assigned to the new row.
pub async fn insert_flashcard(
    pool: &SqlitePool,
    input: &FlashcardInput<'_>,
) -> Result<i64, sqlx::Error> {
    let now = now_iso();
    let result = sqlx::query(
        r#"
        INSERT INTO flashcards (question, answer, category, chapter_id, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?5)
        "#,
    )
    .bind(input.question)
    .bind(input.answer)
    .bind(input.category)
    .bind(input.chapter_id)
    .bind(&now)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn update_flashcard(
    pool: &SqlitePool,
    id: i64,
    input: &FlashcardInput<'_>,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE flashcards
        SET question = ?1, answer = ?2, category = ?3, chapter_id = ?4, updated_at = ?5
        WHERE id = ?6
        "#,
    )
    .bind(input.question)
    .bind(input.answer)
    .bind(input.category)
    .bind(input.chapter_id)
    .bind(now_iso())
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn delete_flashcard(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM flashcards WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

fn map_flashcard(row: &sqlx::sqlite::SqliteRow) -> Flashcard {
    Flashcard {
        id: row.get("id"),
        question: row.get("question"),
        answer: row.get("answer"),
        category: row.get("category"),
        chapter_id: row.get("chapter_id"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}
