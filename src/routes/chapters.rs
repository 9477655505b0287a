use std::sync::atomic::{AtomicI64, Ordering};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::db::operations::chapters as ops;
use crate::db::operations::Chapter;
use crate::response::AppError;
use crate::routes::internal_error;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChapterRequest {
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Serialize)]
pub struct MessageResponse {
    message: &'static str,
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Chapter>>, AppError> {
    let chapters = ops::list_chapters(state.db().pool())
        .await
        .map_err(|err| internal_error("Failed to fetch chapters", err))?;
    Ok(Json(chapters))
}

pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Chapter>, AppError> {
    let chapter = ops::get_chapter(state.db().pool(), &id)
        .await
        .map_err(|err| internal_error("Failed to fetch chapter", err))?
        .ok_or_else(|| AppError::not_found("Chapter not found"))?;
    Ok(Json(chapter))
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<ChapterRequest>,
) -> Result<(StatusCode, Json<Chapter>), AppError> {
    let (title, description) = validate(&payload)?;

    let id = next_chapter_token();
    ops::insert_chapter(state.db().pool(), &id, title, description)
        .await
        .map_err(|err| internal_error("Failed to create chapter", err))?;

    // Serve the authoritative row so clients see store-computed fields.
    let chapter = ops::get_chapter(state.db().pool(), &id)
        .await
        .map_err(|err| internal_error("Failed to create chapter", err))?
        .ok_or_else(|| AppError::internal("Failed to create chapter"))?;

    tracing::debug!(chapter = %id, "chapter created");
    Ok((StatusCode::CREATED, Json(chapter)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ChapterRequest>,
) -> Result<Json<Chapter>, AppError> {
    let (title, description) = validate(&payload)?;

    let updated = ops::update_chapter(state.db().pool(), &id, title, description)
        .await
        .map_err(|err| internal_error("Failed to update chapter", err))?;
    if !updated {
        return Err(AppError::not_found("Chapter not found"));
    }

    let chapter = ops::get_chapter(state.db().pool(), &id)
        .await
        .map_err(|err| internal_error("Failed to update chapter", err))?
        .ok_or_else(|| AppError::internal("Failed to update chapter"))?;
    Ok(Json(chapter))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let deleted = ops::delete_chapter(state.db().pool(), &id)
        .await
        .map_err(|err| internal_error("Failed to delete chapter", err))?;
    if !deleted {
        return Err(AppError::not_found("Chapter not found"));
    }

    tracing::debug!(chapter = %id, "chapter deleted");
    Ok(Json(MessageResponse {
        message: "Chapter deleted successfully",
    }))
}

fn validate(payload: &ChapterRequest) -> Result<(&str, Option<&str>), AppError> {
    let title = payload
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::validation("Title is required"))?;
    Ok((title, payload.description.as_deref()))
}

/// Chapter ids are opaque timestamp tokens. The counter bumps the millisecond
/// when two creates land in the same one, keeping tokens unique per process.
fn next_chapter_token() -> String {
    static LAST_MS: AtomicI64 = AtomicI64::new(0);
    let mut now = Utc::now().timestamp_millis();
    loop {
        let last = LAST_MS.load(Ordering::SeqCst);
        if now <= last {
            now = last + 1;
        }
        if LAST_MS
            .compare_exchange(last, now, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
        {
            return format!("chapter-{now}");
        }
    }
}
