use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::db::operations::chapters::chapter_exists;
use crate::db::operations::flashcards as ops;
use crate::db::operations::flashcards::FlashcardInput;
use crate::db::operations::Flashcard;
use crate::response::AppError;
use crate::routes::internal_error;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(rename = "chapterId")]
    chapter_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FlashcardRequest {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<String>,
    #[serde(rename = "chapterId")]
    pub chapter_id: Option<String>,
}

#[derive(Serialize)]
pub struct MessageResponse {
    message: &'static str,
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Flashcard>>, AppError> {
    let cards = ops::list_flashcards(state.db().pool(), query.chapter_id.as_deref())
        .await
        .map_err(|err| internal_error("Failed to fetch flashcards", err))?;
    Ok(Json(cards))
}

pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Flashcard>, AppError> {
    let card = ops::get_flashcard(state.db().pool(), id)
        .await
        .map_err(|err| internal_error("Failed to fetch flashcard", err))?
        .ok_or_else(|| AppError::not_found("Flashcard not found"))?;
    Ok(Json(card))
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<FlashcardRequest>,
) -> Result<(StatusCode, Json<Flashcard>), AppError> {
    let input = validate(&payload)?;
    ensure_chapter(&state, input.chapter_id).await?;

    let id = ops::insert_flashcard(state.db().pool(), &input)
        .await
        .map_err(|err| internal_error("Failed to create flashcard", err))?;

    let card = ops::get_flashcard(state.db().pool(), id)
        .await
        .map_err(|err| internal_error("Failed to create flashcard", err))?
        .ok_or_else(|| AppError::internal("Failed to create flashcard"))?;

    tracing::debug!(card = id, chapter = %card.chapter_id, "flashcard created");
    Ok((StatusCode::CREATED, Json(card)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<FlashcardRequest>,
) -> Result<Json<Flashcard>, AppError> {
    let input = validate(&payload)?;
    ensure_chapter(&state, input.chapter_id).await?;

    let updated = ops::update_flashcard(state.db().pool(), id, &input)
        .await
        .map_err(|err| internal_error("Failed to update flashcard", err))?;
    if !updated {
        return Err(AppError::not_found("Flashcard not found"));
    }

    let card = ops::get_flashcard(state.db().pool(), id)
        .await
        .map_err(|err| internal_error("Failed to update flashcard", err))?
        .ok_or_else(|| AppError::internal("Failed to update flashcard"))?;
    Ok(Json(card))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    let deleted = ops::delete_flashcard(state.db().pool(), id)
        .await
        .map_err(|err| internal_error("Failed to delete flashcard", err))?;
    if !deleted {
        return Err(AppError::not_found("Flashcard not found"));
    }

    tracing::debug!(card = id, "flashcard deleted");
    Ok(Json(MessageResponse {
        message: "Flashcard deleted successfully",
    }))
}

fn validate(payload: &FlashcardRequest) -> Result<FlashcardInput<'_>, AppError> {
    let question = required(&payload.question)?;
    let answer = required(&payload.answer)?;
    let category = required(&payload.category)?;
    let chapter_id = required(&payload.chapter_id)?;
    Ok(FlashcardInput {
        question,
        answer,
        category,
        chapter_id,
    })
}

fn required(field: &Option<String>) -> Result<&str, AppError> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| {
            AppError::validation("Question, answer, category, and chapterId are required")
        })
}

async fn ensure_chapter(state: &AppState, chapter_id: &str) -> Result<(), AppError> {
    let exists = chapter_exists(state.db().pool(), chapter_id)
        .await
        .map_err(|err| internal_error("Failed to fetch chapter", err))?;
    if exists {
        Ok(())
    } else {
        Err(AppError::not_found("Chapter not found"))
    }
}
