//! Typed gateway over the CRUD endpoints. Thin by design: every method is
//! one request, one decoded response, no retries.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db::operations::{Chapter, Flashcard};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("HTTP {status}: {message}")]
    Api { status: StatusCode, message: String },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Serialize)]
pub struct ChapterPayload {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CardPayload {
    pub question: String,
    pub answer: String,
    pub category: String,
    #[serde(rename = "chapterId")]
    pub chapter_id: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Deserialize)]
struct MessageBody {
    #[allow(dead_code)]
    message: String,
}

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub async fn list_chapters(&self) -> Result<Vec<Chapter>, ApiError> {
        let resp = self.client.get(self.url("/api/chapters")).send().await?;
        decode(resp).await
    }

    pub async fn get_chapter(&self, id: &str) -> Result<Chapter, ApiError> {
        let resp = self
            .client
            .get(self.url(&format!("/api/chapters/{id}")))
            .send()
            .await?;
        decode(resp).await
    }

    pub async fn create_chapter(&self, payload: &ChapterPayload) -> Result<Chapter, ApiError> {
        let resp = self
            .client
            .post(self.url("/api/chapters"))
            .json(payload)
            .send()
            .await?;
        decode(resp).await
    }

    pub async fn update_chapter(
        &self,
        id: &str,
        payload: &ChapterPayload,
    ) -> Result<Chapter, ApiError> {
        let resp = self
            .client
            .put(self.url(&format!("/api/chapters/{id}")))
            .json(payload)
            .send()
            .await?;
        decode(resp).await
    }

    pub async fn delete_chapter(&self, id: &str) -> Result<(), ApiError> {
        let resp = self
            .client
            .delete(self.url(&format!("/api/chapters/{id}")))
            .send()
            .await?;
        decode::<MessageBody>(resp).await.map(|_| ())
    }

    pub async fn list_flashcards(
        &self,
        chapter_id: Option<&str>,
    ) -> Result<Vec<Flashcard>, ApiError> {
        let mut request = self.client.get(self.url("/api/flashcards"));
        if let Some(chapter_id) = chapter_id {
            request = request.query(&[("chapterId", chapter_id)]);
        }
        let resp = request.send().await?;
        decode(resp).await
    }

    pub async fn get_flashcard(&self, id: i64) -> Result<Flashcard, ApiError> {
        let resp = self
            .client
            .get(self.url(&format!("/api/flashcards/{id}")))
            .send()
            .await?;
        decode(resp).await
    }

    pub async fn create_flashcard(&self, payload: &CardPayload) -> Result<Flashcard, ApiError> {
        let resp = self
            .client
            .post(self.url("/api/flashcards"))
            .json(payload)
            .send()
            .await?;
        decode(resp).await
    }

    pub async fn update_flashcard(
        &self,
        id: i64,
        payload: &CardPayload,
    ) -> Result<Flashcard, ApiError> {
        let resp = self
            .client
            .put(self.url(&format!("/api/flashcards/{id}")))
            .json(payload)
            .send()
            .await?;
        decode(resp).await
    }

    pub async fn delete_flashcard(&self, id: i64) -> Result<(), ApiError> {
        let resp = self
            .client
            .delete(self.url(&format!("/api/flashcards/{id}")))
            .send()
            .await?;
        decode::<MessageBody>(resp).await.map(|_| ())
    }
}

async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp.json::<T>().await?);
    }

    let message = match resp.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => format!("request failed with status {status}"),
    };

    Err(match status {
        StatusCode::BAD_REQUEST => ApiError::Validation(message),
        StatusCode::NOT_FOUND => ApiError::NotFound(message),
        _ => ApiError::Api { status, message },
    })
}
