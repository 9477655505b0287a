use crate::client::{ApiClient, ApiError, CardPayload, ChapterPayload};
use crate::session::StudySession;

/// Owns the session and the gateway, and enforces the reconciliation
/// contract: validate, call the endpoint, merge the authoritative response
/// on success, leave the session untouched (except `ui_error`) on failure.
/// No optimistic updates, no retries.
pub struct StudyController {
    client: ApiClient,
    session: StudySession,
}

impl StudyController {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            session: StudySession::new(),
        }
    }

    pub fn session(&self) -> &StudySession {
        &self.session
    }

    /// Navigation and filtering are pure client state; callers drive them
    /// directly on the session.
    pub fn session_mut(&mut self) -> &mut StudySession {
        &mut self.session
    }

    /// Fetches the full working set. A failure here is fatal to the view;
    /// the session is left as it was so a retry starts from the same state.
    pub async fn load(&mut self) -> Result<(), ApiError> {
        let chapters = self.client.list_chapters().await?;
        let cards = self.client.list_flashcards(None).await?;
        self.session.replace_data(chapters, cards);
        Ok(())
    }

    pub async fn add_card(
        &mut self,
        question: String,
        answer: String,
        category: String,
    ) -> Result<(), ApiError> {
        let chapter_id = self.require_selected_chapter()?;
        let payload = CardPayload {
            question,
            answer,
            category,
            chapter_id,
        };
        match self.client.create_flashcard(&payload).await {
            Ok(card) => {
                self.session.clear_error();
                self.session.card_created(card);
                Ok(())
            }
            Err(err) => {
                self.session.set_error("Failed to add card. Please try again.");
                Err(err)
            }
        }
    }

    pub async fn edit_card(
        &mut self,
        id: i64,
        question: String,
        answer: String,
        category: String,
    ) -> Result<(), ApiError> {
        let chapter_id = self.require_selected_chapter()?;
        let payload = CardPayload {
            question,
            answer,
            category,
            chapter_id,
        };
        match self.client.update_flashcard(id, &payload).await {
            Ok(card) => {
                self.session.clear_error();
                self.session.card_updated(card);
                Ok(())
            }
            Err(err) => {
                self.session
                    .set_error("Failed to update card. Please try again.");
                Err(err)
            }
        }
    }

    pub async fn delete_card(&mut self, id: i64) -> Result<(), ApiError> {
        match self.client.delete_flashcard(id).await {
            Ok(()) => {
                self.session.clear_error();
                self.session.card_deleted(id);
                Ok(())
            }
            Err(err) => {
                self.session
                    .set_error("Failed to delete card. Please try again.");
                Err(err)
            }
        }
    }

    pub async fn add_chapter(
        &mut self,
        title: String,
        description: Option<String>,
    ) -> Result<(), ApiError> {
        let payload = ChapterPayload { title, description };
        match self.client.create_chapter(&payload).await {
            Ok(chapter) => {
                self.session.clear_error();
                self.session.chapter_created(chapter);
                Ok(())
            }
            Err(err) => {
                self.session
                    .set_error("Failed to add chapter. Please try again.");
                Err(err)
            }
        }
    }

    pub async fn edit_chapter(
        &mut self,
        id: &str,
        title: String,
        description: Option<String>,
    ) -> Result<(), ApiError> {
        let payload = ChapterPayload { title, description };
        match self.client.update_chapter(id, &payload).await {
            Ok(chapter) => {
                self.session.clear_error();
                self.session.chapter_updated(chapter);
                Ok(())
            }
            Err(err) => {
                self.session
                    .set_error("Failed to update chapter. Please try again.");
                Err(err)
            }
        }
    }

    pub async fn delete_chapter(&mut self, id: &str) -> Result<(), ApiError> {
        match self.client.delete_chapter(id).await {
            Ok(()) => {
                self.session.clear_error();
                self.session.chapter_deleted(id);
                Ok(())
            }
            Err(err) => {
                self.session
                    .set_error("Failed to delete chapter. Please try again.");
                Err(err)
            }
        }
    }

    fn require_selected_chapter(&mut self) -> Result<String, ApiError> {
        match self.session.selected_chapter() {
            Some(id) => Ok(id.to_string()),
            None => {
                self.session.set_error("No chapter selected.");
                Err(ApiError::Validation("no chapter selected".to_string()))
            }
        }
    }
}
