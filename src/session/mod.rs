//! Study session state machine.
//!
//! One `StudySession` owns the in-memory working set (chapters, cards) and
//! the current selection (chapter, category filter, card index, flip state).
//! Derived views are recomputed on every query, never cached. All methods
//! here are synchronous and side-effect free outside `self`; the round trips
//! that keep the working set consistent with the store live in
//! [`controller::StudyController`].

pub mod controller;

pub use controller::StudyController;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::db::operations::{Chapter, Flashcard};

/// Sentinel meaning "no category filter".
pub const ALL_CATEGORIES: &str = "All";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudyMode {
    Sequential,
    Random,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StudySession {
    chapters: Vec<Chapter>,
    cards: Vec<Flashcard>,
    selected_chapter: Option<String>,
    selected_category: String,
    study_mode: StudyMode,
    current_index: usize,
    is_flipped: bool,
    ui_error: Option<String>,
}

impl Default for StudySession {
    fn default() -> Self {
        Self::new()
    }
}

impl StudySession {
    pub fn new() -> Self {
        Self {
            chapters: Vec::new(),
            cards: Vec::new(),
            selected_chapter: None,
            selected_category: ALL_CATEGORIES.to_string(),
            study_mode: StudyMode::Sequential,
            current_index: 0,
            is_flipped: false,
            ui_error: None,
        }
    }

    /// Replaces the whole working set, e.g. after the initial load. Keeps the
    /// current chapter selection when it still exists, otherwise falls back
    /// to the first chapter.
    pub fn replace_data(&mut self, chapters: Vec<Chapter>, cards: Vec<Flashcard>) {
        self.chapters = chapters;
        self.cards = cards;

        let selection_valid = self
            .selected_chapter
            .as_deref()
            .is_some_and(|id| self.chapters.iter().any(|c| c.id == id));
        if !selection_valid {
            self.selected_chapter = self.chapters.first().map(|c| c.id.clone());
            self.selected_category = ALL_CATEGORIES.to_string();
        }
        self.current_index = 0;
        self.is_flipped = false;
        self.ui_error = None;
    }

    // --- queries -----------------------------------------------------------

    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    pub fn cards(&self) -> &[Flashcard] {
        &self.cards
    }

    pub fn selected_chapter(&self) -> Option<&str> {
        self.selected_chapter.as_deref()
    }

    pub fn selected_category(&self) -> &str {
        &self.selected_category
    }

    pub fn study_mode(&self) -> StudyMode {
        self.study_mode
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn is_flipped(&self) -> bool {
        self.is_flipped
    }

    pub fn ui_error(&self) -> Option<&str> {
        self.ui_error.as_deref()
    }

    pub fn current_chapter(&self) -> Option<&Chapter> {
        let id = self.selected_chapter.as_deref()?;
        self.chapters.iter().find(|c| c.id == id)
    }

    /// Cards of the selected chapter, in working-set order.
    pub fn chapter_cards(&self) -> Vec<&Flashcard> {
        match self.selected_chapter.as_deref() {
            Some(id) => self.cards.iter().filter(|c| c.chapter_id == id).collect(),
            None => Vec::new(),
        }
    }

    /// "All" followed by the chapter's distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<String> {
        let mut categories = vec![ALL_CATEGORIES.to_string()];
        for card in self.chapter_cards() {
            if !categories.iter().any(|c| c == &card.category) {
                categories.push(card.category.clone());
            }
        }
        categories
    }

    /// The only list navigation indexes into: chapter cards narrowed by the
    /// active category filter.
    pub fn filtered_cards(&self) -> Vec<&Flashcard> {
        self.cards
            .iter()
            .filter(|c| self.matches_filter(c))
            .collect()
    }

    pub fn current_card(&self) -> Option<&Flashcard> {
        self.filtered_cards().get(self.current_index).copied()
    }

    /// (1-based position, total) for the progress indicator; None when the
    /// filtered list is empty.
    pub fn progress(&self) -> Option<(usize, usize)> {
        let total = self.filtered_len();
        (total > 0).then(|| (self.current_index + 1, total))
    }

    fn filtered_len(&self) -> usize {
        self.cards.iter().filter(|c| self.matches_filter(c)).count()
    }

    fn matches_filter(&self, card: &Flashcard) -> bool {
        self.selected_chapter.as_deref() == Some(card.chapter_id.as_str())
            && (self.selected_category == ALL_CATEGORIES
                || self.selected_category == card.category)
    }

    // --- transitions -------------------------------------------------------

    /// Selects a loaded chapter and resets navigation. An unknown id leaves
    /// the selection unchanged and records an error.
    pub fn select_chapter(&mut self, id: &str) {
        if !self.chapters.iter().any(|c| c.id == id) {
            self.ui_error = Some(format!("Unknown chapter: {id}"));
            return;
        }
        self.selected_chapter = Some(id.to_string());
        self.selected_category = ALL_CATEGORIES.to_string();
        self.current_index = 0;
        self.is_flipped = false;
    }

    pub fn select_category(&mut self, category: impl Into<String>) {
        self.selected_category = category.into();
        self.current_index = 0;
        self.is_flipped = false;
    }

    /// Advances within the filtered list; no-op at the last card.
    pub fn next(&mut self) {
        if self.current_index + 1 < self.filtered_len() {
            self.current_index += 1;
            self.is_flipped = false;
        }
    }

    /// Retreats within the filtered list; no-op at the first card.
    pub fn prev(&mut self) {
        if self.current_index > 0 {
            self.current_index -= 1;
            self.is_flipped = false;
        }
    }

    pub fn flip(&mut self) {
        self.is_flipped = !self.is_flipped;
    }

    pub fn reset(&mut self) {
        self.current_index = 0;
        self.is_flipped = false;
    }

    pub fn toggle_study_mode(&mut self) {
        self.study_mode = match self.study_mode {
            StudyMode::Sequential => StudyMode::Random,
            StudyMode::Random => StudyMode::Sequential,
        };
    }

    /// Uniformly permutes the filtered cards in place. The shuffled cards are
    /// written back into the slots they occupied in the backing collection,
    /// so cards outside the filter keep their positions. Not persisted; a
    /// reload restores store order.
    pub fn shuffle(&mut self) {
        self.shuffle_with(&mut rand::rng());
    }

    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let slots: Vec<usize> = (0..self.cards.len())
            .filter(|&i| self.matches_filter(&self.cards[i]))
            .collect();

        let mut picked: Vec<Flashcard> = slots.iter().map(|&i| self.cards[i].clone()).collect();
        picked.shuffle(rng);

        for (slot, card) in slots.into_iter().zip(picked) {
            self.cards[slot] = card;
        }

        self.current_index = 0;
        self.is_flipped = false;
    }

    // --- confirmed merges --------------------------------------------------
    //
    // Applied only after the store acknowledged the mutation; each takes the
    // authoritative response, never the submitted payload.

    pub fn card_created(&mut self, card: Flashcard) {
        self.cards.push(card);
    }

    pub fn card_updated(&mut self, card: Flashcard) {
        if let Some(existing) = self.cards.iter_mut().find(|c| c.id == card.id) {
            *existing = card;
        }
        self.clamp_index();
    }

    pub fn card_deleted(&mut self, id: i64) {
        let was_visible = self
            .cards
            .iter()
            .find(|c| c.id == id)
            .is_some_and(|c| self.matches_filter(c));
        let len_before = self.filtered_len();

        self.cards.retain(|c| c.id != id);

        // Removing the card at or after the last visible index would leave
        // the view pointing past the end; clamp to the new last card.
        if was_visible && self.current_index + 1 >= len_before {
            self.current_index = len_before.saturating_sub(2);
        }
        self.clamp_index();
    }

    pub fn chapter_created(&mut self, chapter: Chapter) {
        let id = chapter.id.clone();
        self.chapters.push(chapter);
        self.select_chapter(&id);
    }

    pub fn chapter_updated(&mut self, chapter: Chapter) {
        if let Some(existing) = self.chapters.iter_mut().find(|c| c.id == chapter.id) {
            *existing = chapter;
        }
    }

    /// Removes the chapter and, mirroring the store's cascade, every card it
    /// owns. A deleted selection moves to the first remaining chapter.
    pub fn chapter_deleted(&mut self, id: &str) {
        self.chapters.retain(|c| c.id != id);
        self.cards.retain(|c| c.chapter_id != id);

        if self.selected_chapter.as_deref() == Some(id) {
            self.selected_chapter = self.chapters.first().map(|c| c.id.clone());
            self.selected_category = ALL_CATEGORIES.to_string();
            self.current_index = 0;
            self.is_flipped = false;
        }
    }

    // --- errors ------------------------------------------------------------

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.ui_error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.ui_error = None;
    }

    fn clamp_index(&mut self) {
        let len = self.filtered_len();
        if len > 0 && self.current_index >= len {
            self.current_index = len - 1;
        } else if len == 0 {
            self.current_index = 0;
        }
    }
}
