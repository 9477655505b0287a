pub mod chapters;
pub mod flashcards;

pub use chapters::Chapter;
pub use flashcards::Flashcard;

use chrono::{SecondsFormat, Utc};

pub(crate) fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
