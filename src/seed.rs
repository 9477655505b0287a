use sqlx::Row;

use crate::db::operations::chapters::insert_chapter;
use crate::db::operations::flashcards::{insert_flashcard, FlashcardInput};
use crate::db::Database;

struct SeedChapter {
    id: &'static str,
    title: &'static str,
    description: &'static str,
}

struct SeedCard {
    question: &'static str,
    answer: &'static str,
    category: &'static str,
    chapter_id: &'static str,
}

const DEFAULT_CHAPTERS: &[SeedChapter] = &[
    SeedChapter {
        id: "chapter-1",
        title: "Chapter 1: Introduction",
        description: "Basic concepts and fundamentals to get you started",
    },
    SeedChapter {
        id: "chapter-2",
        title: "Chapter 2: Core Concepts",
        description: "Essential building blocks and key principles",
    },
    SeedChapter {
        id: "chapter-3",
        title: "Chapter 3: Advanced Topics",
        description: "More complex concepts and applications",
    },
    SeedChapter {
        id: "chapter-4",
        title: "Chapter 4: Expert Level",
        description: "Advanced techniques and specialized knowledge",
    },
];

const DEFAULT_CARDS: &[SeedCard] = &[
    SeedCard {
        question: "What is the capital of France?",
        answer: "Paris",
        category: "Geography",
        chapter_id: "chapter-1",
    },
    SeedCard {
        question: "What is 2 + 2?",
        answer: "4",
        category: "Math",
        chapter_id: "chapter-1",
    },
    SeedCard {
        question: "What is the largest planet in our solar system?",
        answer: "Jupiter",
        category: "Science",
        chapter_id: "chapter-1",
    },
    SeedCard {
        question: "Who wrote \"Romeo and Juliet\"?",
        answer: "William Shakespeare",
        category: "Literature",
        chapter_id: "chapter-1",
    },
    SeedCard {
        question: "What is the chemical symbol for gold?",
        answer: "Au",
        category: "Science",
        chapter_id: "chapter-1",
    },
    SeedCard {
        question: "What is the speed of light?",
        answer: "299,792,458 meters per second",
        category: "Science",
        chapter_id: "chapter-2",
    },
    SeedCard {
        question: "What year did World War II end?",
        answer: "1945",
        category: "History",
        chapter_id: "chapter-2",
    },
    SeedCard {
        question: "What is the square root of 144?",
        answer: "12",
        category: "Math",
        chapter_id: "chapter-2",
    },
    SeedCard {
        question: "What is the capital of Japan?",
        answer: "Tokyo",
        category: "Geography",
        chapter_id: "chapter-2",
    },
    SeedCard {
        question: "Who painted the Mona Lisa?",
        answer: "Leonardo da Vinci",
        category: "Art",
        chapter_id: "chapter-2",
    },
    SeedCard {
        question: "What is the theory of relativity?",
        answer: "Einstein's theory that space and time are relative",
        category: "Science",
        chapter_id: "chapter-3",
    },
    SeedCard {
        question: "What is the derivative of x²?",
        answer: "2x",
        category: "Math",
        chapter_id: "chapter-3",
    },
    SeedCard {
        question: "What is the largest ocean on Earth?",
        answer: "Pacific Ocean",
        category: "Geography",
        chapter_id: "chapter-3",
    },
    SeedCard {
        question: "Who wrote \"Pride and Prejudice\"?",
        answer: "Jane Austen",
        category: "Literature",
        chapter_id: "chapter-3",
    },
    SeedCard {
        question: "What is the atomic number of carbon?",
        answer: "6",
        category: "Science",
        chapter_id: "chapter-3",
    },
    SeedCard {
        question: "What is quantum entanglement?",
        answer: "When particles become correlated regardless of distance",
        category: "Science",
        chapter_id: "chapter-4",
    },
    SeedCard {
        question: "What is the Riemann Hypothesis?",
        answer: "A conjecture about the distribution of prime numbers",
        category: "Math",
        chapter_id: "chapter-4",
    },
    SeedCard {
        question: "What is the capital of Brazil?",
        answer: "Brasília",
        category: "Geography",
        chapter_id: "chapter-4",
    },
    SeedCard {
        question: "Who wrote \"The Divine Comedy\"?",
        answer: "Dante Alighieri",
        category: "Literature",
        chapter_id: "chapter-4",
    },
    SeedCard {
        question: "What is the molecular formula for glucose?",
        answer: "C₆H₁₂O₆",
        category: "Science",
        chapter_id: "chapter-4",
    },
];

/// Populates an empty store with the default study content. A store with any
/// chapter at all is left alone.
pub async fn seed_defaults(db: &Database) {
    let existing: i64 = match sqlx::query("SELECT COUNT(*) AS count FROM chapters")
        .fetch_one(db.pool())
        .await
    {
        Ok(row) => row.get("count"),
        Err(err) => {
            tracing::warn!(error = %err, "seed probe failed");
            return;
        }
    };

    if existing > 0 {
        tracing::debug!(chapters = existing, "store already has content, skipping seed");
        return;
    }

    for chapter in DEFAULT_CHAPTERS {
        if let Err(err) =
            insert_chapter(db.pool(), chapter.id, chapter.title, Some(chapter.description)).await
        {
            tracing::warn!(error = %err, chapter = chapter.id, "failed to seed chapter");
            return;
        }
    }

    for card in DEFAULT_CARDS {
        let input = FlashcardInput {
            question: card.question,
            answer: card.answer,
            category: card.category,
            chapter_id: card.chapter_id,
        };
        if let Err(err) = insert_flashcard(db.pool(), &input).await {
            tracing::warn!(error = %err, "failed to seed flashcard");
            return;
        }
    }

    tracing::info!(
        chapters = DEFAULT_CHAPTERS.len(),
        cards = DEFAULT_CARDS.len(),
        "seeded default study content"
    );
}
