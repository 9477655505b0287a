//! Property-based tests for the study session state machine.
//!
//! Invariants under test:
//! - `current_index` stays inside `[0, filtered len - 1]` whenever the
//!   filtered list is non-empty, across arbitrary transition sequences.
//! - `flip` is an involution.
//! - `shuffle` permutes the filtered cards without changing their multiset
//!   and without touching cards outside the filter.

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use flashdeck_backend::db::operations::{Chapter, Flashcard};
use flashdeck_backend::session::StudySession;

const CHAPTER_IDS: [&str; 3] = ["c1", "c2", "c3"];
const CATEGORIES: [&str; 3] = ["Math", "Science", "History"];

fn chapter(id: &str) -> Chapter {
    Chapter {
        id: id.to_string(),
        title: format!("Chapter {id}"),
        description: None,
        is_active: true,
        cards: 0,
        created_at: "2024-01-01T00:00:00.000Z".to_string(),
        updated_at: "2024-01-01T00:00:00.000Z".to_string(),
    }
}

fn card(id: i64, chapter_idx: usize, category_idx: usize) -> Flashcard {
    Flashcard {
        id,
        question: format!("Q{id}"),
        answer: format!("A{id}"),
        category: CATEGORIES[category_idx % CATEGORIES.len()].to_string(),
        chapter_id: CHAPTER_IDS[chapter_idx % CHAPTER_IDS.len()].to_string(),
        created_at: "2024-01-01T00:00:00.000Z".to_string(),
        updated_at: "2024-01-01T00:00:00.000Z".to_string(),
    }
}

#[derive(Debug, Clone)]
enum Op {
    Next,
    Prev,
    Flip,
    Reset,
    SelectChapter(usize),
    SelectCategory(usize),
    Shuffle(u64),
    DeleteCard(usize),
}

fn arb_working_set() -> impl Strategy<Value = (Vec<Chapter>, Vec<Flashcard>)> {
    prop::collection::vec((0usize..3, 0usize..3), 0..25).prop_map(|specs| {
        let chapters = CHAPTER_IDS.iter().map(|id| chapter(id)).collect();
        let cards = specs
            .into_iter()
            .enumerate()
            .map(|(i, (chapter_idx, category_idx))| card(i as i64 + 1, chapter_idx, category_idx))
            .collect();
        (chapters, cards)
    })
}

fn arb_ops() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(
        prop_oneof![
            Just(Op::Next),
            Just(Op::Prev),
            Just(Op::Flip),
            Just(Op::Reset),
            (0usize..3).prop_map(Op::SelectChapter),
            (0usize..4).prop_map(Op::SelectCategory),
            any::<u64>().prop_map(Op::Shuffle),
            (0usize..32).prop_map(Op::DeleteCard),
        ],
        0..60,
    )
}

fn apply(session: &mut StudySession, op: &Op) {
    match op {
        Op::Next => session.next(),
        Op::Prev => session.prev(),
        Op::Flip => session.flip(),
        Op::Reset => session.reset(),
        Op::SelectChapter(idx) => {
            let id = CHAPTER_IDS[idx % CHAPTER_IDS.len()].to_string();
            session.select_chapter(&id);
        }
        Op::SelectCategory(idx) => {
            let categories = session.categories();
            let category = categories[idx % categories.len()].clone();
            session.select_category(category);
        }
        Op::Shuffle(seed) => {
            let mut rng = StdRng::seed_from_u64(*seed);
            session.shuffle_with(&mut rng);
        }
        Op::DeleteCard(idx) => {
            if !session.cards().is_empty() {
                let id = session.cards()[idx % session.cards().len()].id;
                session.card_deleted(id);
            }
        }
    }
}

fn assert_index_invariant(session: &StudySession) {
    let len = session.filtered_cards().len();
    if len > 0 {
        assert!(
            session.current_index() < len,
            "index {} out of bounds for filtered list of {len}",
            session.current_index()
        );
        assert!(session.current_card().is_some());
    } else {
        assert!(session.current_card().is_none());
    }
}

proptest! {
    #[test]
    fn index_stays_in_bounds((chapters, cards) in arb_working_set(), ops in arb_ops()) {
        let mut session = StudySession::new();
        session.replace_data(chapters, cards);
        assert_index_invariant(&session);

        for op in &ops {
            apply(&mut session, op);
            assert_index_invariant(&session);
        }
    }

    #[test]
    fn flip_is_an_involution((chapters, cards) in arb_working_set()) {
        let mut session = StudySession::new();
        session.replace_data(chapters, cards);

        let before = session.is_flipped();
        session.flip();
        prop_assert_ne!(before, session.is_flipped());
        session.flip();
        prop_assert_eq!(before, session.is_flipped());
    }

    #[test]
    fn shuffle_preserves_multiset(
        (chapters, cards) in arb_working_set(),
        seed in any::<u64>(),
        category_idx in 0usize..4,
    ) {
        let mut session = StudySession::new();
        session.replace_data(chapters, cards);

        let categories = session.categories();
        let category = categories[category_idx % categories.len()].clone();
        session.select_category(category);

        let mut before: Vec<i64> = session.filtered_cards().iter().map(|c| c.id).collect();
        let outside_before: Vec<(usize, i64)> = session
            .cards()
            .iter()
            .enumerate()
            .filter(|(_, c)| !before.contains(&c.id))
            .map(|(i, c)| (i, c.id))
            .collect();

        let mut rng = StdRng::seed_from_u64(seed);
        session.shuffle_with(&mut rng);

        let mut after: Vec<i64> = session.filtered_cards().iter().map(|c| c.id).collect();
        before.sort_unstable();
        after.sort_unstable();
        prop_assert_eq!(before, after);

        // Cards outside the filter keep both identity and position.
        for (slot, id) in outside_before {
            prop_assert_eq!(session.cards()[slot].id, id);
        }

        prop_assert_eq!(session.current_index(), 0);
        prop_assert!(!session.is_flipped());
    }
}
