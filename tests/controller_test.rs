//! End-to-end tests: the study controller driving a real server instance
//! over HTTP, exercising the full reconciliation contract.

use flashdeck_backend::client::{ApiClient, ApiError};
use flashdeck_backend::config::Config;
use flashdeck_backend::create_app;
use flashdeck_backend::session::{StudyController, ALL_CATEGORIES};

async fn spawn_app() -> String {
    std::env::set_var("DATABASE_URL", "sqlite::memory:");
    std::env::set_var("SEED_DEFAULTS", "true");

    let config = Config::from_env();
    let app = create_app(&config).await.expect("app init failed");

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind failed");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server crashed");
    });

    format!("http://{addr}")
}

async fn loaded_controller() -> StudyController {
    let base = spawn_app().await;
    let mut controller = StudyController::new(ApiClient::new(base));
    controller.load().await.expect("initial load failed");
    controller
}

#[tokio::test]
async fn load_populates_working_set() {
    let controller = loaded_controller().await;
    let session = controller.session();

    assert_eq!(session.chapters().len(), 4);
    assert_eq!(session.cards().len(), 20);
    assert_eq!(session.selected_chapter(), Some("chapter-1"));
    assert_eq!(session.selected_category(), ALL_CATEGORIES);
    assert_eq!(session.progress(), Some((1, 5)));
    assert!(session.ui_error().is_none());
}

#[tokio::test]
async fn seeded_categories_scenario() {
    let mut controller = loaded_controller().await;
    let session = controller.session_mut();

    session.select_chapter("chapter-1");
    assert_eq!(
        session.categories(),
        vec!["All", "Geography", "Math", "Science", "Literature"]
    );

    session.select_category("Math");
    assert_eq!(session.filtered_cards().len(), 1);
    assert_eq!(session.current_index(), 0);

    // Single-card list: next is a boundary no-op.
    session.next();
    assert_eq!(session.current_index(), 0);
}

#[tokio::test]
async fn add_edit_delete_card_round_trip() {
    let mut controller = loaded_controller().await;

    controller
        .add_card(
            "What is ownership?".to_string(),
            "Rust's memory model".to_string(),
            "Tech".to_string(),
        )
        .await
        .expect("add failed");

    let session = controller.session();
    assert_eq!(session.cards().len(), 21);
    let new_card = session.cards().last().unwrap().clone();
    assert!(new_card.id > 20, "store assigns the id");
    assert_eq!(new_card.chapter_id, "chapter-1");
    assert!(!new_card.created_at.is_empty(), "server-computed timestamp");

    controller
        .edit_card(
            new_card.id,
            "What is borrowing?".to_string(),
            "Temporarily using a value without owning it".to_string(),
            "Tech".to_string(),
        )
        .await
        .expect("edit failed");

    let edited = controller
        .session()
        .cards()
        .iter()
        .find(|c| c.id == new_card.id)
        .unwrap();
    assert_eq!(edited.question, "What is borrowing?");

    controller.delete_card(new_card.id).await.expect("delete failed");
    assert_eq!(controller.session().cards().len(), 20);
    assert!(controller
        .session()
        .cards()
        .iter()
        .all(|c| c.id != new_card.id));
}

#[tokio::test]
async fn failed_delete_leaves_session_untouched() {
    let mut controller = loaded_controller().await;
    let before = controller.session().clone();

    let result = controller.delete_card(999_999).await;
    assert!(matches!(result, Err(ApiError::NotFound(_))));

    assert!(controller.session().ui_error().is_some());
    let mut after = controller.session().clone();
    after.clear_error();
    assert_eq!(after, before, "only ui_error may change on failure");
}

#[tokio::test]
async fn failed_edit_leaves_session_untouched() {
    let mut controller = loaded_controller().await;
    let before = controller.session().clone();

    let result = controller
        .edit_card(
            999_999,
            "Q".to_string(),
            "A".to_string(),
            "X".to_string(),
        )
        .await;
    assert!(matches!(result, Err(ApiError::NotFound(_))));

    let mut after = controller.session().clone();
    after.clear_error();
    assert_eq!(after, before);
}

#[tokio::test]
async fn chapter_lifecycle_with_cascade() {
    let mut controller = loaded_controller().await;

    controller
        .add_chapter("Chapter 5: Review".to_string(), None)
        .await
        .expect("add chapter failed");

    let new_id = controller.session().selected_chapter().unwrap().to_string();
    assert!(new_id.starts_with("chapter-"));
    assert_eq!(controller.session().chapters().len(), 5);
    assert!(controller.session().filtered_cards().is_empty());

    controller
        .edit_chapter(&new_id, "Chapter 5: Final Review".to_string(), None)
        .await
        .expect("edit chapter failed");
    assert_eq!(
        controller.session().current_chapter().unwrap().title,
        "Chapter 5: Final Review"
    );

    // Deleting the selected chapter drops its cards and moves selection.
    controller.session_mut().select_chapter("chapter-1");
    controller
        .delete_chapter("chapter-1")
        .await
        .expect("delete chapter failed");

    let session = controller.session();
    assert_eq!(session.chapters().len(), 4);
    assert_eq!(session.selected_chapter(), Some("chapter-2"));
    assert!(session.cards().iter().all(|c| c.chapter_id != "chapter-1"));
    assert_eq!(session.cards().len(), 15);

    // The server agrees after a fresh load.
    controller.load().await.expect("reload failed");
    assert_eq!(controller.session().cards().len(), 15);
    assert_eq!(controller.session().selected_chapter(), Some("chapter-2"));
}

#[tokio::test]
async fn add_card_without_selection_is_rejected_locally() {
    let base = spawn_app().await;
    let mut controller = StudyController::new(ApiClient::new(base));

    let result = controller
        .add_card("Q".to_string(), "A".to_string(), "X".to_string())
        .await;
    assert!(matches!(result, Err(ApiError::Validation(_))));
    assert!(controller.session().ui_error().is_some());
    assert!(controller.session().cards().is_empty());
}

#[tokio::test]
async fn load_failure_is_fatal_and_leaves_session_empty() {
    // Nothing listens on this port.
    let mut controller = StudyController::new(ApiClient::new("http://127.0.0.1:9"));

    let result = controller.load().await;
    assert!(matches!(result, Err(ApiError::Transport(_))));
    assert!(controller.session().chapters().is_empty());
    assert!(controller.session().cards().is_empty());
}

#[tokio::test]
async fn server_validation_reaches_the_client_as_typed_error() {
    let base = spawn_app().await;
    let client = ApiClient::new(base);

    let err = client
        .create_chapter(&flashdeck_backend::client::ChapterPayload {
            title: "   ".to_string(),
            description: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));

    let err = client.get_chapter("nope").await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}
