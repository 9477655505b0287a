use axum::Router;

use flashdeck_backend::config::Config;

pub async fn create_test_app() -> Router {
    std::env::set_var("DATABASE_URL", "sqlite::memory:");
    std::env::set_var("SEED_DEFAULTS", "true");

    let config = Config::from_env();
    flashdeck_backend::create_app(&config)
        .await
        .expect("test app init failed")
}
