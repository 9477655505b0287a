pub mod client;
pub mod config;
pub mod db;
pub mod logging;
pub mod response;
pub mod routes;
pub mod seed;
pub mod session;
pub mod state;

use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::Config;
use crate::db::Database;
use crate::state::AppState;

pub async fn create_app(config: &Config) -> Result<axum::Router, db::DbInitError> {
    let db = Database::connect(config).await?;

    if config.seed_defaults {
        seed::seed_defaults(&db).await;
    }

    let state = AppState::new(db);

    Ok(routes::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()))
}
