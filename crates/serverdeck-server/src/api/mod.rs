//! HTTP API: маршрутизация и состояние приложения.

pub mod form;
pub mod server_routes;

use crate::config::ReorderMode;
use crate::services::image_store::ImageStore;
use axum::extract::{DefaultBodyLimit, State};
use axum::routing::get;
use axum::{Json, Router};
use sea_orm::{ConnectionTrait, DatabaseConnection};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Запас сверх лимита изображения на текстовые поля и служебные данные multipart.
const FORM_OVERHEAD_BYTES: usize = 1024 * 1024;

/// Общее состояние приложения.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub images: ImageStore,
    pub max_image_bytes: usize,
    pub reorder_mode: ReorderMode,
}

/// Построить маршрутизатор Axum.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Лимит тела больше лимита изображения, чтобы превышение размера
    // отдавалось как ошибка валидации поля, а не 413
    let api_routes = server_routes::routes().layer(DefaultBodyLimit::max(
        state.max_image_bytes.saturating_add(FORM_OVERHEAD_BYTES),
    ));

    let storage = ServeDir::new(state.images.root());

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes)
        .nest_service("/storage", storage)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health — проверка работоспособности сервера.
async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    let db_ok = state.db.execute_unprepared("SELECT 1").await.is_ok();
    Json(serde_json::json!({
        "status": if db_ok { "ok" } else { "error" },
        "database": db_ok,
        "service": "serverdeck-server"
    }))
}
