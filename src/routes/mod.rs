use axum::{
    Json, Router,
    http::{StatusCode, Uri},
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::{
    config::AppConfig,
    middleware::session::create_session_layer,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub mod api;
pub mod auth;
pub mod doc;
pub mod health;
pub mod inventory;
pub mod pages;
pub mod params;
pub mod sales;

/// HTML pages. Everything except `/` and `/auth/*` needs a logged-in user.
pub fn create_page_router() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::home))
        .route("/inventory", get(inventory::index))
        .route("/add", post(inventory::add_item))
        .route("/delete/{id}", get(inventory::delete_item))
        .route(
            "/edit/{id}",
            get(inventory::edit_form).post(inventory::edit_item),
        )
        .route("/sales", get(sales::index))
        .route("/sell", post(sales::sell_item))
        .nest("/auth", auth::router())
}

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    api::router()
}

/// Full application: pages, JSON API, docs, static files and sessions.
pub fn create_app(state: AppState, config: &AppConfig) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .merge(create_page_router())
        .nest("/api", create_api_router())
        .merge(doc::scalar_docs())
        .nest_service("/static", ServeDir::new(&config.static_dir))
        .fallback(not_found)
        .layer(create_session_layer(config))
        .with_state(state)
}

async fn not_found(uri: Uri) -> (StatusCode, Json<ApiResponse<serde_json::Value>>) {
    let body = ApiResponse::success(
        "Not Found",
        serde_json::json!({ "path": uri.path() }),
        Some(Meta::empty()),
    );
    (StatusCode::NOT_FOUND, Json(body))
}
