//! API 路由模块。
//!
//! 提供前端文件浏览器所需的全部 HTTP 能力。

pub mod auth;
pub mod explorer;
pub mod state;

use std::sync::Arc;

use axum::{Json, Router, routing::get};
use tower_http::cors::CorsLayer;
use wenlan_api_types::HealthCheckResponse;

pub use auth::create_auth_router;
pub use explorer::create_explorer_router;
pub use state::AppState;

/// 组装完整的应用路由。
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .merge(create_explorer_router())
        .merge(create_auth_router())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// 健康检查。
async fn health() -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse::ok())
}
