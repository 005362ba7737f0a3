//! 路由配置模块

use axum::{
    Router, middleware,
    routing::{get, post},
};
use receipt_shared::observability::middleware as obs_middleware;

use crate::{handlers, state::AppState};

/// 小票相关路由
pub fn receipt_routes() -> Router<AppState> {
    Router::new()
        .route("/receipts/process", post(handlers::receipt::process_receipt))
        .route("/receipts/{id}/points", get(handlers::receipt::get_points))
        .route("/receipts/{id}", get(handlers::receipt::get_receipt))
}

/// 构建完整应用：业务路由、健康检查与可观测性中间件
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .merge(receipt_routes())
        .route("/health", get(handlers::health::health_check))
        .layer(middleware::from_fn(obs_middleware::http_tracing))
        .layer(middleware::from_fn(obs_middleware::request_id))
        .with_state(state)
}
