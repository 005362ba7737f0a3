//! 小票处理器

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use points_engine::Receipt;
use tracing::info;
use validator::Validate;

use crate::dto::{PointsResponse, ProcessReceiptRequest, ProcessReceiptResponse};
use crate::error::{ApiError, Result};
use crate::state::AppState;

/// 提交小票并计算积分
///
/// POST /receipts/process
pub async fn process_receipt(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ProcessReceiptRequest>, JsonRejection>,
) -> Result<Json<ProcessReceiptResponse>> {
    let Json(req) = payload?;
    req.validate()?;

    let id = state.service.process(req.into())?;
    info!(receipt_id = %id, "Receipt accepted");

    Ok(Json(ProcessReceiptResponse { id }))
}

/// 查询小票积分
///
/// GET /receipts/{id}/points
pub async fn get_points(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PointsResponse>> {
    let points = state
        .service
        .get_points(&id)
        .ok_or(ApiError::ReceiptNotFound(id))?;
    Ok(Json(PointsResponse { points }))
}

/// 查询已提交的小票原文
///
/// GET /receipts/{id}
pub async fn get_receipt(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Receipt>> {
    let receipt = state
        .service
        .get_receipt(&id)
        .ok_or(ApiError::ReceiptNotFound(id))?;
    Ok(Json(receipt))
}
