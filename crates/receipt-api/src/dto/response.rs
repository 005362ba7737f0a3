//! 响应 DTO 定义

use serde::{Deserialize, Serialize};

/// 提交小票成功响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessReceiptResponse {
    pub id: String,
}

/// 积分查询响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointsResponse {
    pub points: u64,
}
