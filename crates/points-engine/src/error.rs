//! 积分引擎错误类型

use thiserror::Error;

/// 积分引擎错误
///
/// 规则评估本身不会失败，这里只包含记录存储相关的错误。
#[derive(Debug, Error)]
pub enum PointsError {
    #[error("记录存储容量已满: 上限 {capacity} 条")]
    StoreCapacityExhausted { capacity: usize },
}

impl PointsError {
    /// 获取错误码
    pub fn code(&self) -> &'static str {
        match self {
            Self::StoreCapacityExhausted { .. } => "STORE_CAPACITY_EXHAUSTED",
        }
    }
}

pub type Result<T> = std::result::Result<T, PointsError>;
