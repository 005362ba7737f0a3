//! 小票积分 HTTP 服务
//!
//! 提供小票提交与积分查询的 REST API，请求校验在进入积分引擎之前完成。

pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::{ApiError, Result};
pub use routes::build_app;
pub use state::AppState;

/// 服务名，用于配置文件与日志
pub const SERVICE_NAME: &str = "receipt-processor";
