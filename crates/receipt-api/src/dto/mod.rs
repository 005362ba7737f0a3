//! 请求与响应 DTO

pub mod request;
pub mod response;

pub use request::{ItemRequest, ProcessReceiptRequest};
pub use response::{PointsResponse, ProcessReceiptResponse};
