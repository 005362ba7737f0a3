//! 小票积分引擎
//!
//! 将小票按固定的积分规则计算为整数积分，并以不透明 ID 为键保存结果，支持：
//! - 七条独立、确定性的积分规则（整数分计算，不使用浮点）
//! - 可选的逐条规则追踪明细
//! - 基于 DashMap 的并发记录存储
//! - 串联 ID 生成、评估与存储的处理服务

pub mod error;
pub mod id;
pub mod models;
pub mod money;
pub mod rules;
pub mod service;
pub mod store;

pub use error::{PointsError, Result};
pub use id::{IdGenerator, UuidGenerator};
pub use models::{Item, Receipt, ScoredRecord};
pub use money::Cents;
pub use rules::{PointsBreakdown, PointsEvaluator, RuleContribution, ScoringRule};
pub use service::ProcessingService;
pub use store::{InMemoryRecordStore, RecordStore};
