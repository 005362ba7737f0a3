//! 应用状态定义

use points_engine::{InMemoryRecordStore, ProcessingService};
use receipt_shared::config::StoreConfig;
use std::sync::Arc;

/// Axum 应用共享状态
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ProcessingService>,
}

impl AppState {
    pub fn new(service: ProcessingService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// 按存储配置创建内存存储与处理服务
    pub fn from_config(config: &StoreConfig) -> Self {
        let store = match config.max_records {
            Some(capacity) => InMemoryRecordStore::with_capacity(capacity),
            None => InMemoryRecordStore::new(),
        };
        Self::new(ProcessingService::new(Arc::new(store)))
    }
}
