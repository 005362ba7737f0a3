//! 积分记录存储
//!
//! 使用 DashMap 提供线程安全的记录存储。小票与积分作为一条记录整体写入，
//! 分片读写锁保证读取方不会看到写到一半的记录。记录只写一次、可多次读取。

use crate::error::{PointsError, Result};
use crate::models::{Receipt, ScoredRecord};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, instrument, warn};

/// 积分记录存储
pub trait RecordStore: Send + Sync {
    /// 写入记录，已存在同 ID 记录时整体覆盖
    fn put(&self, id: &str, receipt: Receipt, points: u64) -> Result<()>;

    /// 查询积分，记录不存在时返回 None
    fn get_points(&self, id: &str) -> Option<u64>;

    /// 查询原始小票，记录不存在时返回 None
    fn get_receipt(&self, id: &str) -> Option<Receipt>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// 内存记录存储
#[derive(Clone)]
pub struct InMemoryRecordStore {
    records: Arc<DashMap<String, ScoredRecord>>,
    /// 已占用的记录数，用于精确控制容量
    occupied: Arc<AtomicUsize>,
    /// 最大记录数，None 表示不限制
    capacity: Option<usize>,
}

impl InMemoryRecordStore {
    /// 创建不限容量的存储
    pub fn new() -> Self {
        Self {
            records: Arc::new(DashMap::new()),
            occupied: Arc::new(AtomicUsize::new(0)),
            capacity: None,
        }
    }

    /// 创建限定容量的存储
    ///
    /// 超出容量时新 ID 的写入失败，覆盖已有 ID 不受影响。
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Arc::new(DashMap::with_capacity(capacity)),
            occupied: Arc::new(AtomicUsize::new(0)),
            capacity: Some(capacity),
        }
    }

    /// 获取完整记录
    pub fn get(&self, id: &str) -> Option<ScoredRecord> {
        self.records.get(id).map(|r| r.value().clone())
    }

    /// 为新记录占用一个名额
    fn reserve_slot(&self) -> Result<()> {
        let Some(capacity) = self.capacity else {
            self.occupied.fetch_add(1, Ordering::AcqRel);
            return Ok(());
        };

        self.occupied
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
                (n < capacity).then_some(n + 1)
            })
            .map(|_| ())
            .map_err(|_| PointsError::StoreCapacityExhausted { capacity })
    }
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore for InMemoryRecordStore {
    #[instrument(skip(self, receipt), fields(receipt_id = %id))]
    fn put(&self, id: &str, receipt: Receipt, points: u64) -> Result<()> {
        let record = ScoredRecord {
            id: id.to_string(),
            receipt,
            points,
        };

        // entry 持有分片写锁，占位与插入在同一临界区内完成
        match self.records.entry(id.to_string()) {
            Entry::Occupied(mut entry) => {
                warn!("覆盖已存在的记录: {}", id);
                entry.insert(record);
            }
            Entry::Vacant(entry) => {
                self.reserve_slot().inspect_err(|e| {
                    warn!(error = %e, "记录写入被拒绝");
                })?;
                entry.insert(record);
            }
        }

        debug!(points, "记录已写入");
        Ok(())
    }

    fn get_points(&self, id: &str) -> Option<u64> {
        self.records.get(id).map(|r| r.points)
    }

    fn get_receipt(&self, id: &str) -> Option<Receipt> {
        self.records.get(id).map(|r| r.receipt.clone())
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}
