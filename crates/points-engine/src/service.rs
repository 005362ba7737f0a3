//! 小票处理服务
//!
//! 无状态的协调者：生成 ID、评估积分、写入存储，并提供按 ID 查询。

use crate::error::Result;
use crate::id::{IdGenerator, UuidGenerator};
use crate::models::Receipt;
use crate::rules::PointsEvaluator;
use crate::store::RecordStore;
use std::sync::Arc;
use tracing::{Level, Span, debug, info, instrument, warn};

/// 小票处理服务
#[derive(Clone)]
pub struct ProcessingService {
    store: Arc<dyn RecordStore>,
    ids: Arc<dyn IdGenerator>,
    evaluator: PointsEvaluator,
}

impl ProcessingService {
    /// 使用 UUID 生成器创建服务
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self::with_id_generator(store, Arc::new(UuidGenerator))
    }

    pub fn with_id_generator(store: Arc<dyn RecordStore>, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            store,
            ids,
            evaluator: PointsEvaluator::new(),
        }
    }

    /// 处理小票，返回新记录的 ID
    ///
    /// ID 在写存储之前生成，不占用存储锁。存储写入失败时原样返回错误，不做重试。
    #[instrument(
        skip(self, receipt),
        fields(retailer = %receipt.retailer, receipt_id = tracing::field::Empty)
    )]
    pub fn process(&self, receipt: Receipt) -> Result<String> {
        let id = self.ids.next_id();
        Span::current().record("receipt_id", id.as_str());

        // 仅在 debug 级别开启时生成逐条规则说明
        let evaluator = if tracing::enabled!(Level::DEBUG) {
            self.evaluator.with_trace()
        } else {
            self.evaluator
        };
        let breakdown = evaluator.evaluate_detailed(&receipt);
        for contribution in &breakdown.contributions {
            debug!(
                rule = %contribution.rule,
                points = contribution.points,
                detail = contribution.detail.as_deref(),
                "规则评估"
            );
        }

        let points = breakdown.total;
        self.store.put(&id, receipt, points).inspect_err(|e| {
            warn!(error = %e, "小票记录写入失败");
        })?;

        metrics::counter!("receipts_processed_total").increment(1);
        metrics::histogram!("receipt_points").record(points as f64);

        info!(points, "小票处理完成");
        Ok(id)
    }

    /// 查询积分
    #[instrument(skip(self))]
    pub fn get_points(&self, id: &str) -> Option<u64> {
        let points = self.store.get_points(id);
        let result = if points.is_some() { "found" } else { "not_found" };
        metrics::counter!("points_lookups_total", "result" => result).increment(1);
        points
    }

    /// 查询原始小票
    #[instrument(skip(self))]
    pub fn get_receipt(&self, id: &str) -> Option<Receipt> {
        self.store.get_receipt(id)
    }

    /// 当前记录数
    pub fn records_count(&self) -> usize {
        self.store.len()
    }
}
