//! 积分引擎领域模型

use serde::{Deserialize, Serialize};

/// 小票
///
/// 进入引擎前已由外部完成格式校验。日期、时间和金额保留原始字符串，
/// 由各条规则自行解析，解析失败时该规则贡献 0 分。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub retailer: String,
    /// 购买日期，格式 YYYY-MM-DD
    pub purchase_date: String,
    /// 购买时间，24 小时制 HH:MM
    pub purchase_time: String,
    pub items: Vec<Item>,
    /// 总金额，两位小数的十进制字符串
    pub total: String,
}

impl Receipt {
    pub fn new(
        retailer: impl Into<String>,
        purchase_date: impl Into<String>,
        purchase_time: impl Into<String>,
        items: Vec<Item>,
        total: impl Into<String>,
    ) -> Self {
        Self {
            retailer: retailer.into(),
            purchase_date: purchase_date.into(),
            purchase_time: purchase_time.into(),
            items,
            total: total.into(),
        }
    }
}

/// 小票商品行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub short_description: String,
    pub price: String,
}

impl Item {
    pub fn new(short_description: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            short_description: short_description.into(),
            price: price.into(),
        }
    }
}

/// 已评分记录
///
/// 小票与积分作为一个整体写入存储，读取方不会看到只更新了一半的记录。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredRecord {
    pub id: String,
    pub receipt: Receipt,
    pub points: u64,
}
