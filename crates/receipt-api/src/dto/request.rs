//! 请求 DTO 定义
//!
//! 字段格式校验在进入积分引擎前完成，正则只编译一次。

use chrono::{NaiveDate, NaiveTime};
use points_engine::{Item, Receipt};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::{Validate, ValidationError};

/// 商户名与商品描述允许的字符：ASCII 字母、数字、下划线、ASCII 空白、连字符和 &
static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_\t\n\f\r \-&]+$").expect("名称正则无效"));

/// 金额格式：整数部分加两位小数
static AMOUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\.[0-9]{2}$").expect("金额正则无效"));

/// 提交小票请求
///
/// 缺失的字段按空值处理，由校验规则报告具体字段。
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct ProcessReceiptRequest {
    #[validate(
        custom(function = "not_blank", message = "retailer is required"),
        regex(path = *NAME_RE, message = "retailer contains invalid characters")
    )]
    pub retailer: String,

    #[validate(custom(function = "purchase_date", message = "purchaseDate must be YYYY-MM-DD"))]
    pub purchase_date: String,

    #[validate(custom(function = "purchase_time", message = "purchaseTime must be HH:MM"))]
    pub purchase_time: String,

    #[validate(length(min = 1, message = "at least one item is required"), nested)]
    pub items: Vec<ItemRequest>,

    #[validate(regex(path = *AMOUNT_RE, message = "total must look like 0.00"))]
    pub total: String,
}

/// 小票商品
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemRequest {
    #[validate(
        custom(function = "not_blank", message = "shortDescription is required"),
        regex(path = *NAME_RE, message = "shortDescription contains invalid characters")
    )]
    pub short_description: String,

    #[validate(regex(path = *AMOUNT_RE, message = "price must look like 0.00"))]
    pub price: String,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

fn purchase_date(value: &str) -> Result<(), ValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| ValidationError::new("date"))
}

fn purchase_time(value: &str) -> Result<(), ValidationError> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map(|_| ())
        .map_err(|_| ValidationError::new("time"))
}

impl From<ItemRequest> for Item {
    fn from(req: ItemRequest) -> Self {
        Item::new(req.short_description, req.price)
    }
}

impl From<ProcessReceiptRequest> for Receipt {
    fn from(req: ProcessReceiptRequest) -> Self {
        Receipt::new(
            req.retailer,
            req.purchase_date,
            req.purchase_time,
            req.items.into_iter().map(Item::from).collect(),
            req.total,
        )
    }
}
