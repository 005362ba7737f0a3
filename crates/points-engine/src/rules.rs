//! 积分规则评估
//!
//! 七条规则相互独立，总积分为各规则贡献之和。评估是纯函数：
//! 相同输入总是得到相同结果，不会失败，也不产生任何输出。
//! 日期、时间或金额无法解析时，对应规则贡献 0 分。

use crate::models::{Item, Receipt};
use crate::money::Cents;
use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use serde::Serialize;
use std::fmt;

const ROUND_DOLLAR_POINTS: u64 = 50;
const QUARTER_MULTIPLE_POINTS: u64 = 25;
const POINTS_PER_ITEM_PAIR: u64 = 5;
const ODD_DAY_POINTS: u64 = 6;
const AFTERNOON_POINTS: u64 = 10;

/// 下午时段 [14:00, 16:00)，14:00 计入，16:00 不计入
const AFTERNOON_START_HOUR: u32 = 14;
const AFTERNOON_END_HOUR: u32 = 16;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

/// 积分规则
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringRule {
    /// 商户名中每个 ASCII 字母或数字 1 分
    RetailerName,
    /// 总金额为整元 50 分
    RoundDollarTotal,
    /// 总金额为 0.25 的倍数 25 分
    QuarterMultipleTotal,
    /// 每两件商品 5 分
    ItemPairs,
    /// 描述去空白后长度为 3 的倍数的商品，得 ceil(价格 * 0.2) 分
    ItemDescription,
    /// 购买日为奇数日 6 分
    OddPurchaseDay,
    /// 购买时间在 14:00 至 16:00 之间 10 分
    AfternoonPurchase,
}

impl ScoringRule {
    /// 全部规则，按评估顺序排列
    pub const ALL: [ScoringRule; 7] = [
        ScoringRule::RetailerName,
        ScoringRule::RoundDollarTotal,
        ScoringRule::QuarterMultipleTotal,
        ScoringRule::ItemPairs,
        ScoringRule::ItemDescription,
        ScoringRule::OddPurchaseDay,
        ScoringRule::AfternoonPurchase,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Self::RetailerName => "retailer_name",
            Self::RoundDollarTotal => "round_dollar_total",
            Self::QuarterMultipleTotal => "quarter_multiple_total",
            Self::ItemPairs => "item_pairs",
            Self::ItemDescription => "item_description",
            Self::OddPurchaseDay => "odd_purchase_day",
            Self::AfternoonPurchase => "afternoon_purchase",
        }
    }
}

impl fmt::Display for ScoringRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// 单条规则的贡献
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleContribution {
    pub rule: ScoringRule,
    pub points: u64,
    /// 追踪说明，仅在启用追踪时填充
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// 积分明细
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PointsBreakdown {
    pub total: u64,
    pub contributions: Vec<RuleContribution>,
}

impl PointsBreakdown {
    /// 指定规则的贡献分
    pub fn points_for(&self, rule: ScoringRule) -> u64 {
        self.contributions
            .iter()
            .find(|c| c.rule == rule)
            .map(|c| c.points)
            .unwrap_or(0)
    }

    /// 追踪说明列表（未启用追踪时为空）
    pub fn trace(&self) -> Vec<&str> {
        self.contributions
            .iter()
            .filter_map(|c| c.detail.as_deref())
            .collect()
    }
}

/// 积分评估器
#[derive(Debug, Clone, Copy, Default)]
pub struct PointsEvaluator {
    /// 是否生成逐条规则的说明文本
    trace_enabled: bool,
}

impl PointsEvaluator {
    pub fn new() -> Self {
        Self {
            trace_enabled: false,
        }
    }

    /// 启用评估追踪
    pub fn with_trace(mut self) -> Self {
        self.trace_enabled = true;
        self
    }

    /// 计算小票总积分
    pub fn evaluate(&self, receipt: &Receipt) -> u64 {
        ScoringRule::ALL
            .iter()
            .map(|rule| Self::score(*rule, receipt, false).0)
            .fold(0, u64::saturating_add)
    }

    /// 计算小票积分并返回逐条规则明细
    pub fn evaluate_detailed(&self, receipt: &Receipt) -> PointsBreakdown {
        let contributions: Vec<RuleContribution> = ScoringRule::ALL
            .iter()
            .map(|rule| {
                let (points, detail) = Self::score(*rule, receipt, self.trace_enabled);
                RuleContribution {
                    rule: *rule,
                    points,
                    detail,
                }
            })
            .collect();

        PointsBreakdown {
            total: contributions
                .iter()
                .map(|c| c.points)
                .fold(0, u64::saturating_add),
            contributions,
        }
    }

    /// 评估单条规则，返回 (积分, 说明)
    fn score(rule: ScoringRule, receipt: &Receipt, trace: bool) -> (u64, Option<String>) {
        match rule {
            ScoringRule::RetailerName => Self::retailer_name(&receipt.retailer, trace),
            ScoringRule::RoundDollarTotal => Self::round_dollar_total(&receipt.total, trace),
            ScoringRule::QuarterMultipleTotal => Self::quarter_multiple_total(&receipt.total, trace),
            ScoringRule::ItemPairs => Self::item_pairs(&receipt.items, trace),
            ScoringRule::ItemDescription => Self::item_descriptions(&receipt.items, trace),
            ScoringRule::OddPurchaseDay => Self::odd_purchase_day(&receipt.purchase_date, trace),
            ScoringRule::AfternoonPurchase => {
                Self::afternoon_purchase(&receipt.purchase_time, trace)
            }
        }
    }

    fn retailer_name(retailer: &str, trace: bool) -> (u64, Option<String>) {
        let points = retailer.chars().filter(|c| c.is_ascii_alphanumeric()).count() as u64;
        let detail = trace.then(|| {
            let counted: String = retailer
                .chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .collect();
            format!("商户名 '{}' 有效字符 '{}' => {}", retailer, counted, points)
        });
        (points, detail)
    }

    fn round_dollar_total(total: &str, trace: bool) -> (u64, Option<String>) {
        let amount = Cents::parse(total);
        let points = match amount {
            Some(amount) if amount.is_round_dollar() => ROUND_DOLLAR_POINTS,
            _ => 0,
        };
        let detail = trace.then(|| match amount {
            Some(_) if points > 0 => format!("总金额 {} 为整元 => {}", total, points),
            Some(_) => format!("总金额 {} 不是整元 => 0", total),
            None => format!("总金额 '{}' 无法解析 => 0", total),
        });
        (points, detail)
    }

    fn quarter_multiple_total(total: &str, trace: bool) -> (u64, Option<String>) {
        let amount = Cents::parse(total);
        let points = match amount {
            Some(amount) if amount.is_multiple_of_quarter() => QUARTER_MULTIPLE_POINTS,
            _ => 0,
        };
        let detail = trace.then(|| match amount {
            Some(_) if points > 0 => format!("总金额 {} 是 0.25 的倍数 => {}", total, points),
            Some(_) => format!("总金额 {} 不是 0.25 的倍数 => 0", total),
            None => format!("总金额 '{}' 无法解析 => 0", total),
        });
        (points, detail)
    }

    fn item_pairs(items: &[Item], trace: bool) -> (u64, Option<String>) {
        let pairs = (items.len() / 2) as u64;
        let points = pairs.saturating_mul(POINTS_PER_ITEM_PAIR);
        let detail = trace.then(|| format!("{} 件商品共 {} 对 => {}", items.len(), pairs, points));
        (points, detail)
    }

    fn item_descriptions(items: &[Item], trace: bool) -> (u64, Option<String>) {
        let mut points: u64 = 0;
        let mut qualified = Vec::new();

        for (index, item) in items.iter().enumerate() {
            let trimmed_len = item.short_description.trim().chars().count();
            if trimmed_len == 0 || trimmed_len % 3 != 0 {
                continue;
            }
            // 价格无法解析时该商品不计分
            if let Some(price) = Cents::parse(&item.price) {
                let item_points = price.fifth_rounded_up();
                points = points.saturating_add(item_points);
                if trace {
                    qualified.push(format!("#{}({} => {})", index + 1, price, item_points));
                }
            }
        }

        let detail = trace.then(|| {
            if qualified.is_empty() {
                "没有描述长度为 3 的倍数的商品 => 0".to_string()
            } else {
                format!("描述长度为 3 的倍数: {} => {}", qualified.join(", "), points)
            }
        });
        (points, detail)
    }

    fn odd_purchase_day(purchase_date: &str, trace: bool) -> (u64, Option<String>) {
        let date = NaiveDate::parse_from_str(purchase_date, DATE_FORMAT).ok();
        let points = match date {
            Some(date) if date.day() % 2 == 1 => ODD_DAY_POINTS,
            _ => 0,
        };
        let detail = trace.then(|| match date {
            Some(date) if points > 0 => format!("购买日 {} 为奇数日 => {}", date.day(), points),
            Some(date) => format!("购买日 {} 为偶数日 => 0", date.day()),
            None => format!("购买日期 '{}' 无法解析 => 0", purchase_date),
        });
        (points, detail)
    }

    fn afternoon_purchase(purchase_time: &str, trace: bool) -> (u64, Option<String>) {
        let time = NaiveTime::parse_from_str(purchase_time, TIME_FORMAT).ok();
        let points = match time {
            Some(time) if (AFTERNOON_START_HOUR..AFTERNOON_END_HOUR).contains(&time.hour()) => {
                AFTERNOON_POINTS
            }
            _ => 0,
        };
        let detail = trace.then(|| match time {
            Some(_) if points > 0 => {
                format!("购买时间 {} 在 14:00-16:00 之间 => {}", purchase_time, points)
            }
            Some(_) => format!("购买时间 {} 不在 14:00-16:00 之间 => 0", purchase_time),
            None => format!("购买时间 '{}' 无法解析 => 0", purchase_time),
        });
        (points, detail)
    }
}
