//! 积分规则评估基准测试
//!
//! 测试覆盖：
//! - 单张小票评估
//! - 开启逐条规则说明时的开销
//! - 不同商品数量下的性能曲线

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use points_engine::{Item, PointsEvaluator, Receipt};
use std::hint::black_box;

/// 创建 Target 示例小票
fn create_target_receipt() -> Receipt {
    Receipt::new(
        "Target",
        "2022-01-01",
        "13:01",
        vec![
            Item::new("Mountain Dew 12PK", "6.49"),
            Item::new("Emils Cheese Pizza", "12.25"),
            Item::new("Knorr Creamy Chicken", "1.26"),
            Item::new("Doritos Nacho Cheese", "3.35"),
            Item::new("   Klarbrunn 12-PK 12 FL OZ  ", "12.00"),
        ],
        "35.35",
    )
}

/// 创建指定商品数量的小票
fn create_receipt_with_items(item_count: usize) -> Receipt {
    let items = (0..item_count)
        .map(|i| Item::new(format!("Item {:03}", i), format!("{}.{:02}", i % 50, i % 100)))
        .collect();
    Receipt::new("M&M Corner Market", "2022-03-21", "14:33", items, "123.45")
}

fn bench_evaluate(c: &mut Criterion) {
    let evaluator = PointsEvaluator::new();
    let receipt = create_target_receipt();

    c.bench_function("evaluate_target_receipt", |b| {
        b.iter(|| black_box(evaluator.evaluate(black_box(&receipt))))
    });
}

/// 对比关闭与开启规则说明的开销
fn bench_evaluate_detailed(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate_detailed");
    let receipt = create_target_receipt();

    for (name, evaluator) in [
        ("without_trace", PointsEvaluator::new()),
        ("with_trace", PointsEvaluator::new().with_trace()),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| black_box(evaluator.evaluate_detailed(black_box(&receipt))))
        });
    }

    group.finish();
}

fn bench_item_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("item_count");
    let evaluator = PointsEvaluator::new();

    for item_count in [1, 10, 100, 1000].iter() {
        let receipt = create_receipt_with_items(*item_count);

        group.throughput(Throughput::Elements(*item_count as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(item_count),
            &receipt,
            |b, receipt| b.iter(|| black_box(evaluator.evaluate(black_box(receipt)))),
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_evaluate,
    bench_evaluate_detailed,
    bench_item_count,
);

criterion_main!(benches);
