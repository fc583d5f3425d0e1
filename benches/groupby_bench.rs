//! GroupBy Benchmarks
//!
//! Partitioning and aggregation over generated frames.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use tabframe::{DataFrame, Reduction, Value, ValueType};

/// category / amount / price frame with `n_groups` distinct categories
fn create_test_df(n_rows: usize, n_groups: usize) -> DataFrame {
    let mut df = DataFrame::with_schema(
        &["category", "amount", "price"],
        &[ValueType::String, ValueType::Int, ValueType::Float],
    )
    .unwrap();

    for i in 0..n_rows {
        df.add_row(vec![
            Value::from(format!("cat_{}", i % n_groups)),
            Value::Int((i % 97) as i64),
            Value::Float(i as f64 * 0.5),
        ])
        .unwrap();
    }
    df
}

fn bench_partition(c: &mut Criterion) {
    let mut group = c.benchmark_group("GroupBy Partition");

    for n_rows in [100, 1000, 10000].iter() {
        let df = create_test_df(*n_rows, 10);
        group.bench_with_input(BenchmarkId::new("group_by", n_rows), &df, |b, df| {
            b.iter(|| {
                let grouped = df.group_by(std::hint::black_box(["category"])).unwrap();
                grouped.group_count()
            });
        });
    }

    group.finish();
}

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("GroupBy Aggregate");
    let df = create_test_df(10000, 50);
    let grouped = df.group_by(["category"]).unwrap();

    for op in [Reduction::Sum, Reduction::Mean, Reduction::Std, Reduction::Max] {
        group.bench_with_input(BenchmarkId::new("aggregate", op), &op, |b, &op| {
            b.iter(|| grouped.aggregate(std::hint::black_box(op)).unwrap());
        });
    }

    group.finish();
}

fn bench_slice(c: &mut Criterion) {
    let df = create_test_df(10000, 10);
    c.bench_function("slice 1000 rows", |b| {
        b.iter(|| df.slice(std::hint::black_box(4000), std::hint::black_box(4999)))
    });
}

criterion_group!(benches, bench_partition, bench_aggregate, bench_slice);
criterion_main!(benches);
