use colframe::aggregation::{mean, sum};
use colframe::{Comparator, Config, Data, Filter, Order, Table};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn setup_table(n: usize) -> Table {
    let ids: Vec<i64> = (0..n as i64).collect();
    let names: Vec<Option<String>> = (0..n).map(|i| Some(format!("user{}", i % 500))).collect();
    let ages: Vec<i64> = (0..n).map(|i| (i % 100) as i64).collect();
    let scores: Vec<f64> = (0..n).map(|i| (i % 17) as f64 * 0.5).collect();
    let active: Vec<bool> = (0..n).map(|i| i % 2 == 0).collect();

    Table::new(
        [
            ("id", Data::Int(ids)),
            ("name", Data::Text(names)),
            ("age", Data::Int(ages)),
            ("score", Data::Float(scores)),
            ("active", Data::Bool(active)),
        ],
        Config::new().inferred_enum_column("name"),
    )
}

fn bench_filter_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("Filter_Performance");

    for n in [1000, 100_000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(n), n, |b, &n| {
            let table = setup_table(n);
            let filters = [
                Filter::new("age", Comparator::Gt, 42),
                Filter::new("active", Comparator::Eq, true),
            ];
            b.iter(|| black_box(table.filter(black_box(&filters))));
        });
    }
    group.finish();
}

fn bench_sort_performance(c: &mut Criterion) {
    let mut group = c.benchmark_group("Sort_Performance");

    for n in [1000, 100_000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(n), n, |b, &n| {
            let table = setup_table(n);
            let orders = [Order::asc("age"), Order::desc("score")];
            b.iter(|| black_box(table.sort(black_box(&orders))));
        });
    }
    group.finish();
}

fn bench_group_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("Group_Aggregate_Performance");

    for n in [1000, 100_000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(n), n, |b, &n| {
            let table = setup_table(n);
            b.iter(|| {
                let res = table
                    .group_by(&["name"])
                    .aggregate(&[sum("age"), mean("score")]);
                black_box(res);
            });
        });
    }
    group.finish();
}

fn bench_distinct_performance(c: &mut Criterion) {
    let mut group = c.benchmark_group("Distinct_Performance");

    for n in [1000, 100_000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(n), n, |b, &n| {
            let table = setup_table(n);
            b.iter(|| black_box(table.distinct(&["age", "active"])));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_filter_scaling,
    bench_sort_performance,
    bench_group_aggregate,
    bench_distinct_performance
);
criterion_main!(benches);
