use aql::{Aql, Map, Value, list, map};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

/// A SELECT with `n` columns and `n` equality conditions:
/// SELECT col0, col1, ... FROM t WHERE col0 = ? AND col1 = ? ...
fn select_spec(n: usize) -> Map {
    let mut columns = Map::new();
    let mut condition = Map::new();
    for i in 0..n {
        columns.push(format!("col{i}"));
        condition.insert(format!("col{i}"), i as i64);
    }
    map! {
        "select" => columns,
        "from" => "t",
        "where" => condition,
        "limit" => 10,
    }
}

fn bench_compile_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile/select");
    let aql = Aql::default();

    for n in [1, 5, 10, 50, 100] {
        let spec = select_spec(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &spec, |b, spec| {
            b.iter(|| black_box(aql.compile(spec).unwrap()));
        });
    }

    group.finish();
}

fn bench_in_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile/in_list");
    let aql = Aql::default();

    for n in [5, 20, 100, 500] {
        let values: Vec<i64> = (0..n).collect();
        let spec = map! { "where" => map! { "id:in" => values } };
        group.bench_with_input(BenchmarkId::from_parameter(n), &spec, |b, spec| {
            b.iter(|| black_box(aql.compile(spec).unwrap()));
        });
    }

    group.finish();
}

fn bench_nested_groups(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile/nested_groups");
    let aql = Aql::default();

    for depth in [1, 4, 16] {
        let mut node = Value::from(map! { "leaf" => 0 });
        for level in 0..depth {
            node = Value::from(map! {
                ":operator" => if level % 2 == 0 { "or" } else { "and" },
                "a" => list![1, 2, 3],
                0 => node,
            });
        }
        let spec = map! { "where" => node };
        group.bench_with_input(BenchmarkId::from_parameter(depth), &spec, |b, spec| {
            b.iter(|| black_box(aql.compile(spec).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_compile_select,
    bench_in_list,
    bench_nested_groups
);
criterion_main!(benches);
