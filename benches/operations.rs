use criterion::{black_box, criterion_group, criterion_main, Criterion};

use record_query::condition::{Condition, ConditionGroup, ConditionLogic, Operator};
use record_query::processing::{filter, remove_duplicates, sort, statistics, SortOrder};
use record_query::types::{Record, RecordSet, Value};

const DEPARTMENTS: [&str; 4] = ["技術部", "行銷部", "財務部", "人資部"];

fn generated(n: usize) -> RecordSet {
    (0..n)
        .map(|i| {
            Record::from_pairs([
                ("id", Value::Number(i as f64)),
                ("name", Value::string(format!("user-{}", i % 997))),
                ("department", Value::string(DEPARTMENTS[i % DEPARTMENTS.len()])),
                ("salary", Value::Number(30_000.0 + (i % 50) as f64 * 500.0)),
            ])
        })
        .collect()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let records = generated(10_000);
    let group = ConditionGroup::new(
        vec![
            Condition::new("department", Operator::Equals, "技術部"),
            Condition::new("salary", Operator::GreaterThan, "40000"),
        ],
        ConditionLogic::And,
        false,
    );

    c.bench_function("filter 10k", |b| b.iter(|| filter(black_box(&records), &group)));
    c.bench_function("sort 10k", |b| {
        b.iter(|| sort(black_box(&records), "name", SortOrder::Asc))
    });
    c.bench_function("dedup 10k", |b| {
        b.iter(|| remove_duplicates(black_box(records.clone()), "name,department"))
    });
    c.bench_function("grouped statistics 10k", |b| {
        b.iter(|| statistics(black_box(&records), "salary", Some("department")))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
