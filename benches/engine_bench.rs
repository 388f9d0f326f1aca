use criterion::{Criterion, black_box, criterion_group, criterion_main};
use csv_comparator::{
    ColumnSelection, ComparisonMode, ComparisonRequest, Grid, MatchMode, compare, parse,
};

fn build_grid(rows: usize, offset: usize) -> Grid {
    let mut text = String::from("id,email,city\n");
    for i in 0..rows {
        text.push_str(&format!(
            "{},user{}@example.com,City {}\n",
            i,
            i + offset,
            i % 17
        ));
    }
    parse(&text)
}

fn bench_lookup(c: &mut Criterion) {
    let grid_a = build_grid(1_000, 0);
    let grid_b = build_grid(1_000, 500);

    let mut group = c.benchmark_group("lookup");
    for mode in [MatchMode::Exact, MatchMode::CaseInsensitive, MatchMode::Partial] {
        group.bench_function(mode.to_string(), |b| {
            b.iter(|| {
                let request = ComparisonRequest::new(
                    &grid_a,
                    &grid_b,
                    ComparisonMode::Lookup {
                        a: ColumnSelection::single(1),
                        b: ColumnSelection::single(1),
                    },
                )
                .with_match_mode(mode);
                black_box(compare(&request).unwrap())
            })
        });
    }
    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let text = (0..10_000)
        .map(|i| format!("{},\"Name, {}\",x{}@example.com", i, i, i))
        .collect::<Vec<_>>()
        .join("\n");
    c.bench_function("parse_10k_rows", |b| b.iter(|| black_box(parse(&text))));
}

criterion_group!(benches, bench_lookup, bench_parse);
criterion_main!(benches);
