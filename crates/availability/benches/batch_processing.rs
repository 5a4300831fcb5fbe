use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use availability_engine::{
    DiscontinuedClassification, EngineConfig, FixedClock, Processor, Product, VariantFacts,
    classify_at,
};
use chrono::{TimeZone, Utc};

/// Product with a realistic mix of stocked, restocking and discontinued variants.
fn catalog_product(variants: usize) -> Product {
    (0..variants).fold(Product::new("bench", "Bench Product"), |product, i| {
        let facts = match i % 5 {
            0 => VariantFacts::new(format!("v{i}"), 25),
            1 => VariantFacts::new(format!("v{i}"), 0).with_had_stock_before(true),
            2 => VariantFacts::new(format!("v{i}"), 0)
                .with_had_stock_before(true)
                .with_backorder_weeks(5),
            3 => VariantFacts::new(format!("v{i}"), -2).with_launch_date("2027-03-01"),
            _ => VariantFacts::new(format!("v{i}"), 4)
                .with_discontinued(DiscontinuedClassification::Delisted),
        };
        product.with_variant(facts)
    })
}

fn bench_classify(c: &mut Criterion) {
    let now = Utc.with_ymd_and_hms(2026, 10, 1, 0, 0, 0).unwrap();
    let config = EngineConfig::default();
    let facts = VariantFacts::new("v1", 0)
        .with_had_stock_before(true)
        .with_launch_date("2026-09-01")
        .with_minimum_order_quantity(4);

    c.bench_function("classify_single_variant", |b| {
        b.iter(|| classify_at(black_box(&facts), now, &config))
    });
}

fn bench_process(c: &mut Criterion) {
    let now = Utc.with_ymd_and_hms(2026, 10, 1, 0, 0, 0).unwrap();
    let processor = Processor::with_clock(FixedClock(now));

    let mut group = c.benchmark_group("process_product");
    for size in [1usize, 10, 100, 1000] {
        let product = catalog_product(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &product, |b, product| {
            b.iter(|| processor.process(black_box(product)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_classify, bench_process);
criterion_main!(benches);
