use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use farmbooks_ledger::{
    DiscountModel, ItemField, ItemSeed, LedgerConfig, LineItemLedger, RemovalPolicy,
};
use rust_decimal::Decimal;

fn filled_ledger(model: DiscountModel, rows: usize) -> LineItemLedger {
    let mut ledger = LineItemLedger::new(LedgerConfig::new(model, RemovalPolicy::Unrestricted));
    for i in 0..rows {
        ledger
            .add_item(Some(
                ItemSeed::described(format!("row {i}"))
                    .quantity(Decimal::from(i as u64 % 50 + 1))
                    .unit_price(Decimal::new(1_999 + i as i64, 2))
                    .discount(Decimal::new(i as i64 % 10, 0))
                    .tax_rate_percent(Decimal::from(5)),
            ))
            .unwrap();
    }
    ledger
}

fn bench_grand_total(c: &mut Criterion) {
    let mut group = c.benchmark_group("grand_total");
    for rows in [10usize, 100, 1_000] {
        group.throughput(Throughput::Elements(rows as u64));
        for model in [DiscountModel::Absolute, DiscountModel::Percentage] {
            let ledger = filled_ledger(model, rows);
            group.bench_with_input(
                BenchmarkId::new(format!("{model:?}"), rows),
                &ledger,
                |b, ledger| b.iter(|| black_box(ledger.grand_total())),
            );
        }
    }
    group.finish();
}

fn bench_keystroke(c: &mut Criterion) {
    let mut group = c.benchmark_group("update_item");
    for rows in [10usize, 100, 1_000] {
        let mut ledger = filled_ledger(DiscountModel::Absolute, rows);
        group.bench_function(BenchmarkId::from_parameter(rows), |b| {
            let mut n = 0u64;
            b.iter(|| {
                n += 1;
                let events = ledger
                    .update_item(rows / 2, ItemField::UnitPrice, &(n % 10_000).to_string())
                    .unwrap();
                black_box(events)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_grand_total, bench_keystroke);
criterion_main!(benches);
