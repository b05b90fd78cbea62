use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use safmeds::bank::CardBank;
use safmeds::item::ItemGenerator;

fn large_bank() -> CardBank {
    let rows = (0..1_000)
        .map(|i| (format!("term-{i}"), format!("definition of term {i}")))
        .collect();
    CardBank::load(rows).expect("generated bank is valid")
}

fn bench_draw(c: &mut Criterion) {
    let bank = large_bank();
    let mut generator = ItemGenerator::seeded(0xD12);

    c.bench_function("draw_item", |b| {
        b.iter(|| {
            let item = generator.draw(&bank);
            black_box(item);
        })
    });
}

criterion_group!(benches, bench_draw);
criterion_main!(benches);
