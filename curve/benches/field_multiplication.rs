use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ecloop_curve::{FieldElement, RandomField};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bench_field_mul(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let a = FieldElement::random(&mut rng);
    let b = FieldElement::random(&mut rng);
    c.bench_function("field_mul", |bencher| {
        bencher.iter(|| black_box(black_box(a) * black_box(b)))
    });
}

fn bench_field_square(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let a = FieldElement::random(&mut rng);
    c.bench_function("field_square", |bencher| {
        bencher.iter(|| black_box(black_box(a).square()))
    });
}

fn bench_field_invert(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let a = FieldElement::random(&mut rng);
    c.bench_function("field_invert", |bencher| {
        bencher.iter(|| black_box(black_box(a).invert()))
    });
}

fn bench_field_batch_invert(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let values: Vec<FieldElement> = (0..256).map(|_| FieldElement::random(&mut rng)).collect();
    c.bench_function("field_batch_invert_256", |bencher| {
        bencher.iter(|| {
            let mut batch = values.clone();
            FieldElement::batch_invert(black_box(&mut batch));
            batch
        })
    });
}

criterion_group!(
    benches,
    bench_field_mul,
    bench_field_square,
    bench_field_invert,
    bench_field_batch_invert
);
criterion_main!(benches);
