use criterion::{criterion_group, criterion_main, Criterion};
use l4::cantor::find_zeros;
use l4::{Config, FieldElement, RingPolynomial, GF128};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::hint::black_box;

const A: GF128 = GF128::new(0x8e36_280f_a91f_37ef_d8fe_0e07_97df_750b);
const B: GF128 = GF128::new(0xb50b_13a0_ce1b_cce4_2da2_dff5_c38c_7c3c);

fn bench_multiply(c: &mut Criterion) {
    c.bench_function("gf128_multiply", |b| b.iter(|| black_box(A) * black_box(B)));
}

fn bench_inverse(c: &mut Criterion) {
    c.bench_function("gf128_inverse", |b| b.iter(|| black_box(A).inverse()));
}

fn bench_find_zeros(c: &mut Criterion) {
    let f = [0x1234u128, 0xabcd, 0xc0ffee, 0xdeadbeef]
        .into_iter()
        .map(|r| RingPolynomial::new(vec![GF128::new(r), GF128::ONE]))
        .fold(RingPolynomial::one(), |acc, factor| &acc * &factor);
    let config = Config::default();

    c.bench_function("find_zeros_degree_4", |b| {
        let mut rng = StdRng::seed_from_u64(0);
        b.iter(|| find_zeros(black_box(&f), &mut rng, &config))
    });
}

criterion_group!(benches, bench_multiply, bench_inverse, bench_find_zeros);
criterion_main!(benches);
