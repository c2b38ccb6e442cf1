use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use slhdsa::{ParameterSetId, SlhDsa};

fn sign_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("slhdsa_sign");
    group.sample_size(10);

    for id in [ParameterSetId::Shake128f, ParameterSetId::Sha2_128f] {
        let slh = SlhDsa::new(id);
        let (sk, _) = slh.keygen();
        let message = b"benchmark message";

        group.bench_function(BenchmarkId::new("sign", id.name()), |b| {
            b.iter(|| {
                black_box(slh.sign(message, b"", &sk).expect("signing failed"));
            });
        });
    }

    group.finish();
}

criterion_group!(benches, sign_benchmarks);
criterion_main!(benches);
