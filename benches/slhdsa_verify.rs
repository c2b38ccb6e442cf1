use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use slhdsa::{ParameterSetId, SlhDsa};

fn verify_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("slhdsa_verify");

    for id in [ParameterSetId::Shake128f, ParameterSetId::Sha2_128f] {
        let slh = SlhDsa::new(id);
        let (sk, vk) = slh.keygen();
        let message = b"benchmark message";
        let sig = slh.sign(message, b"", &sk).expect("signing failed");

        group.bench_function(BenchmarkId::new("verify", id.name()), |b| {
            b.iter(|| {
                black_box(
                    slh.verify(sig.as_ref(), message, b"", &vk)
                        .expect("verification errored"),
                );
            });
        });
    }

    group.finish();
}

criterion_group!(benches, verify_benchmarks);
criterion_main!(benches);
