use criterion::{criterion_group, criterion_main, Criterion};
use qcp_core::state::{von_neumann_entropy, DensityMatrix};
use qcp_core::zk::{ProofContext, ProofEngine, SchnorrEngine};

fn bench_pipeline(c: &mut Criterion) {
    let chunk: Vec<u8> = (0..256).map(|i| (i * 31 % 256) as u8).collect();

    c.bench_function("encode_256b_chunk", |b| {
        b.iter(|| DensityMatrix::encode(&chunk).unwrap())
    });

    let density = DensityMatrix::encode(&chunk).unwrap();
    c.bench_function("entropy_16x16", |b| b.iter(|| von_neumann_entropy(&density)));

    let vector: Vec<f64> = density.state_vector().iter().copied().collect();
    let engine = SchnorrEngine::new(vector.len());
    let context = ProofContext::new("bench", vector.len());

    c.bench_function("commit_dim256", |b| b.iter(|| engine.commit(&vector).unwrap()));

    let (commitment, blinding) = engine.commit(&vector).unwrap();
    c.bench_function("prove_dim256", |b| {
        b.iter(|| engine.prove(&vector, &blinding, &context).unwrap())
    });

    let proof = engine.prove(&vector, &blinding, &context).unwrap();
    c.bench_function("verify_dim256", |b| {
        b.iter(|| engine.verify(&commitment, &proof, &context))
    });
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
