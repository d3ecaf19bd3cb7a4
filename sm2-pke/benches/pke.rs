//! SM2 encryption benchmarks

use core::hint::black_box;
use criterion::{
    BenchmarkGroup, Criterion, criterion_group, criterion_main, measurement::Measurement,
};
use hex_literal::hex;
use rand_core::OsRng;
use sm2_pke::{CurveParams, DecryptingKey, U256};

const DECRYPTING_KEY_BYTES: [u8; 32] =
    hex!("1cf6bc6c7f642a84994119e206c9f0753ff100709f4fd12f2338c1be60bf4175");

const MSG: &[u8] = b"example message";

fn decrypting_key() -> DecryptingKey {
    DecryptingKey::from_slice(&CurveParams::sm2p256v1(), &DECRYPTING_KEY_BYTES).unwrap()
}

fn bench_scalar_mul<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    let curve = CurveParams::sm2p256v1();
    let k = black_box(U256::from_be_slice(&DECRYPTING_KEY_BYTES));
    group.bench_function("mul_generator", |b| {
        b.iter(|| black_box(curve.mul_generator(&k)))
    });
}

fn bench_encrypt<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    let dk = decrypting_key();
    let ek = black_box(dk.encrypting_key());
    group.bench_function("encrypt", |b| {
        b.iter(|| black_box(ek.encrypt(&mut OsRng, black_box(MSG))))
    });
}

fn bench_decrypt<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    let dk = black_box(decrypting_key());
    let ciphertext = dk.encrypting_key().encrypt(&mut OsRng, MSG).unwrap();
    group.bench_function("decrypt", |b| {
        b.iter(|| black_box(dk.decrypt(black_box(&ciphertext))))
    });
}

fn bench_pke(c: &mut Criterion) {
    let mut group = c.benchmark_group("SM2 PKE");
    group.sample_size(10);
    bench_scalar_mul(&mut group);
    bench_encrypt(&mut group);
    bench_decrypt(&mut group);
    group.finish();
}

criterion_group!(benches, bench_pke);
criterion_main!(benches);
