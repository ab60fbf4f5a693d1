use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use litevec_decoder::Decoder;
use litevec_tests::encode_to_vec;

fn walk(bytes: &[u8]) -> usize {
    let mut dec = Decoder::new(bytes);
    let mut count = 0;
    while dec.next().unwrap().is_some() {
        count += 1;
    }
    count
}

fn bench_decode_small(c: &mut Criterion) {
    let bytes = encode_to_vec(|e| {
        e.struct_start()
            .string("device")
            .string("sensor-17")
            .string("sequence")
            .u32(48_213)
            .string("healthy")
            .bool(true)
            .struct_end();
    });

    c.bench_function("decode_small", |b| {
        b.iter(|| walk(&bytes));
    });
}

fn bench_decode_scalar_heavy(c: &mut Criterion) {
    // Many small elements: struct keys alternating with scalars.
    let bytes = encode_to_vec(|e| {
        e.struct_start();
        for i in 0..1_000u32 {
            e.string("k").u32(i);
        }
        e.struct_end();
    });

    let mut group = c.benchmark_group("decode_scalar_heavy");
    group.throughput(Throughput::Bytes(bytes.len() as u64));
    group.bench_function("walk", |b| {
        b.iter(|| walk(&bytes));
    });
    group.finish();
}

fn bench_decode_string_validation(c: &mut Criterion) {
    let text = "sensor telemetry payload with strictly ascii content ".repeat(64);
    let bytes = encode_to_vec(|e| {
        e.list_start();
        for _ in 0..32 {
            e.string(&text);
        }
        e.list_end();
    });

    let mut group = c.benchmark_group("decode_string_validation");
    group.throughput(Throughput::Bytes(bytes.len() as u64));
    group.bench_function("utf8_checked", |b| {
        b.iter(|| {
            let mut dec = Decoder::with_utf8_validation(&bytes, true);
            while dec.next().unwrap().is_some() {}
        });
    });
    group.bench_function("utf8_unchecked", |b| {
        b.iter(|| {
            let mut dec = Decoder::with_utf8_validation(&bytes, false);
            while dec.next().unwrap().is_some() {}
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_decode_small,
    bench_decode_scalar_heavy,
    bench_decode_string_validation
);
criterion_main!(benches);
