use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use varpack::codec::{fixed, varint};
use varpack::io as record;

const COUNT: usize = 16 * 1024;

/// Values whose zig-zag magnitude fits in at most `bits` bits.
fn gen_values(bits: u32, seed: u64) -> Vec<i64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let bound = if bits >= 63 { i64::MAX } else { 1i64 << (bits - 1) };
    (0..COUNT).map(|_| rng.random_range(-bound..bound)).collect()
}

fn encode_stream(values: &[i64]) -> Vec<u8> {
    let mut out = Vec::with_capacity(values.iter().map(|&v| varint::size_of_varlong(v)).sum());
    for &v in values {
        varint::encode_varlong_into(v, &mut out);
    }
    out
}

fn bench_encode(c: &mut Criterion) {
    let mut g = c.benchmark_group("varlong_encode");
    for bits in [7u32, 14, 28, 63] {
        let values = gen_values(bits, u64::from(bits));
        g.throughput(Throughput::Elements(COUNT as u64));
        g.bench_with_input(BenchmarkId::from_parameter(bits), &bits, |b, _| {
            b.iter(|| black_box(encode_stream(black_box(&values))));
        });
    }
    g.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut g = c.benchmark_group("varlong_decode");
    for bits in [7u32, 14, 28, 63] {
        let encoded = encode_stream(&gen_values(bits, u64::from(bits) + 100));
        g.throughput(Throughput::Bytes(encoded.len() as u64));
        g.bench_with_input(BenchmarkId::from_parameter(bits), &bits, |b, _| {
            b.iter(|| {
                let data = black_box(&encoded);
                let mut pos = 0;
                let mut acc = 0i64;
                while pos < data.len() {
                    let (v, n) = varint::decode_varlong(&data[pos..]).unwrap();
                    acc = acc.wrapping_add(v);
                    pos += n;
                }
                black_box(acc)
            });
        });
    }
    g.finish();
}

fn bench_size(c: &mut Criterion) {
    let values = gen_values(63, 7);
    c.bench_function("size_of_varlong", |b| {
        b.iter(|| {
            let total: usize = black_box(&values)
                .iter()
                .map(|&v| varint::size_of_varlong(v))
                .sum();
            black_box(total)
        });
    });
}

fn bench_fixed(c: &mut Criterion) {
    let mut buf = vec![0u8; COUNT * 4];
    let mut g = c.benchmark_group("fixed_u32");
    g.throughput(Throughput::Bytes(buf.len() as u64));
    g.bench_function("write_be", |b| {
        b.iter(|| {
            for i in 0..COUNT {
                fixed::write_u32_be(&mut buf, i * 4, i as u32).unwrap();
            }
        });
    });
    g.bench_function("read_le", |b| {
        b.iter(|| {
            let mut acc = 0u32;
            for i in 0..COUNT {
                acc = acc.wrapping_add(fixed::read_u32_le(black_box(&buf), i * 4).unwrap());
            }
            black_box(acc)
        });
    });
    g.finish();
}

fn bench_record(c: &mut Criterion) {
    let values = gen_values(28, 42);
    let encoded = record::encode_record(&values);
    let mut g = c.benchmark_group("record");
    g.throughput(Throughput::Elements(COUNT as u64));
    g.bench_function("encode", |b| {
        b.iter(|| black_box(record::encode_record(black_box(&values))));
    });
    g.bench_function("decode", |b| {
        b.iter(|| black_box(record::decode_record(black_box(&encoded)).unwrap()));
    });
    g.finish();
}

criterion_group!(
    benches,
    bench_encode,
    bench_decode,
    bench_size,
    bench_fixed,
    bench_record
);
criterion_main!(benches);
