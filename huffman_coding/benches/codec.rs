use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId, Throughput};
use huffman_coding::{CodeMap, CodeTree, Decoder, DecodingResult, Encoded, FrequencyTable, PackedBits};
use rand::prelude::*;
use rand::distributions::WeightedIndex;
use rand_pcg::Pcg64Mcg;

/// Returns `len` pseudo-random bytes drawn from `symbols` values, each successive value 10% more frequent.
fn text(len: usize, symbols: u16) -> Vec<u8> {
    let weights: Vec<_> = (1..=symbols as i32).map(|v| 1.1f64.powi(v)).collect();
    let dist = WeightedIndex::new(weights).unwrap();
    dist.sample_iter(Pcg64Mcg::seed_from_u64(1234)).map(|v| v as u8).take(len).collect()
}

pub fn construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("construction");
    for symbols in [4u16, 64, 256] {
        let frequencies = FrequencyTable::<u8>::count(text(1 << 16, symbols));
        group.bench_with_input(BenchmarkId::new("tree", symbols), &frequencies, |b, f| {
            b.iter(|| CodeTree::build(black_box(f)).unwrap())
        });
        let tree = CodeTree::build(&frequencies).unwrap();
        group.bench_with_input(BenchmarkId::new("map", symbols), &tree, |b, t| {
            b.iter(|| CodeMap::derive(black_box(t)).unwrap())
        });
    }
    group.finish();
}

pub fn coding(c: &mut Criterion) {
    let text = text(1 << 16, 256);
    let tree = CodeTree::build(&FrequencyTable::<u8>::count(&text)).unwrap();
    let map = CodeMap::derive(&tree).unwrap();
    let bits = Encoded::new(&text, &map).collect::<huffman_coding::Result<PackedBits>>().unwrap();

    let mut group = c.benchmark_group("coding");
    group.throughput(Throughput::Bytes(text.len() as u64));
    group.bench_function("count", |b| b.iter(|| FrequencyTable::<u8>::count(black_box(&text))));
    group.bench_function("encode", |b| b.iter(||
        Encoded::new(black_box(&text), &map).collect::<huffman_coding::Result<PackedBits>>().unwrap()
    ));
    group.bench_function("decode", |b| b.iter(|| {
        let mut d = Decoder::new(&tree);
        for bit in bits.iter() {
            if let DecodingResult::Value(v) = d.consume(bit) { black_box(v); }
        }
    }));
    group.finish();
}

criterion_group!(benches, construction, coding);
criterion_main!(benches);
