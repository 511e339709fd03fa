use std::{hint::black_box, time::{Duration, Instant}};

use clap::Args;
use dyn_size_of::GetSize;
use rand::prelude::*;
use rand::distributions::WeightedIndex;
use rand_pcg::Pcg64Mcg;

use huffman_coding::{CodeMap, CodeTree, Decoder, DecodingResult, Encoded, Error, FrequencyTable, PackedBits, Result};

#[derive(Args)]
pub struct BenchConf {
    /// Number of bytes of the generated text
    #[arg(short = 'l', long, default_value_t = 1024*1024)]
    pub len: usize,

    /// Number of distinct bytes in the generated text
    #[arg(long, default_value_t = 256, value_parser = clap::value_parser!(u16).range(1..=256))]
    pub symbols: u16,

    /// Skew of byte frequencies, in thousandths: byte i+1 is 1+SPREAD/1000 times as frequent as byte i
    #[arg(short = 'r', long, default_value_t = 100)]
    pub spread: u32,

    /// Seconds spent on repeating each measured operation
    #[arg(short = 't', long, default_value_t = 5)]
    pub time: u16,

    /// Decode the encoded text and compare it with the generated one
    #[arg(long)]
    pub verify: bool,

    /// Seed of the text generator
    #[arg(short = 's', long, default_value_t = 1234)]
    pub seed: u64,
}

impl BenchConf {
    /// Generates the text to code. Bytes `0..symbols` occur in the text at least once (if it is long enough).
    fn text(&self) -> Result<Vec<u8>> {
        let distinct = (self.symbols as usize).min(self.len);
        let skew = 1.0 + self.spread as f64 / 1000.0;
        let dist = WeightedIndex::new((0..self.symbols as i32).map(|i| skew.powi(i)))
            .map_err(|_| Error::InvalidData("spread makes byte frequencies unrepresentable"))?;
        let mut result: Vec<u8> = (0..distinct).map(|v| v as u8).collect();
        result.extend(dist.sample_iter(Pcg64Mcg::seed_from_u64(self.seed)).map(|v| v as u8).take(self.len - distinct));
        Ok(result)
    }

    /// Repeats `f` for `self.time` seconds (at least once) and returns the average time of a single call.
    fn measure<R, F: FnMut() -> R>(&self, mut f: F) -> Duration {
        let limit = Duration::from_secs(self.time as u64);
        let start = Instant::now();
        let mut calls = 0u32;
        loop {
            black_box(f());
            calls += 1;
            if start.elapsed() >= limit { break; }
        }
        start.elapsed() / calls
    }

    fn report(&self, operation: &str, time: Duration) {
        let mib_per_sec = self.len as f64 / (1024.0 * 1024.0) / time.as_secs_f64();
        println!("{operation}: {} ns, {mib_per_sec:.0} MiB/s", time.as_nanos());
    }
}

/// Returns the index of the first byte at which `decoded` differs from `original`, or `None` if they are equal.
fn first_difference(original: &[u8], decoded: &[u8]) -> Option<usize> {
    original.iter().zip(decoded).position(|(o, d)| o != d)
        .or_else(|| (original.len() != decoded.len()).then(|| original.len().min(decoded.len())))
}

fn encode(text: &[u8], map: &CodeMap<u8>) -> Result<PackedBits> {
    Encoded::new(text, map).collect()
}

/// Decodes all bytes from `bits`, passing each to `f`.
fn decode<F: FnMut(u8)>(tree: &CodeTree<u8>, bits: &PackedBits, mut f: F) {
    let mut decoder = Decoder::new(tree);
    for bit in bits.iter() {
        if let DecodingResult::Value(v) = decoder.consume(bit) { f(*v); }
    }
}

pub fn benchmark(conf: &BenchConf) -> Result<()> {
    let text = conf.text()?;

    conf.report("Counting", conf.measure(|| FrequencyTable::<u8>::count(&text)));
    let frequencies = FrequencyTable::<u8>::count(&text);
    println!("Entropy: {:.3} bits/byte", frequencies.entropy());

    let tree_time = conf.measure(|| CodeTree::build(&frequencies));
    let tree = CodeTree::build(&frequencies)?;
    let map_time = conf.measure(|| CodeMap::derive(&tree));
    let map = CodeMap::derive(&tree)?;
    println!("Building tree: {} ns, deriving codes: {} ns", tree_time.as_nanos(), map_time.as_nanos());
    println!("Tree: {} bytes, height {}", tree.size_bytes(), tree.height());
    if let Some(average_len) = map.average_len(&frequencies) {
        println!("Average code length: {:.3} bits/byte", average_len);
    }

    conf.report("Encoding", conf.measure(|| encode(&text, &map)));
    let bits = encode(&text, &map)?;
    println!("Encoded: {} bits, {} bytes in memory", bits.len(), bits.size_bytes());

    conf.report("Decoding", conf.measure(|| decode(&tree, &bits, |v| { black_box(v); })));

    if conf.verify {
        let mut decoded = Vec::with_capacity(text.len());
        decode(&tree, &bits, |v| decoded.push(v));
        match first_difference(&text, &decoded) {
            None => println!("Verification: OK"),
            Some(index) => println!("Verification: FAIL at byte {} of {} (decoded {})", index, text.len(), decoded.len()),
        }
    }
    Ok(())
}
