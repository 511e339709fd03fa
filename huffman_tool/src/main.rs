#![doc = include_str!("../README.md")]
mod bench;

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use huffman_coding::{Compressed, Result};

#[derive(Subcommand)]
pub enum Command {
    /// Compresses the INPUT file into the OUTPUT file
    #[clap(visible_alias = "c")]
    Compress {
        input: PathBuf,
        output: PathBuf
    },
    /// Decompresses the INPUT file (written by compress) into the OUTPUT file
    #[clap(visible_alias = "d")]
    Decompress {
        input: PathBuf,
        output: PathBuf
    },
    /// Benchmarks coding of pseudo-random text
    Bench(bench::BenchConf)
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum LogLevel { Trace, Debug, Info, Warn, Error }

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

#[derive(Parser)]
#[command(author, version, about, long_about = None, infer_subcommands=true)]
/// Huffman coding of files.
pub struct Conf {
    #[command(subcommand)]
    pub command: Command,

    /// Maximum level of the reported log events
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}

fn init_logging(level: LogLevel) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::from(level))
        .with_target(true)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Cannot set up logging: {}", e);
    }
}

fn compress(input: &PathBuf, output: &PathBuf) -> Result<()> {
    let text = fs::read(input)?;
    let compressed = Compressed::compress(&text)?;
    let mut out = BufWriter::new(File::create(output)?);
    compressed.write(&mut out)?;
    out.flush()?;
    info!(input_bytes = text.len(), output_bytes = compressed.write_bytes(),
        bits_per_byte = compressed.bits().len() as f64 / text.len() as f64, "compressed {}", input.display());
    Ok(())
}

fn decompress(input: &PathBuf, output: &PathBuf) -> Result<()> {
    let compressed = Compressed::<u8>::read(&mut BufReader::new(File::open(input)?))?;
    let text = compressed.decompress()?;
    fs::write(output, &text)?;
    info!(input_bytes = compressed.write_bytes(), output_bytes = text.len(), "decompressed {}", input.display());
    Ok(())
}

fn main() -> Result<()> {
    let conf: Conf = Conf::parse();
    init_logging(conf.log_level);
    match conf.command {
        Command::Compress { input, output } => compress(&input, &output),
        Command::Decompress { input, output } => decompress(&input, &output),
        Command::Bench(bench_conf) => bench::benchmark(&bench_conf),
    }
}
