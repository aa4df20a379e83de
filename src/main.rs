//! Wirebuf - micro-benchmark untuk buffer dan codec
//!
//! Usage:
//!   cargo run --release -- [iterations]
//!   RUST_LOG=wirebuf=trace cargo run --release -- 1000

use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use tracing::info;
use tracing_subscriber::EnvFilter;
use wirebuf::{wire_record, Buffer, MappedFile, PrefixWidth, Result};

const DEFAULT_ITERATIONS: usize = 1_000_000;

/// Record contoh untuk benchmark record codec
#[derive(Debug, Clone, PartialEq)]
struct Quote {
    symbol: String,
    sequence: u64,
    bid: f64,
    ask: f64,
    venues: Vec<u16>,
}

wire_record!(Quote {
    symbol,
    sequence,
    bid,
    ask,
    venues,
});

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let iterations = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(DEFAULT_ITERATIONS);

    println!("🚀 Wirebuf - Binary Serialization Buffer");
    println!("========================================\n");
    info!(iterations, "starting benchmarks");

    benchmark_scalar_codec(iterations)?;
    benchmark_record_codec(iterations / 10)?;
    benchmark_cow_clone(iterations)?;
    benchmark_mapped_file(iterations / 10)?;

    println!("\n✅ All benchmarks complete!");
    Ok(())
}

fn report(label: &str, ops: usize, elapsed: Duration) {
    let ns = elapsed.as_nanos() as f64 / ops.max(1) as f64;
    println!("  {:<18} {:.2} ns/op ({:.3} μs/op)", label, ns, ns / 1000.0);
}

fn benchmark_scalar_codec(iterations: usize) -> Result<()> {
    println!("📊 Scalar Codec Benchmark (u64 append/read)");
    println!("-------------------------------------------");

    let mut buf = Buffer::new();

    let start = Instant::now();
    for i in 0..iterations {
        buf.write(&(i as u64))?;
    }
    let write_duration = start.elapsed();

    let start = Instant::now();
    let mut sum = 0u64;
    for _ in 0..iterations {
        sum = sum.wrapping_add(buf.read::<u64>()?);
    }
    let read_duration = start.elapsed();

    println!("  Operations: {}", iterations);
    println!("  Buffer: {} bytes, capacity {}", buf.len(), buf.capacity());
    report("Write latency:", iterations, write_duration);
    report("Read latency:", iterations, read_duration);
    println!("  Checksum: {}\n", sum);
    Ok(())
}

fn benchmark_record_codec(iterations: usize) -> Result<()> {
    println!("📊 Record Codec Benchmark (string + vec + f64)");
    println!("----------------------------------------------");

    let quote = Quote {
        symbol: "BTC-USD".to_string(),
        sequence: 0,
        bid: 64_000.5,
        ask: 64_001.0,
        venues: vec![1, 2, 3, 5, 8],
    };

    let mut buf = Buffer::new().with_prefix_width(PrefixWidth::ONE);
    let start = Instant::now();
    for _ in 0..iterations {
        buf.write(&quote)?;
    }
    let encode_duration = start.elapsed();

    let start = Instant::now();
    for _ in 0..iterations {
        let decoded: Quote = buf.read()?;
        debug_assert_eq!(decoded, quote);
    }
    let decode_duration = start.elapsed();

    println!("  Record size: {} bytes", buf.len() / iterations.max(1));
    report("Encode latency:", iterations, encode_duration);
    report("Decode latency:", iterations, decode_duration);

    let mut index = BTreeMap::new();
    index.insert(quote.symbol.clone(), quote.sequence);
    let mut side = Buffer::new();
    side.write(&index)?;
    println!("  Index map: {} bytes\n", side.len());
    Ok(())
}

fn benchmark_cow_clone(iterations: usize) -> Result<()> {
    println!("📊 Copy-on-Write Benchmark (64KB buffer)");
    println!("----------------------------------------");

    let mut base = Buffer::with_capacity(64 * 1024);
    base.append(&vec![0xABu8; 64 * 1024])?;

    let start = Instant::now();
    for _ in 0..iterations {
        let copy = base.clone();
        std::hint::black_box(&copy);
    }
    let share_duration = start.elapsed();

    let detach_ops = (iterations / 100).max(1);
    let start = Instant::now();
    for _ in 0..detach_ops {
        let mut copy = base.clone();
        copy.put(0, &[1])?;
        std::hint::black_box(&copy);
    }
    let detach_duration = start.elapsed();

    report("Share (clone):", iterations, share_duration);
    report("Detach (1st put):", detach_ops, detach_duration);
    println!();
    Ok(())
}

fn benchmark_mapped_file(iterations: usize) -> Result<()> {
    println!("📊 Mapped File Benchmark (Zero-Copy Decode)");
    println!("-------------------------------------------");

    let path = "wirebuf_bench.dat";
    let mut buf = Buffer::new();
    for i in 0..iterations {
        buf.write(&(i as u32))?.write("payload")?;
    }
    MappedFile::persist(path, &buf)?;

    {
        let mapped = MappedFile::open(path)?;
        let mut view = mapped.buffer();
        let start = Instant::now();
        for _ in 0..iterations {
            let _id: u32 = view.read()?;
            let _body: String = view.read()?;
        }
        let read_duration = start.elapsed();

        println!("  File size: {} bytes", mapped.len());
        report("Decode latency:", iterations, read_duration);
    }

    std::fs::remove_file(path).ok();
    Ok(())
}
