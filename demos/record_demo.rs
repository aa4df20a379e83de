//! Record Demo - Token Analysis Snapshot
//!
//! Simulasi end-to-end:
//! 1. Bangun batch hasil analisis token (record bersarang)
//! 2. Encode ke Buffer lalu persist ke file
//! 3. Map file kembali dan decode zero-copy dari borrowed view
//!
//! Usage:
//!   cargo run --release --example record_demo -- [options]
//!
//! Options:
//!   --tokens <N>     Jumlah token (default: 1000)
//!   --width <N>      Prefix width untuk string/sequence, 1-8 (default: 2)
//!   --out <path>     File output (default: record_demo.bin)

use std::collections::BTreeMap;
use std::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use wirebuf::{wire_record, Buffer, MappedFile, PrefixWidth, Result};

/// Token Analysis Result
#[derive(Debug, Clone, PartialEq)]
struct TokenAnalysis {
    /// Contract address (hex)
    contract_address: String,
    /// Chain ID (1 = ETH, 8453 = Base, 501 = Solana)
    chain_id: u32,
    /// Risk score 0-100
    risk_score: u8,
    honeypot: bool,
    /// (buy, sell) tax dalam persen
    taxes: (u8, u8),
    liquidity_usd: f64,
    holder_count: u32,
    flags: Vec<String>,
}

wire_record!(TokenAnalysis {
    contract_address,
    chain_id,
    risk_score,
    honeypot,
    taxes,
    liquidity_usd,
    holder_count,
    flags,
});

/// Batch dengan index chain -> jumlah token
#[derive(Debug, Clone, PartialEq)]
struct Snapshot {
    sequence: u64,
    tokens: Vec<TokenAnalysis>,
    per_chain: BTreeMap<u32, u32>,
}

wire_record!(Snapshot {
    sequence,
    tokens,
    per_chain,
});

struct Options {
    tokens: usize,
    width: u8,
    out: String,
}

fn parse_args() -> Options {
    let mut opts = Options {
        tokens: 1000,
        width: 2,
        out: "record_demo.bin".to_string(),
    };

    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match (args[i].as_str(), args.get(i + 1)) {
            ("--tokens", Some(v)) => opts.tokens = v.parse().unwrap_or(opts.tokens),
            ("--width", Some(v)) => opts.width = v.parse().unwrap_or(opts.width),
            ("--out", Some(v)) => opts.out = v.clone(),
            (other, _) => warn!(arg = other, "ignoring unknown argument"),
        }
        i += 2;
    }
    opts
}

fn build_snapshot(count: usize) -> Snapshot {
    const CHAINS: [u32; 3] = [1, 8453, 501];

    let mut per_chain = BTreeMap::new();
    let tokens = (0..count)
        .map(|i| {
            let chain_id = CHAINS[i % CHAINS.len()];
            *per_chain.entry(chain_id).or_insert(0) += 1;

            let risk_score = (i * 37 % 101) as u8;
            let mut flags = Vec::new();
            if risk_score > 80 {
                flags.push("high-risk".to_string());
            }
            if i % 7 == 0 {
                flags.push("mintable".to_string());
            }

            TokenAnalysis {
                contract_address: format!("0x{:040x}", i.wrapping_mul(0x9E37_79B9)),
                chain_id,
                risk_score,
                honeypot: risk_score > 95,
                taxes: ((i % 10) as u8, (i % 25) as u8),
                liquidity_usd: 1_000.0 + i as f64 * 12.5,
                holder_count: (i * 13) as u32,
                flags,
            }
        })
        .collect();

    Snapshot {
        sequence: 1,
        tokens,
        per_chain,
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let opts = parse_args();
    let width = PrefixWidth::new(opts.width)?;

    println!("🎯 Record Demo - Token Analysis Snapshot");
    println!("========================================\n");

    let snapshot = build_snapshot(opts.tokens);

    // Byte pertama: lebar prefix, supaya reader bisa pilih mode yang sama
    let start = Instant::now();
    let mut buf = Buffer::new();
    buf.write(&width.bytes())?.write(&width)?.write(&snapshot)?;
    let encode_duration = start.elapsed();
    info!(bytes = buf.len(), capacity = buf.capacity(), "snapshot encoded");

    MappedFile::persist(&opts.out, &buf)?;

    let decoded = {
        let mapped = MappedFile::open(&opts.out)?;
        let mut view = mapped.buffer();

        let start = Instant::now();
        let mut mode = PrefixWidth::new(view.read::<u8>()?)?;
        view.read_into(&mut mode)?;
        let decoded: Snapshot = view.read()?;
        let decode_duration = start.elapsed();

        println!("📊 Results:");
        println!("  Tokens:        {}", decoded.tokens.len());
        println!("  Prefix width:  {}", mode.bytes());
        println!("  File size:     {} bytes", mapped.len());
        println!("  Encode:        {:?}", encode_duration);
        println!("  Decode:        {:?}", decode_duration);
        decoded
    };

    for (chain, count) in &decoded.per_chain {
        println!("  Chain {:>5}:   {} tokens", chain, count);
    }

    if decoded == snapshot {
        println!("\n✅ Snapshot roundtrip OK");
    } else {
        warn!("decoded snapshot differs from source");
    }

    std::fs::remove_file(&opts.out).ok();
    Ok(())
}
