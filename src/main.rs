//! Streams generator output to stdout, for piping into statistical test
//! batteries such as PractRand (`prng_stream -a SFMT | RNG_test stdin32`).

use std::io::Write;
use std::path::PathBuf;
use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;
use prng_engines::*;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    /// Little-endian binary, natural output width.
    Raw,
    /// One decimal value per line.
    Decimal,
}

#[derive(Debug, Parser)]
#[command(name = "prng_stream", version, about = "Stream PRNG output to stdout")]
struct Args {
    /// Algorithm name (EMODLCG, EMODPDES, MT64, SFMT, AESCTR, RANDLIB).
    #[arg(short, long, conflicts_with = "config")]
    algorithm: Option<AlgorithmId>,

    /// Seed as hex digits.
    #[arg(short, long, conflicts_with = "config")]
    seed: Option<String>,

    /// TOML file with `algorithm` and `seed` keys.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of values to emit. Streams forever if omitted.
    #[arg(short = 'n', long)]
    count: Option<u64>,

    #[arg(short, long, value_enum, default_value_t = Format::Raw)]
    format: Format,
}

fn open(args: &Args) -> anyhow::Result<Prng> {
    if let Some(path) = &args.config {
        let config = GeneratorConfig::load(path)?;
        return config.build().with_context(|| format!("building generator from {}", path.display()));
    }
    let Some(algorithm) = args.algorithm else {
        bail!("either --algorithm or --config is required");
    };
    let seed = match &args.seed {
        Some(text) => parse_hex_seed(text)?,
        None => Vec::new(),
    };
    Ok(create_prng(algorithm, &seed)?)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut rng = open(&args)?;
    let width = rng.width();
    let mut stdout = std::io::stdout().lock();

    let mut v: Vec<u8> = Vec::new();
    let mut n: u64 = 0;

    while args.count.map_or(true, |count| n < count) {
        let x = rng.next_value();
        match args.format {
            Format::Raw => match width {
                OutputWidth::Bits32 => v.extend_from_slice(&(x as u32).to_le_bytes()),
                OutputWidth::Bits64 => v.extend_from_slice(&x.to_le_bytes()),
            },
            Format::Decimal => writeln!(v, "{}", x)?,
        }

        if v.len() >= 0x10000 {
            // A closed pipe ends the stream.
            if let Err(e) = stdout.write_all(v.as_slice()) {
                if e.kind() == std::io::ErrorKind::BrokenPipe {
                    return Ok(());
                }
                return Err(e.into());
            }
            v.clear();
        }

        n += 1;
    }

    stdout.write_all(v.as_slice())?;
    stdout.flush()?;
    Ok(())
}
