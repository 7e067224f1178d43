//! Demo binary: tiled vs reference matrix multiplication
//!
//! Run with:
//! ```
//! cargo run --release -- --n 512 --tile-width 16 --seed 42
//! ```
//!
//! Exits 0 on a completed run regardless of the verdict; exits non-zero
//! only if the parallel path fails to execute.

use std::process::ExitCode;

use baldosa::{harness, HarnessConfig};

fn main() -> ExitCode {
    let config = match parse_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("{message}");
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    println!("🧱 Baldosa Tiled Matrix Multiplication\n");
    println!(
        "matrix: {}×{}  tile width: {}  seed: {}",
        config.n,
        config.n,
        config.tile_width,
        config
            .seed
            .map_or_else(|| "entropy".to_string(), |s| s.to_string())
    );
    println!("{}", "=".repeat(60));

    let report = match harness::run(&config) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::FAILURE;
        }
    };

    println!("tiled (parallel):      {:>10.3} ms", report.tiled_ms);
    println!("reference (serial):    {:>10.3} ms", report.reference_ms);
    println!("speedup:               {:>10.2}x", report.speedup());
    println!("{}", "-".repeat(60));

    if report.matched {
        println!("verdict: match (max abs diff = {:e})", report.max_abs_diff);
    } else {
        println!("verdict: differ (max abs diff = {:e})", report.max_abs_diff);
    }

    ExitCode::SUCCESS
}

const USAGE: &str = "Usage: baldosa [--n N] [--tile-width W] [--seed S]

Options:
  --n N             matrix dimension (default 512)
  --tile-width W    tile width for the parallel multiplier (default 16)
  --seed S          seed for input generation (default: entropy)
  -h, --help        print this help";

fn parse_args<I: Iterator<Item = String>>(mut args: I) -> Result<HarnessConfig, String> {
    let mut config = HarnessConfig::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--n" | "-n" => config.n = parse_value(&arg, args.next())?,
            "--tile-width" | "-t" => config.tile_width = parse_value(&arg, args.next())?,
            "--seed" | "-s" => config.seed = Some(parse_value(&arg, args.next())?),
            "--help" | "-h" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            other => return Err(format!("unknown argument: {other}")),
        }
    }

    Ok(config)
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<String>) -> Result<T, String> {
    let value = value.ok_or_else(|| format!("{flag} requires a value"))?;
    value
        .parse()
        .map_err(|_| format!("invalid value for {flag}: {value}"))
}
