//! `availability` — offline driver for the availability engine.
//!
//! Reads products/facts as JSON, runs the engine, prints JSON results.

mod args;
mod config;

mod exitcodes {
    pub const OK: u8 = 0;
    pub const FAILURE: u8 = 1;
    /// The run completed but at least one variant kept its previous status.
    pub const PARTIAL: u8 = 3;
}

use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use serde::Serialize;
use serde::de::DeserializeOwned;

use availability_engine::{
    EngineConfig, FixedClock, MetafieldFlags, Processor, Product, VariantFacts, VariantId,
    apply_override, classify_at,
};

use args::{Args, Command};

fn main() -> ExitCode {
    let args = Args::parse();
    availability_observability::init(args.log_format.into());

    match run(&args) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "availability command failed");
            eprintln!("availability: error: {err:#}");
            ExitCode::from(exitcodes::FAILURE)
        }
    }
}

fn run(args: &Args) -> Result<u8> {
    let config = config::from_env();
    let now = args.now.unwrap_or_else(Utc::now);

    let (output, code) = match &args.command {
        Command::Classify { facts } => {
            let facts: VariantFacts = read_json(facts)?;
            (to_json(&classify_at(&facts, now, &config), args.compact)?, exitcodes::OK)
        }
        Command::Process { product } => {
            let product: Product = read_json(product)?;
            let (json, partial) = process_product(&product, now, config, args.compact)?;
            let code = if partial { exitcodes::PARTIAL } else { exitcodes::OK };
            (json, code)
        }
        Command::Override {
            product,
            variant,
            flags,
        } => {
            let product: Product = read_json(product)?;
            let flags: MetafieldFlags = read_json(flags)?;
            let variant: VariantId = variant.parse()?;
            let edited = apply_override(&product, &variant, &flags, now, &config)
                .with_context(|| format!("override rejected for variant {variant}"))?;
            (to_json(&edited, args.compact)?, exitcodes::OK)
        }
    };

    println!("{output}");
    Ok(code)
}

fn process_product(
    product: &Product,
    now: DateTime<Utc>,
    config: EngineConfig,
    compact: bool,
) -> Result<(String, bool)> {
    let snapshot = Processor::with_clock(FixedClock(now))
        .with_config(config)
        .process(product);
    let partial = snapshot.summary.is_partial();
    Ok((to_json(&snapshot, compact)?, partial))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        buf
    } else {
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?
    };

    serde_json::from_str(&raw).with_context(|| format!("invalid JSON in {}", path.display()))
}

fn to_json<T: Serialize>(value: &T, compact: bool) -> Result<String> {
    let json = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    Ok(json)
}
