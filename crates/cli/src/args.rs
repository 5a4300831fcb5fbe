//! Command-line surface.
//!
//! Inputs are JSON files (`-` reads stdin); results are printed as JSON on
//! stdout. Logs go to stderr.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};

use availability_observability::LogFormat;

#[derive(Debug, Parser, Clone)]
#[command(
    name = "availability",
    disable_help_subcommand = true,
    about = "Derive variant availability statuses and product tags"
)]
pub struct Args {
    /// Evaluation instant (RFC 3339). Defaults to the current time.
    #[arg(long, global = true, value_parser = parse_instant)]
    pub now: Option<DateTime<Utc>>,

    /// Log line format on stderr.
    #[arg(long, global = true, value_enum, default_value_t = LogStyle::Json)]
    pub log_format: LogStyle,

    /// Print compact JSON instead of pretty-printed JSON.
    #[arg(long, global = true)]
    pub compact: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Classify a single variant from its facts (what-if evaluation).
    Classify {
        /// VariantFacts JSON path.
        #[arg(long)]
        facts: PathBuf,
    },
    /// Run the batch processor over a product and print the snapshot.
    Process {
        /// Product JSON path (a previous snapshot's `product` works too).
        #[arg(long)]
        product: PathBuf,
    },
    /// Apply a manual metafield edit to one variant and print the product.
    Override {
        /// Product JSON path.
        #[arg(long)]
        product: PathBuf,
        /// Variant identifier within the product.
        #[arg(long)]
        variant: String,
        /// MetafieldFlags JSON path.
        #[arg(long)]
        flags: PathBuf,
    },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum LogStyle {
    Json,
    Pretty,
}

impl From<LogStyle> for LogFormat {
    fn from(style: LogStyle) -> Self {
        match style {
            LogStyle::Json => LogFormat::Json,
            LogStyle::Pretty => LogFormat::Pretty,
        }
    }
}

fn parse_instant(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| format!("expected an RFC 3339 timestamp: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn process_with_pinned_instant() {
        let args = Args::try_parse_from([
            "availability",
            "process",
            "--product",
            "product.json",
            "--now",
            "2026-10-16T12:00:00Z",
        ])
        .unwrap();

        assert_eq!(args.now, Some(Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap()));
        assert_eq!(args.log_format, LogStyle::Json);
        match args.command {
            Command::Process { product } => assert_eq!(product, PathBuf::from("product.json")),
            other => panic!("Expected Process command, got {other:?}"),
        }
    }

    #[test]
    fn override_requires_variant_and_flags() {
        assert!(
            Args::try_parse_from(["availability", "override", "--product", "p.json"]).is_err()
        );

        let args = Args::try_parse_from([
            "availability",
            "--log-format",
            "pretty",
            "override",
            "--product",
            "p.json",
            "--variant",
            "v2",
            "--flags",
            "flags.json",
        ])
        .unwrap();
        assert_eq!(args.log_format, LogStyle::Pretty);
        assert!(matches!(args.command, Command::Override { ref variant, .. } if variant == "v2"));
    }

    #[test]
    fn malformed_instant_is_rejected() {
        let err = Args::try_parse_from([
            "availability",
            "classify",
            "--facts",
            "f.json",
            "--now",
            "yesterday",
        ])
        .unwrap_err();
        assert!(err.to_string().contains("RFC 3339"));
    }
}
