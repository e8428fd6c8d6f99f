//! `confstack merge`: load, merge and print layered config files.

use anyhow::Result;
use clap::Args;
use serde_json::Value;
use std::path::PathBuf;

use confstack::{load_merged, ConfigFormat, ConfigSource, ErrorPolicy};

#[derive(Args)]
pub struct MergeArgs {
    /// Config files to merge, lowest layer first (later files override earlier ones)
    #[arg(required = true)]
    sources: Vec<PathBuf>,

    /// Declared format for every source: json, toml, yaml, infer or unknown
    #[arg(short, long, default_value = "infer")]
    format: String,

    /// Encoding label used to decode file bytes (default: utf-8)
    #[arg(short, long)]
    encoding: Option<String>,

    /// Error-handling policy: abort, ignore or propagate
    #[arg(short, long, default_value = "abort")]
    policy: String,

    /// Pretty-print the merged JSON
    #[arg(long)]
    pretty: bool,
}

pub fn run(args: MergeArgs) -> Result<()> {
    let format: ConfigFormat = args.format.parse()?;
    let policy: ErrorPolicy = args.policy.parse()?;

    let mut sources: Vec<ConfigSource> =
        args.sources.into_iter().map(ConfigSource::path).collect();
    let merged = load_merged(Some(&mut sources), format, args.encoding.as_deref(), policy)?;

    let merged = Value::Object(merged);
    let rendered = if args.pretty {
        serde_json::to_string_pretty(&merged)?
    } else {
        serde_json::to_string(&merged)?
    };
    println!("{rendered}");
    Ok(())
}
