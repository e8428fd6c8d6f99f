//! `confstack check`: parse each config file and report diagnostics.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use confstack::{detect_format, load_map_from_source, ConfigFormat, ConfigSource};

#[derive(Args)]
pub struct CheckArgs {
    /// Config files to check
    #[arg(required = true)]
    sources: Vec<PathBuf>,

    /// Declared format for every source: json, toml, yaml, infer or unknown
    #[arg(short, long, default_value = "infer")]
    format: String,

    /// Encoding label used to decode file bytes (default: utf-8)
    #[arg(short, long)]
    encoding: Option<String>,

    /// Maximum config file size in bytes
    #[arg(long)]
    max_size: Option<u64>,
}

pub fn run(args: CheckArgs) -> Result<()> {
    let format: ConfigFormat = args.format.parse()?;

    let mut failures = 0usize;
    for path in &args.sources {
        let detected = detect_format(path);
        let mut source = ConfigSource::path(path);
        match load_map_from_source(&mut source, format, args.encoding.as_deref(), args.max_size)
        {
            Ok(map) => println!(
                "{}: ok ({detected}, {} top-level keys)",
                path.display(),
                map.len()
            ),
            Err(err) => {
                failures += 1;
                println!("{}: {err}", path.display());
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} of {} config sources failed to load", args.sources.len());
    }
    Ok(())
}
