//! confstack: merge layered configuration files from the command line.

use anyhow::Result;

mod cli;

fn main() -> Result<()> {
    cli::run()
}
