//! erbgen CLI
//!
//! Usage:
//!   erbgen [DIR]
//!
//! Scans `DIR` (default: the current directory) and writes a `<stem>_gen.rs`
//! file for every source file with annotated template types. Success is
//! silent; set `RUST_LOG=info` to list written files.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::error;

use erbgen::{Config, GenerateError, Generator};

#[derive(Parser)]
#[command(name = "erbgen")]
#[command(version, about = "Compile embedded Rust templates into writer functions")]
struct Cli {
    /// Directory to scan (defaults to the current directory)
    dir: Option<PathBuf>,
}

fn run(cli: Cli) -> Result<(), GenerateError> {
    let dir = match cli.dir {
        Some(dir) => dir,
        None => std::env::current_dir().map_err(|source| GenerateError::ListDir {
            path: PathBuf::from("."),
            source,
        })?,
    };

    let config = Config::load(&dir)?;
    Generator::new(config).run(&dir)?;
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        error!("{}", e.report());
        process::exit(1);
    }
}
