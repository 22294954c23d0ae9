use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use std::{
    io::{stderr, stdout, Write},
    path::PathBuf,
    process::ExitCode,
};

mod dynamics;
mod format;
mod instruments;
mod key;
mod midi;
mod read;

use read::Outcome;

/// Print a readable transcription of Standard MIDI Files.
#[derive(Parser, Debug)]
#[command(version)]
struct Opt {
    /// MIDI files to read, in order
    files: Vec<PathBuf>,
    /// More diagnostics on stderr (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn main() -> Result<ExitCode> {
    let opt = Opt::parse();
    env_logger::Builder::new()
        .filter_level(log_level(opt.verbose))
        .parse_default_env()
        .init();

    let mut out = stdout().lock();
    let mut err = stderr().lock();
    let outcome = read::exec(&opt.files, &mut out, &mut err).context("writing transcription")?;
    out.flush().context("flushing stdout")?;

    Ok(match outcome {
        Outcome::Success | Outcome::NothingToDo => ExitCode::SUCCESS,
        Outcome::Failed => ExitCode::FAILURE,
    })
}
