//! Command-line front end for the `triage` binary
//!
//! [`Cli`] is the parsed argument set and [`run`] does everything after
//! parsing, against any reader/writer pair, so the binary only has to set up
//! logging and hand over stdin and stdout.

use std::error::Error;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use tracing::info;

use crate::min_heap::TieBreak;
use crate::session::Session;
use crate::triage::load_records;

/// How patients with equal priority are ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TieBreakArg {
    /// Equal priorities are served in whatever order the heap leaves them
    Structural,
    /// Equal priorities are served in admission order
    Sequence,
}

impl From<TieBreakArg> for TieBreak {
    fn from(arg: TieBreakArg) -> Self {
        match arg {
            TieBreakArg::Structural => TieBreak::Structural,
            TieBreakArg::Sequence => TieBreak::Sequence,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "triage")]
#[command(version)]
#[command(about = "Emergency-room triage simulation on a binary min-heap", long_about = None)]
pub struct Cli {
    /// Patient records, one `ID PRIORITY SYMPTOM` per line.
    pub data_file: Option<PathBuf>,
    /// How patients with the same priority are ordered.
    #[arg(long, value_enum, default_value_t = TieBreakArg::Structural)]
    pub tie_break: TieBreakArg,
    /// Print a single report for the data file and exit.
    #[arg(long, requires = "data_file")]
    pub batch: bool,
    /// Sets the verbosity level. Can be repeated up to 3 times, e.g. -vvv.
    /// Overridden by the TRIAGE_LOG environment variable.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Loads the data file, if any, then runs the menu or a single batch report
///
/// # Errors
/// Fails when the data file cannot be opened or parsed, or when reading input
/// or writing output fails. Errors name the data file they came from.
pub fn run<R, W>(cli: &Cli, input: R, mut output: W) -> Result<(), Box<dyn Error>>
where
    R: BufRead,
    W: Write,
{
    let patients = match &cli.data_file {
        Some(path) => {
            let file = File::open(path).map_err(|err| format!("{}: {err}", path.display()))?;
            load_records(BufReader::new(file))
                .map_err(|err| format!("{}: {err}", path.display()))?
        }
        None => {
            writeln!(output, "No data file provided\n")?;
            Vec::new()
        }
    };
    info!(patients = patients.len(), batch = cli.batch, "starting session");

    let mut session = Session::new(input, output, cli.tie_break.into());
    session.admit_all(patients);

    if cli.batch {
        session.run_simulation()?;
    } else {
        session.run()?;
    }
    Ok(())
}
