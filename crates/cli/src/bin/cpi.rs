//! CPI reporter.
//!
//! Reads the commit-trace CSV written by the `InstCsvTrace` probe and prints
//! the instruction count, commit tick span, cycle count, CPI and IPC.
//!
//! Exit status is 1 for a bad argument list, a missing file, a trace without
//! `commit_tick` data, or a malformed trace; 0 otherwise.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;

use o3lab_core::common::TRACE_TICKS_PER_CYCLE;
use o3lab_core::stats::CpiReport;
use o3lab_core::trace::scan_commit_trace;

const USAGE: &str = "Usage: cpi <path_to_csv>";

#[derive(Parser, Debug)]
#[command(
    name = "cpi",
    author,
    version,
    about = "Compute CPI and IPC from a commit-trace CSV",
    long_about = "Compute CPI and IPC from a commit-trace CSV.\n\nThe cycle count is the span between the first and last row's commit_tick\ndivided by the clock period in ticks (333.333 for a 3GHz clock at 1ps ticks).\n\nExample:\n  cpi m5out/inst_trace.csv"
)]
struct Cli {
    /// Commit-trace CSV with a `commit_tick` column.
    path: PathBuf,

    /// Clock period in simulator ticks.
    #[arg(long, default_value_t = TRACE_TICKS_PER_CYCLE, value_parser = parse_ticks_per_cycle)]
    ticks_per_cycle: f64,
}

fn parse_ticks_per_cycle(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if !value.is_finite() || value <= 0.0 {
        return Err(format!("{s} is not a positive number of ticks"));
    }
    Ok(value)
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    let _ = err.print();
                    ExitCode::SUCCESS
                }
                ErrorKind::ValueValidation | ErrorKind::InvalidValue => {
                    let _ = err.print();
                    ExitCode::FAILURE
                }
                _ => {
                    eprintln!("{USAGE}");
                    ExitCode::FAILURE
                }
            };
        }
    };
    o3lab_cli::init_logging("warn");

    let report = scan_commit_trace(&cli.path)
        .and_then(|summary| CpiReport::with_ticks_per_cycle(&summary, cli.ticks_per_cycle));
    match report {
        Ok(report) => {
            report.print();
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
