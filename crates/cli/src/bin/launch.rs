//! Out-of-order board launcher.
//!
//! This binary performs:
//! 1. **Configuration:** The built-in evaluation board, or a JSON override via `--config`.
//! 2. **Rendering:** The gem5 configuration script for that board (`--dry-run` prints it).
//! 3. **Simulation:** Runs gem5 on the script and summarizes `stats.txt`, `stats.json`
//!    and the commit trace.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use o3lab_core::common::constants::DEFAULT_OUTDIR;
use o3lab_core::config::BoardConfig;
use o3lab_core::sim::Launcher;

#[derive(Parser, Debug)]
#[command(
    name = "launch",
    author,
    version,
    about = "Run the out-of-order X86 board under gem5",
    long_about = "Run the out-of-order X86 board under gem5.\n\nThe default board is an 8-wide X86O3CPU with a 192-entry ROB, 256 integer and\nfloat physical registers, a tournament branch predictor, 1kB/1kB/8kB private\ncaches, 4GB single-channel DDR4 and a 3GHz clock, running programs/mm_bench.\n\nExamples:\n  launch --dry-run\n  launch --gem5 build/X86/gem5.opt --outdir m5out\n  launch --config boards/wide.json"
)]
struct Cli {
    /// JSON board description; omitted fields keep their defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Simulator output directory.
    #[arg(short, long, default_value = DEFAULT_OUTDIR)]
    outdir: PathBuf,

    /// gem5 binary (defaults to gem5.opt on PATH).
    #[arg(long, env = "GEM5")]
    gem5: Option<PathBuf>,

    /// Print the configuration script instead of running it.
    #[arg(long)]
    dry_run: bool,

    /// Skip the workload existence and architecture check.
    #[arg(long)]
    skip_workload_check: bool,

    /// Extra arguments for gem5, placed before the script (e.g. --debug-flags=O3CPUAll).
    #[arg(last = true)]
    gem5_args: Vec<String>,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    o3lab_cli::init_logging("info");

    let launcher = match build_launcher(&cli) {
        Ok(launcher) => launcher,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if cli.dry_run {
        return match launcher.render() {
            Ok(script) => {
                print!("{script}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error: {e}");
                ExitCode::FAILURE
            }
        };
    }

    match launcher.run() {
        Ok(outcome) => {
            print!("{outcome}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Loads the board and applies the command-line overrides.
///
/// Relative workload paths resolve against the config file's directory, or the
/// current directory for the built-in board.
fn build_launcher(cli: &Cli) -> Result<Launcher, o3lab_core::common::ConfigError> {
    let (config, base_dir) = match &cli.config {
        Some(path) => {
            let config = BoardConfig::from_json_file(path)?;
            let base_dir = path
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
            (config, base_dir)
        }
        None => (BoardConfig::default(), PathBuf::from(".")),
    };

    tracing::debug!(
        config = ?cli.config,
        base_dir = %base_dir.display(),
        outdir = %cli.outdir.display(),
        gem5 = ?cli.gem5,
        "resolved board"
    );
    let mut launcher = Launcher::new(config)
        .base_dir(base_dir)
        .outdir(&cli.outdir)
        .verify_workload(!cli.skip_workload_check)
        .simulator_args(&cli.gem5_args);
    if let Some(gem5) = &cli.gem5 {
        launcher = launcher.simulator(gem5);
    }
    Ok(launcher)
}
