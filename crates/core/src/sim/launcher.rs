//! Simulator process management.
//!
//! A run validates the board, checks the workload, writes the configuration
//! script into the output directory, and then invokes
//! `<gem5> [simulator args] --outdir=<outdir> <script>` with inherited stdio.
//! Reports and the commit trace left over from an earlier run are removed first.
//! The run only counts as successful when the simulator exits cleanly and both
//! statistics reports exist afterwards.

use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde_json::Value;

use super::render::render_config_script;
use super::workload::check_workload;
use crate::common::constants::{CONFIG_SCRIPT_NAME, DEFAULT_OUTDIR};
use crate::common::error::{ConfigError, LaunchError};
use crate::config::BoardConfig;
use crate::stats::cpi::CpiReport;
use crate::stats::format::group_float;
use crate::stats::gem5::{Gem5Stats, load_json_stats};
use crate::trace::scan_commit_trace;

/// Simulator binaries searched on `PATH`, in order of preference.
const GEM5_CANDIDATES: &[&str] = &["gem5.opt", "gem5.fast", "gem5.debug"];

/// Finds the simulator binary.
///
/// An explicit path is used as given; otherwise the first of `gem5.opt`,
/// `gem5.fast`, `gem5.debug` found on `PATH` is used.
///
/// # Errors
///
/// Returns [`LaunchError::SimulatorNotFound`] if nothing is found.
pub fn locate_gem5(explicit: Option<&Path>) -> Result<PathBuf, LaunchError> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    GEM5_CANDIDATES
        .iter()
        .find_map(|name| which::which(name).ok())
        .ok_or(LaunchError::SimulatorNotFound)
}

/// The workload path as it is written into the configuration script.
fn script_path_str(path: &Path) -> Result<&str, ConfigError> {
    path.to_str().ok_or_else(|| ConfigError::WorkloadPathNotUtf8(path.to_path_buf()))
}

/// Configures and runs one simulation.
#[derive(Debug, Clone)]
pub struct Launcher {
    config: BoardConfig,
    base_dir: PathBuf,
    outdir: PathBuf,
    simulator: Option<PathBuf>,
    simulator_args: Vec<OsString>,
    verify_workload: bool,
}

impl Launcher {
    /// Creates a launcher for `config`, writing into `m5out`.
    pub fn new(config: BoardConfig) -> Self {
        Self {
            config,
            base_dir: PathBuf::from("."),
            outdir: PathBuf::from(DEFAULT_OUTDIR),
            simulator: None,
            simulator_args: Vec::new(),
            verify_workload: true,
        }
    }

    /// Directory relative workload paths resolve against.
    #[must_use]
    pub fn base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = dir.into();
        self
    }

    /// Simulator output directory.
    #[must_use]
    pub fn outdir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.outdir = dir.into();
        self
    }

    /// Simulator binary; when unset it is searched on `PATH`.
    #[must_use]
    pub fn simulator(mut self, program: impl Into<PathBuf>) -> Self {
        self.simulator = Some(program.into());
        self
    }

    /// Extra arguments placed before `--outdir` (e.g. `--debug-flags=O3CPUAll`).
    #[must_use]
    pub fn simulator_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.simulator_args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Whether to check the workload binary before launching (default on).
    #[must_use]
    pub const fn verify_workload(mut self, verify: bool) -> Self {
        self.verify_workload = verify;
        self
    }

    /// The board being launched.
    pub const fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Absolute path of the workload binary.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchError::Io`] if the current directory is unavailable.
    pub fn workload_path(&self) -> Result<PathBuf, LaunchError> {
        let resolved = self.config.workload.resolve_binary(&self.base_dir);
        Ok(std::path::absolute(resolved)?)
    }

    /// Validates the board and renders its configuration script without
    /// touching the workload or the output directory.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchError::Config`] for an invalid board or a workload path
    /// that is not valid UTF-8.
    pub fn render(&self) -> Result<String, LaunchError> {
        self.config.validate()?;
        let workload = self.workload_path()?;
        Ok(render_config_script(&self.config, script_path_str(&workload)?))
    }

    /// Runs the simulation to completion.
    ///
    /// # Errors
    ///
    /// - [`LaunchError::Config`] for an invalid board or workload.
    /// - [`LaunchError::SimulatorNotFound`] / [`LaunchError::Spawn`] if the
    ///   simulator cannot be started.
    /// - [`LaunchError::Failed`] if it exits unsuccessfully.
    /// - [`LaunchError::MissingOutput`] if a statistics report was not written.
    /// - [`LaunchError::Stats`] if a report cannot be parsed.
    pub fn run(&self) -> Result<RunOutcome, LaunchError> {
        self.config.validate()?;
        let workload = self.workload_path()?;
        let workload_str = script_path_str(&workload)?;
        if self.verify_workload {
            check_workload(&workload, self.config.processor.isa)?;
        }
        let program = locate_gem5(self.simulator.as_deref())?;

        fs::create_dir_all(&self.outdir)?;
        let text_stats = self.outdir.join(&self.config.output.text_stats);
        let json_stats = self.outdir.join(&self.config.output.json_stats);
        let inst_trace = &self.config.processor.inst_trace;
        let trace_file = inst_trace
            .enabled
            .then(|| self.outdir.join(&inst_trace.trace_file));
        for stale in [Some(&text_stats), Some(&json_stats), trace_file.as_ref()]
            .into_iter()
            .flatten()
        {
            if stale.is_file() {
                tracing::debug!(path = %stale.display(), "removing stale output");
                fs::remove_file(stale)?;
            }
        }

        let script_path = self.outdir.join(CONFIG_SCRIPT_NAME);
        fs::write(&script_path, render_config_script(&self.config, workload_str))?;

        let mut outdir_arg = OsString::from("--outdir=");
        outdir_arg.push(self.outdir.as_os_str());

        tracing::info!(
            simulator = %program.display(),
            script = %script_path.display(),
            outdir = %self.outdir.display(),
            workload = %workload.display(),
            "launching simulation"
        );
        let status = Command::new(&program)
            .args(&self.simulator_args)
            .arg(&outdir_arg)
            .arg(&script_path)
            .status()
            .map_err(|source| LaunchError::Spawn {
                program: program.clone(),
                source,
            })?;
        if !status.success() {
            return Err(LaunchError::Failed {
                program,
                status: status.code(),
            });
        }

        for report in [&text_stats, &json_stats] {
            if !report.is_file() {
                return Err(LaunchError::MissingOutput(report.clone()));
            }
        }
        let stats = Gem5Stats::from_file(&text_stats)?;
        let json = load_json_stats(&json_stats)?;
        let trace = self.trace_report();

        tracing::info!(dumps = stats.dumps.len(), "simulation finished");
        Ok(RunOutcome {
            outdir: self.outdir.clone(),
            script_path,
            text_stats,
            json_stats,
            stats,
            json,
            trace,
        })
    }

    /// CPI report for the commit trace written during the run, if any.
    ///
    /// Uses the board clock for the cycle length. A missing or unusable trace
    /// is logged and skipped.
    fn trace_report(&self) -> Option<CpiReport> {
        let trace = &self.config.processor.inst_trace;
        if !trace.enabled {
            return None;
        }
        let path = self.outdir.join(&trace.trace_file);
        if !path.is_file() {
            tracing::warn!(path = %path.display(), "commit trace not found");
            return None;
        }
        let ticks_per_cycle = self.config.board.clk_freq.ticks_per_cycle();
        match scan_commit_trace(&path)
            .and_then(|summary| CpiReport::with_ticks_per_cycle(&summary, ticks_per_cycle))
        {
            Ok(report) => Some(report),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "commit trace unusable");
                None
            }
        }
    }
}

/// Results of a finished simulation.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Simulator output directory.
    pub outdir: PathBuf,
    /// Configuration script that was run.
    pub script_path: PathBuf,
    /// Path of the text statistics report.
    pub text_stats: PathBuf,
    /// Path of the JSON statistics report.
    pub json_stats: PathBuf,
    /// Parsed text statistics.
    pub stats: Gem5Stats,
    /// Parsed JSON statistics.
    pub json: Value,
    /// CPI report of the commit trace, when one was written.
    pub trace: Option<CpiReport>,
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Simulation Summary ===")?;
        writeln!(f, "Output Directory:   {}", self.outdir.display())?;
        writeln!(f, "Text Stats:         {}", self.text_stats.display())?;
        writeln!(f, "JSON Stats:         {}", self.json_stats.display())?;
        if let Some(dump) = self.stats.last() {
            if let Some(insts) = dump.sim_insts() {
                writeln!(f, "Simulated Insts:    {}", group_float(insts, 0))?;
            }
            if let Some(ticks) = dump.sim_ticks() {
                writeln!(f, "Simulated Ticks:    {}", group_float(ticks, 0))?;
            }
            if let Some(seconds) = dump.sim_seconds() {
                writeln!(f, "Simulated Seconds:  {seconds:.6}")?;
            }
            for (name, value) in dump.matching_leaf("cpi").chain(dump.matching_leaf("ipc")) {
                writeln!(f, "{name}: {value:.4}")?;
            }
        }
        if let Some(report) = &self.trace {
            writeln!(f)?;
            write!(f, "{report}")?;
        }
        Ok(())
    }
}
