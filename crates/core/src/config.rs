//! Board configuration for the out-of-order simulation launcher.
//!
//! This module defines all configuration structures and enums used to describe
//! the simulated system. It provides:
//! 1. **Defaults:** The fixed evaluation board (8-wide O3 core, 192-entry ROB,
//!    tournament predictor, 1kB/1kB/8kB private caches, 4GB DDR4, 3GHz).
//! 2. **Structures:** Hierarchical config for processor, caches, memory, board,
//!    workload, and statistics output.
//! 3. **Enums:** ISA, branch predictor, cache hierarchy, and memory types, each
//!    mapping onto a class provided by the gem5 standard library.
//!
//! Configuration is built with `BoardConfig::default()` or loaded from JSON with
//! [`BoardConfig::from_json_file`]. Every field is optional in JSON.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::common::constants::{X86_ARCH_FLOAT_REGS, X86_ARCH_INT_REGS};
use crate::common::error::ConfigError;
use crate::common::units::{Frequency, MemorySize};

/// Default configuration constants for the evaluation board.
mod defaults {
    use crate::common::units::{Frequency, MemorySize};

    /// Superscalar width applied to every pipeline stage.
    pub const WIDTH: u32 = 8;

    /// Reorder buffer entries.
    pub const ROB_ENTRIES: u32 = 192;

    /// Physical integer registers.
    pub const PHYS_INT_REGS: u32 = 256;

    /// Physical floating-point registers.
    pub const PHYS_FLOAT_REGS: u32 = 256;

    /// Number of cores on the processor.
    pub const NUM_CORES: u32 = 1;

    /// Commit trace file written by the `InstCsvTrace` probe.
    pub const TRACE_FILE: &str = "inst_trace.csv";

    /// L1 data cache size.
    pub const L1D_SIZE: MemorySize = MemorySize::from_kib(1);

    /// L1 instruction cache size.
    pub const L1I_SIZE: MemorySize = MemorySize::from_kib(1);

    /// Private L2 cache size.
    pub const L2_SIZE: MemorySize = MemorySize::from_kib(8);

    /// Main memory size.
    pub const MEMORY_SIZE: MemorySize = MemorySize::from_gib(4);

    /// Board clock.
    pub const CLK_FREQ: Frequency = Frequency::from_ghz(3);

    /// Workload binary, relative to the configuration's base directory.
    pub const WORKLOAD_BINARY: &str = "programs/mm_bench";

    /// Workload arguments: 32x32 matrices, three repetitions, ijk kernel, verify.
    pub const WORKLOAD_ARGS: &[&str] = &["-n", "32", "-repeat", "3", "-kernel", "ijk", "-check"];

    /// Text statistics report.
    pub const TEXT_STATS: &str = "stats.txt";

    /// JSON statistics report.
    pub const JSON_STATS: &str = "stats.json";
}

/// Instruction set of the simulated core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Isa {
    /// X86-64.
    #[default]
    X86,
    /// AArch64.
    #[serde(alias = "Arm")]
    Arm,
    /// RV64.
    #[serde(alias = "Riscv")]
    Riscv,
}

impl Isa {
    /// Name of the `gem5.isas.ISA` enum member.
    pub const fn gem5_name(self) -> &'static str {
        match self {
            Self::X86 => "X86",
            Self::Arm => "ARM",
            Self::Riscv => "RISCV",
        }
    }

    /// Out-of-order CPU model class for this ISA.
    pub const fn o3_cpu_class(self) -> &'static str {
        match self {
            Self::X86 => "X86O3CPU",
            Self::Arm => "ArmO3CPU",
            Self::Riscv => "RiscvO3CPU",
        }
    }

    /// Minimum register file sizes (integer, floating point) for this ISA.
    pub const fn arch_regs(self) -> (u32, u32) {
        match self {
            Self::X86 => (X86_ARCH_INT_REGS, X86_ARCH_FLOAT_REGS),
            Self::Arm | Self::Riscv => (32, 32),
        }
    }
}

impl fmt::Display for Isa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.gem5_name())
    }
}

/// Branch prediction algorithm types.
///
/// Each variant names a predictor SimObject shipped with gem5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum BranchPredictor {
    /// Tournament predictor choosing between local and global history.
    #[default]
    Tournament,
    /// Bi-mode predictor.
    BiMode,
    /// Local history predictor.
    Local,
    /// Tagged Geometric History Length predictor.
    #[serde(alias = "TAGE")]
    Tage,
    /// TAGE with a loop predictor.
    #[serde(alias = "LTAGE")]
    LTage,
}

impl BranchPredictor {
    /// SimObject class name in `m5.objects`.
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Tournament => "TournamentBP",
            Self::BiMode => "BiModeBP",
            Self::Local => "LocalBP",
            Self::Tage => "TAGE",
            Self::LTage => "LTAGE",
        }
    }
}

/// Cache hierarchy layouts from the gem5 classic cache library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum CacheHierarchyKind {
    /// Private L1 instruction/data caches and a private L2 per core.
    #[default]
    PrivateL1PrivateL2,
    /// Private L1 instruction/data caches only.
    PrivateL1,
    /// Cores connect straight to the memory bus.
    NoCache,
}

/// Main memory models from the gem5 component library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[allow(non_camel_case_types)]
pub enum MemoryKind {
    /// One DDR4-2400 channel.
    #[default]
    SingleChannelDDR4_2400,
    /// One DDR3-1600 channel.
    SingleChannelDDR3_1600,
    /// One LPDDR3-1600 channel.
    SingleChannelLPDDR3_1600,
    /// Two interleaved DDR4-2400 channels.
    DualChannelDDR4_2400,
}

impl MemoryKind {
    /// Class name in the gem5 memory component library.
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::SingleChannelDDR4_2400 => "SingleChannelDDR4_2400",
            Self::SingleChannelDDR3_1600 => "SingleChannelDDR3_1600",
            Self::SingleChannelLPDDR3_1600 => "SingleChannelLPDDR3_1600",
            Self::DualChannelDDR4_2400 => "DualChannelDDR4_2400",
        }
    }

    /// Module the class is imported from.
    pub const fn module(self) -> &'static str {
        match self {
            Self::DualChannelDDR4_2400 => "gem5.components.memory.multi_channel",
            _ => "gem5.components.memory.single_channel",
        }
    }
}

/// Root configuration structure describing the whole simulated board.
///
/// # Examples
///
/// ```
/// use o3lab_core::config::{BoardConfig, BranchPredictor};
///
/// let config = BoardConfig::default();
/// assert_eq!(config.processor.width, 8);
/// assert_eq!(config.processor.rob_entries, 192);
/// assert_eq!(config.processor.branch_predictor, BranchPredictor::Tournament);
/// ```
///
/// Overriding a few fields from JSON:
///
/// ```
/// use o3lab_core::config::BoardConfig;
///
/// let json = r#"{
///     "processor": { "width": 4, "branch_predictor": "LTage" },
///     "board": { "clk_freq": "2GHz" }
/// }"#;
/// let config: BoardConfig = serde_json::from_str(json).unwrap();
/// assert_eq!(config.processor.width, 4);
/// assert_eq!(config.processor.rob_entries, 192);
/// assert_eq!(config.board.clk_freq.hz(), 2_000_000_000);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BoardConfig {
    /// Processor and core parameters
    #[serde(default)]
    pub processor: ProcessorConfig,
    /// Cache hierarchy parameters
    #[serde(default)]
    pub cache_hierarchy: CacheHierarchyConfig,
    /// Main memory parameters
    #[serde(default)]
    pub memory: MemoryConfig,
    /// Board-level parameters
    #[serde(default)]
    pub board: BoardSettings,
    /// Workload binary and arguments
    #[serde(default)]
    pub workload: WorkloadConfig,
    /// Statistics report file names
    #[serde(default)]
    pub output: OutputConfig,
}

impl BoardConfig {
    /// Loads a board configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read and
    /// [`ConfigError::Parse`] if it is not a valid board description.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded board config");
        Ok(config)
    }

    /// Checks the invariants the simulator would otherwise reject at run time.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.processor;
        positive("processor.num_cores", p.num_cores)?;
        positive("processor.width", p.width)?;
        positive("processor.rob_entries", p.rob_entries)?;

        let (int_regs, float_regs) = p.isa.arch_regs();
        if p.phys_int_regs < int_regs {
            return Err(invalid(
                "processor.phys_int_regs",
                format!("{} is below the {} architectural registers", p.phys_int_regs, int_regs),
            ));
        }
        if p.phys_float_regs < float_regs {
            return Err(invalid(
                "processor.phys_float_regs",
                format!(
                    "{} is below the {} architectural registers",
                    p.phys_float_regs, float_regs
                ),
            ));
        }

        let trace = &p.inst_trace;
        if trace.enabled {
            if p.num_cores > 1 {
                return Err(invalid(
                    "processor.num_cores",
                    format!(
                        "commit tracing writes one file and needs a single core, got {}",
                        p.num_cores
                    ),
                ));
            }
            if trace.stop_after_inst != 0 && trace.stop_after_inst <= trace.start_after_inst {
                return Err(invalid(
                    "processor.inst_trace.stop_after_inst",
                    format!(
                        "{} must be 0 or greater than start_after_inst ({})",
                        trace.stop_after_inst, trace.start_after_inst
                    ),
                ));
            }
            plain_file_name("processor.inst_trace.trace_file", &trace.trace_file)?;
        }

        if self.workload.binary.as_os_str().is_empty() {
            return Err(invalid("workload.binary", "must not be empty".to_string()));
        }

        plain_file_name("output.text_stats", &self.output.text_stats)?;
        plain_file_name("output.json_stats", &self.output.json_stats)?;
        if self.output.text_stats == self.output.json_stats {
            return Err(invalid(
                "output.json_stats",
                format!("must differ from output.text_stats ({})", self.output.text_stats),
            ));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

fn positive(field: &'static str, value: u32) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(invalid(field, "must be greater than zero".to_string()));
    }
    Ok(())
}

fn plain_file_name(field: &'static str, name: &str) -> Result<(), ConfigError> {
    let path = Path::new(name);
    let is_plain = !name.is_empty()
        && path.file_name().is_some_and(|f| f == path.as_os_str())
        && name != "."
        && name != "..";
    if !is_plain {
        return Err(invalid(field, format!("{name:?} is not a plain file name")));
    }
    Ok(())
}

/// Processor and out-of-order core configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessorConfig {
    /// Instruction set of every core
    #[serde(default)]
    pub isa: Isa,

    /// Number of identical cores
    #[serde(default = "ProcessorConfig::default_num_cores")]
    pub num_cores: u32,

    /// Fetch/decode/rename/dispatch/issue/writeback/commit width
    #[serde(default = "ProcessorConfig::default_width")]
    pub width: u32,

    /// Reorder buffer entries
    #[serde(default = "ProcessorConfig::default_rob_entries")]
    pub rob_entries: u32,

    /// Physical integer registers
    #[serde(default = "ProcessorConfig::default_phys_int_regs")]
    pub phys_int_regs: u32,

    /// Physical floating-point registers
    #[serde(default = "ProcessorConfig::default_phys_float_regs")]
    pub phys_float_regs: u32,

    /// Branch predictor type
    #[serde(default)]
    pub branch_predictor: BranchPredictor,

    /// Commit-trace probe attached to each core
    #[serde(default)]
    pub inst_trace: InstTraceConfig,
}

impl ProcessorConfig {
    fn default_num_cores() -> u32 {
        defaults::NUM_CORES
    }

    fn default_width() -> u32 {
        defaults::WIDTH
    }

    fn default_rob_entries() -> u32 {
        defaults::ROB_ENTRIES
    }

    fn default_phys_int_regs() -> u32 {
        defaults::PHYS_INT_REGS
    }

    fn default_phys_float_regs() -> u32 {
        defaults::PHYS_FLOAT_REGS
    }
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            isa: Isa::default(),
            num_cores: defaults::NUM_CORES,
            width: defaults::WIDTH,
            rob_entries: defaults::ROB_ENTRIES,
            phys_int_regs: defaults::PHYS_INT_REGS,
            phys_float_regs: defaults::PHYS_FLOAT_REGS,
            branch_predictor: BranchPredictor::default(),
            inst_trace: InstTraceConfig::default(),
        }
    }
}

/// `InstCsvTrace` probe configuration.
///
/// The probe writes one CSV row per committed instruction, including the
/// `commit_tick` column consumed by the CPI reporter.
#[derive(Debug, Clone, Deserialize)]
pub struct InstTraceConfig {
    /// Attach the probe
    #[serde(default = "InstTraceConfig::default_true")]
    pub enabled: bool,

    /// Output file, relative to the simulator output directory
    #[serde(default = "InstTraceConfig::default_trace_file")]
    pub trace_file: String,

    /// Record fetch timestamps
    #[serde(default = "InstTraceConfig::default_true")]
    pub trace_fetch: bool,

    /// Record memory access addresses
    #[serde(default = "InstTraceConfig::default_true")]
    pub trace_mem: bool,

    /// First committed instruction to record (0 = from the start)
    #[serde(default)]
    pub start_after_inst: u64,

    /// Committed instruction after which recording stops (0 = never)
    #[serde(default)]
    pub stop_after_inst: u64,
}

impl InstTraceConfig {
    fn default_true() -> bool {
        true
    }

    fn default_trace_file() -> String {
        defaults::TRACE_FILE.to_string()
    }
}

impl Default for InstTraceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            trace_file: defaults::TRACE_FILE.to_string(),
            trace_fetch: true,
            trace_mem: true,
            start_after_inst: 0,
            stop_after_inst: 0,
        }
    }
}

/// Cache hierarchy configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheHierarchyConfig {
    /// Hierarchy layout
    #[serde(default)]
    pub kind: CacheHierarchyKind,

    /// L1 data cache size
    #[serde(default = "CacheHierarchyConfig::default_l1d_size")]
    pub l1d_size: MemorySize,

    /// L1 instruction cache size
    #[serde(default = "CacheHierarchyConfig::default_l1i_size")]
    pub l1i_size: MemorySize,

    /// L2 cache size (ignored without an L2)
    #[serde(default = "CacheHierarchyConfig::default_l2_size")]
    pub l2_size: MemorySize,
}

impl CacheHierarchyConfig {
    const fn default_l1d_size() -> MemorySize {
        defaults::L1D_SIZE
    }

    const fn default_l1i_size() -> MemorySize {
        defaults::L1I_SIZE
    }

    const fn default_l2_size() -> MemorySize {
        defaults::L2_SIZE
    }
}

impl Default for CacheHierarchyConfig {
    fn default() -> Self {
        Self {
            kind: CacheHierarchyKind::default(),
            l1d_size: defaults::L1D_SIZE,
            l1i_size: defaults::L1I_SIZE,
            l2_size: defaults::L2_SIZE,
        }
    }
}

/// Main memory configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    /// Memory model
    #[serde(default)]
    pub kind: MemoryKind,

    /// Capacity
    #[serde(default = "MemoryConfig::default_size")]
    pub size: MemorySize,
}

impl MemoryConfig {
    const fn default_size() -> MemorySize {
        defaults::MEMORY_SIZE
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            kind: MemoryKind::default(),
            size: defaults::MEMORY_SIZE,
        }
    }
}

/// Board-level configuration (`SimpleBoard`).
#[derive(Debug, Clone, Deserialize)]
pub struct BoardSettings {
    /// Core clock frequency
    #[serde(default = "BoardSettings::default_clk_freq")]
    pub clk_freq: Frequency,
}

impl BoardSettings {
    const fn default_clk_freq() -> Frequency {
        defaults::CLK_FREQ
    }
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            clk_freq: defaults::CLK_FREQ,
        }
    }
}

/// Syscall-emulation workload.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkloadConfig {
    /// Statically linked binary; relative paths resolve against the config's base directory
    #[serde(default = "WorkloadConfig::default_binary")]
    pub binary: PathBuf,

    /// Command-line arguments passed to the binary
    #[serde(default = "WorkloadConfig::default_arguments")]
    pub arguments: Vec<String>,
}

impl WorkloadConfig {
    fn default_binary() -> PathBuf {
        PathBuf::from(defaults::WORKLOAD_BINARY)
    }

    fn default_arguments() -> Vec<String> {
        defaults::WORKLOAD_ARGS.iter().map(ToString::to_string).collect()
    }

    /// Resolves the binary path against `base_dir` unless it is absolute.
    pub fn resolve_binary(&self, base_dir: &Path) -> PathBuf {
        if self.binary.is_absolute() {
            self.binary.clone()
        } else {
            base_dir.join(&self.binary)
        }
    }
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            binary: Self::default_binary(),
            arguments: Self::default_arguments(),
        }
    }
}

/// Statistics report file names, written inside the simulator output directory.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Human-readable statistics dump
    #[serde(default = "OutputConfig::default_text_stats")]
    pub text_stats: String,

    /// JSON statistics dump
    #[serde(default = "OutputConfig::default_json_stats")]
    pub json_stats: String,
}

impl OutputConfig {
    fn default_text_stats() -> String {
        defaults::TEXT_STATS.to_string()
    }

    fn default_json_stats() -> String {
        defaults::JSON_STATS.to_string()
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            text_stats: defaults::TEXT_STATS.to_string(),
            json_stats: defaults::JSON_STATS.to_string(),
        }
    }
}
