//! gem5 configuration script rendering.
//!
//! gem5 is configured by a Python script built from its standard component
//! library. [`ConfigScript`] writes that script for a [`BoardConfig`]: an
//! out-of-order core subclass with the configured widths, ROB, register
//! files, branch predictor and commit-trace probe, wrapped in a processor and
//! placed on a `SimpleBoard` with the configured caches and memory. The script
//! ends by registering the text and JSON statistics outputs and running the
//! simulation.

use std::fmt::{self, Write as _};

use crate::config::{BoardConfig, CacheHierarchyKind};

/// Renders the configuration script for `config` running `workload`.
///
/// `workload` is written into the script verbatim, so it must already be an
/// absolute path.
pub fn render_config_script(config: &BoardConfig, workload: &str) -> String {
    ConfigScript::new(config, workload).to_string()
}

/// A gem5 configuration script, rendered through [`fmt::Display`].
#[derive(Debug, Clone, Copy)]
pub struct ConfigScript<'a> {
    config: &'a BoardConfig,
    workload: &'a str,
}

impl<'a> ConfigScript<'a> {
    /// Creates a script for `config`; `workload` should already be resolved.
    pub const fn new(config: &'a BoardConfig, workload: &'a str) -> Self {
        Self { config, workload }
    }

    fn write_imports(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cfg = self.config;
        writeln!(f, "import os")?;
        writeln!(f)?;
        writeln!(f, "import m5")?;
        writeln!(f, "from gem5.components.boards.simple_board import SimpleBoard")?;
        match cfg.cache_hierarchy.kind {
            CacheHierarchyKind::PrivateL1PrivateL2 => {
                writeln!(
                    f,
                    "from gem5.components.cachehierarchies.classic.private_l1_private_l2_cache_hierarchy import ("
                )?;
                writeln!(f, "    PrivateL1PrivateL2CacheHierarchy,")?;
                writeln!(f, ")")?;
            }
            CacheHierarchyKind::PrivateL1 => {
                writeln!(
                    f,
                    "from gem5.components.cachehierarchies.classic.private_l1_cache_hierarchy import ("
                )?;
                writeln!(f, "    PrivateL1CacheHierarchy,")?;
                writeln!(f, ")")?;
            }
            CacheHierarchyKind::NoCache => {
                writeln!(
                    f,
                    "from gem5.components.cachehierarchies.classic.no_cache import NoCache"
                )?;
            }
        }
        writeln!(
            f,
            "from {} import {}",
            cfg.memory.kind.module(),
            cfg.memory.kind.class_name()
        )?;
        writeln!(f, "from gem5.components.processors.base_cpu_core import BaseCPUCore")?;
        writeln!(
            f,
            "from gem5.components.processors.base_cpu_processor import BaseCPUProcessor"
        )?;
        writeln!(f, "from gem5.isas import ISA")?;
        writeln!(f, "from gem5.resources.resource import BinaryResource")?;
        writeln!(f, "from gem5.simulate.simulator import Simulator")?;

        let mut objects = vec![
            cfg.processor.isa.o3_cpu_class(),
            cfg.processor.branch_predictor.class_name(),
        ];
        if cfg.processor.inst_trace.enabled {
            objects.push("InstCsvTrace");
        }
        objects.sort_unstable();
        writeln!(f, "from m5.objects import {}", objects.join(", "))
    }

    fn write_core(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.config.processor;
        writeln!(f, "class OutOfOrderCore(BaseCPUCore):")?;
        writeln!(f, "    def __init__(self, width, rob_size, num_int_regs, num_fp_regs):")?;
        writeln!(f, "        core = {}()", p.isa.o3_cpu_class())?;
        for stage in [
            "fetchWidth",
            "decodeWidth",
            "renameWidth",
            "dispatchWidth",
            "issueWidth",
            "wbWidth",
            "commitWidth",
        ] {
            writeln!(f, "        core.{stage} = width")?;
        }
        writeln!(f)?;
        writeln!(f, "        core.numROBEntries = rob_size")?;
        writeln!(f, "        core.numPhysIntRegs = num_int_regs")?;
        writeln!(f, "        core.numPhysFloatRegs = num_fp_regs")?;
        writeln!(f)?;
        writeln!(f, "        core.branchPred = {}()", p.branch_predictor.class_name())?;

        let trace = &p.inst_trace;
        if trace.enabled {
            writeln!(f)?;
            writeln!(f, "        inst_trace = InstCsvTrace()")?;
            writeln!(f, "        inst_trace.trace_file = {}", py_str(&trace.trace_file))?;
            writeln!(f, "        inst_trace.trace_fetch = {}", py_bool(trace.trace_fetch))?;
            writeln!(f, "        inst_trace.trace_mem = {}", py_bool(trace.trace_mem))?;
            writeln!(f, "        inst_trace.start_after_inst = {}", trace.start_after_inst)?;
            writeln!(f, "        inst_trace.stop_after_inst = {}", trace.stop_after_inst)?;
            writeln!(f, "        core.probeListener = inst_trace")?;
        }
        writeln!(f)?;
        writeln!(f, "        super().__init__(core, ISA.{})", p.isa.gem5_name())?;
        writeln!(f)?;
        writeln!(f)?;
        writeln!(f, "class OutOfOrderProcessor(BaseCPUProcessor):")?;
        writeln!(
            f,
            "    def __init__(self, num_cores, width, rob_size, num_int_regs, num_fp_regs):"
        )?;
        writeln!(f, "        super().__init__(")?;
        writeln!(f, "            cores=[")?;
        writeln!(
            f,
            "                OutOfOrderCore(width, rob_size, num_int_regs, num_fp_regs)"
        )?;
        writeln!(f, "                for _ in range(num_cores)")?;
        writeln!(f, "            ]")?;
        writeln!(f, "        )")
    }

    fn write_board(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cfg = self.config;
        let caches = &cfg.cache_hierarchy;
        writeln!(
            f,
            "main_memory = {}(size={})",
            cfg.memory.kind.class_name(),
            py_str(&cfg.memory.size.to_string())
        )?;
        writeln!(f)?;
        match caches.kind {
            CacheHierarchyKind::PrivateL1PrivateL2 => {
                writeln!(f, "cache_hierarchy = PrivateL1PrivateL2CacheHierarchy(")?;
                writeln!(
                    f,
                    "    l1d_size={}, l1i_size={}, l2_size={}",
                    py_str(&caches.l1d_size.to_string()),
                    py_str(&caches.l1i_size.to_string()),
                    py_str(&caches.l2_size.to_string())
                )?;
                writeln!(f, ")")?;
            }
            CacheHierarchyKind::PrivateL1 => {
                writeln!(f, "cache_hierarchy = PrivateL1CacheHierarchy(")?;
                writeln!(
                    f,
                    "    l1d_size={}, l1i_size={}",
                    py_str(&caches.l1d_size.to_string()),
                    py_str(&caches.l1i_size.to_string())
                )?;
                writeln!(f, ")")?;
            }
            CacheHierarchyKind::NoCache => writeln!(f, "cache_hierarchy = NoCache()")?,
        }
        writeln!(f)?;

        let p = &cfg.processor;
        writeln!(f, "processor = OutOfOrderProcessor(")?;
        writeln!(f, "    num_cores={},", p.num_cores)?;
        writeln!(f, "    width={},", p.width)?;
        writeln!(f, "    rob_size={},", p.rob_entries)?;
        writeln!(f, "    num_int_regs={},", p.phys_int_regs)?;
        writeln!(f, "    num_fp_regs={},", p.phys_float_regs)?;
        writeln!(f, ")")?;
        writeln!(f)?;
        writeln!(f, "board = SimpleBoard(")?;
        writeln!(f, "    processor=processor,")?;
        writeln!(f, "    memory=main_memory,")?;
        writeln!(f, "    cache_hierarchy=cache_hierarchy,")?;
        writeln!(f, "    clk_freq={},", py_str(&cfg.board.clk_freq.to_string()))?;
        writeln!(f, ")")
    }

    fn write_workload(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let workload = &self.config.workload;
        let arguments = workload
            .arguments
            .iter()
            .map(|arg| py_str(arg))
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(f, "binary_path = {}", py_str(self.workload))?;
        writeln!(f, "board.set_se_binary_workload(")?;
        writeln!(f, "    binary=BinaryResource(local_path=binary_path),")?;
        writeln!(f, "    arguments=[{arguments}],")?;
        writeln!(f, ")")
    }

    fn write_run(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let output = &self.config.output;
        writeln!(f, "simulator = Simulator(board)")?;
        writeln!(f)?;
        writeln!(f, "outdir = m5.options.outdir")?;
        writeln!(f)?;
        writeln!(
            f,
            "simulator.add_text_stats_output(os.path.join(outdir, {}))",
            py_str(&output.text_stats)
        )?;
        writeln!(
            f,
            "simulator.add_json_stats_output(os.path.join(outdir, {}))",
            py_str(&output.json_stats)
        )?;
        writeln!(f)?;
        writeln!(f, "simulator.run()")
    }
}

impl fmt::Display for ConfigScript<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Generated by o3lab; edit the board config instead.")?;
        self.write_imports(f)?;
        writeln!(f)?;
        writeln!(f)?;
        self.write_core(f)?;
        writeln!(f)?;
        writeln!(f)?;
        self.write_board(f)?;
        writeln!(f)?;
        self.write_workload(f)?;
        writeln!(f)?;
        self.write_run(f)
    }
}

/// Quotes `s` as a Python string literal.
fn py_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

const fn py_bool(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}
