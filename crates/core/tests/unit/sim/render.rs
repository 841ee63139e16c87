//! # Configuration Script Tests

use pretty_assertions::assert_eq;

use o3lab_core::config::{BoardConfig, BranchPredictor, CacheHierarchyKind, Isa, MemoryKind};
use o3lab_core::sim::{ConfigScript, render_config_script};

const WORKLOAD: &str = "/work/programs/mm_bench";

fn render(config: &BoardConfig) -> String {
    render_config_script(config, WORKLOAD)
}

fn block_after<'a>(script: &'a str, start: &str) -> &'a str {
    let begin = script.find(start).unwrap();
    let rest = &script[begin..];
    let end = rest.find("\n\n").unwrap_or(rest.len());
    &rest[..end]
}

#[test]
fn test_default_core() {
    let script = render(&BoardConfig::default());
    assert!(script.starts_with("# Generated by o3lab; edit the board config instead.\n"));
    assert!(script.contains("from m5.objects import InstCsvTrace, TournamentBP, X86O3CPU\n"));
    assert!(script.contains("        core = X86O3CPU()\n"));
    for stage in [
        "fetchWidth",
        "decodeWidth",
        "renameWidth",
        "dispatchWidth",
        "issueWidth",
        "wbWidth",
        "commitWidth",
    ] {
        assert!(script.contains(&format!("        core.{stage} = width\n")), "{stage}");
    }
    assert!(script.contains("        core.numROBEntries = rob_size\n"));
    assert!(script.contains("        core.branchPred = TournamentBP()\n"));
    assert!(script.contains("        super().__init__(core, ISA.X86)\n"));
}

#[test]
fn test_default_trace_probe() {
    let script = render(&BoardConfig::default());
    assert_eq!(
        block_after(&script, "        inst_trace = InstCsvTrace()"),
        "        inst_trace = InstCsvTrace()
        inst_trace.trace_file = \"inst_trace.csv\"
        inst_trace.trace_fetch = True
        inst_trace.trace_mem = True
        inst_trace.start_after_inst = 0
        inst_trace.stop_after_inst = 0
        core.probeListener = inst_trace"
    );
}

#[test]
fn test_default_board() {
    let script = render(&BoardConfig::default());
    assert!(script.contains(
        "from gem5.components.memory.single_channel import SingleChannelDDR4_2400\n"
    ));
    assert!(script.contains("main_memory = SingleChannelDDR4_2400(size=\"4GB\")\n"));
    assert_eq!(
        block_after(&script, "cache_hierarchy = "),
        "cache_hierarchy = PrivateL1PrivateL2CacheHierarchy(
    l1d_size=\"1kB\", l1i_size=\"1kB\", l2_size=\"8kB\"
)"
    );
    assert_eq!(
        block_after(&script, "processor = "),
        "processor = OutOfOrderProcessor(
    num_cores=1,
    width=8,
    rob_size=192,
    num_int_regs=256,
    num_fp_regs=256,
)"
    );
    assert!(script.contains("    clk_freq=\"3GHz\",\n"));
}

#[test]
fn test_default_workload_and_outputs() {
    let script = render(&BoardConfig::default());
    assert!(script.contains("binary_path = \"/work/programs/mm_bench\"\n"));
    assert!(script.contains(
        "    arguments=[\"-n\", \"32\", \"-repeat\", \"3\", \"-kernel\", \"ijk\", \"-check\"],\n"
    ));
    assert!(script.contains("outdir = m5.options.outdir\n"));
    assert!(
        script.contains("simulator.add_text_stats_output(os.path.join(outdir, \"stats.txt\"))\n")
    );
    assert!(
        script.contains("simulator.add_json_stats_output(os.path.join(outdir, \"stats.json\"))\n")
    );
    assert!(script.ends_with("simulator.run()\n"));
}

#[test]
fn test_trace_disabled() {
    let mut config = BoardConfig::default();
    config.processor.inst_trace.enabled = false;
    let script = render(&config);
    assert!(!script.contains("InstCsvTrace"));
    assert!(!script.contains("probeListener"));
    assert!(script.contains("from m5.objects import TournamentBP, X86O3CPU\n"));
}

#[test]
fn test_private_l1_only() {
    let mut config = BoardConfig::default();
    config.cache_hierarchy.kind = CacheHierarchyKind::PrivateL1;
    let script = render(&config);
    assert!(script.contains("    PrivateL1CacheHierarchy,\n"));
    assert!(!script.contains("l2_size"));
    assert!(script.contains("    l1d_size=\"1kB\", l1i_size=\"1kB\"\n"));
}

#[test]
fn test_no_cache() {
    let mut config = BoardConfig::default();
    config.cache_hierarchy.kind = CacheHierarchyKind::NoCache;
    let script = render(&config);
    assert!(script.contains(
        "from gem5.components.cachehierarchies.classic.no_cache import NoCache\n"
    ));
    assert!(script.contains("cache_hierarchy = NoCache()\n"));
    assert!(!script.contains("l1d_size"));
}

#[test]
fn test_dual_channel_memory() {
    let mut config = BoardConfig::default();
    config.memory.kind = MemoryKind::DualChannelDDR4_2400;
    let script = render(&config);
    assert!(script.contains(
        "from gem5.components.memory.multi_channel import DualChannelDDR4_2400\n"
    ));
    assert!(script.contains("main_memory = DualChannelDDR4_2400(size=\"4GB\")\n"));
}

#[test]
fn test_riscv_core_with_tage() {
    let mut config = BoardConfig::default();
    config.processor.isa = Isa::Riscv;
    config.processor.branch_predictor = BranchPredictor::Tage;
    config.processor.num_cores = 1;
    let script = render(&config);
    assert!(script.contains("from m5.objects import InstCsvTrace, RiscvO3CPU, TAGE\n"));
    assert!(script.contains("        core.branchPred = TAGE()\n"));
    assert!(script.contains("        super().__init__(core, ISA.RISCV)\n"));
}

#[test]
fn test_arguments_are_quoted() {
    let mut config = BoardConfig::default();
    config.workload.arguments = vec!["say \"hi\"".to_string(), "C:\\tmp".to_string()];
    let script = render(&config);
    assert!(script.contains(r#"    arguments=["say \"hi\"", "C:\\tmp"],"#));
}

#[test]
fn test_display_matches_render() {
    let config = BoardConfig::default();
    let script = ConfigScript::new(&config, WORKLOAD);
    assert_eq!(script.to_string(), render(&config));
}
