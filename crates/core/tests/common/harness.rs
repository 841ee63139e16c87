use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::{NamedTempFile, TempDir};

/// A `stats.txt` with one dump, as gem5 writes it.
pub const SAMPLE_STATS_TXT: &str = "
---------- Begin Simulation Statistics ----------
simSeconds                                   0.000057                       # Number of seconds simulated (Second)
simTicks                                     57467000                       # Number of ticks simulated (Tick)
finalTick                                    57467000                       # Number of ticks from beginning of simulation (restored from checkpoints and never reset) (Tick)
simFreq                                  1000000000000                       # The number of ticks per simulated second ((Tick/Second))
hostSeconds                                      0.52                       # Real time elapsed on the host (Second)
simInsts                                        71908                       # Number of instructions simulated (Count)
simOps                                         129480                       # Number of ops (including micro ops) simulated (Count)
board.processor.cores.core.cpi               2.397608                       # CPI: cycles per instruction (core level) ((Cycle/Count))
board.processor.cores.core.ipc               0.417083                       # IPC: instructions per cycle (core level) ((Count/Cycle))
board.processor.cores.core.commit.committedInstType_0::No_OpClass            0      0.00%      0.00% # Class of committed instruction (Count)
board.processor.cores.core.commit.committedInstType_0::IntAlu        56127     43.35%     43.35% # Class of committed instruction (Count)
board.processor.cores.core.rob.reads                   nan                       # The number of ROB reads (Count)
board.processor.cores.core.numCycles                   172401                       # Number of cpu cycles simulated (Cycle)

---------- End Simulation Statistics   ----------
";

/// A minimal `stats.json`.
pub const SAMPLE_STATS_JSON: &str = r#"{"simTicks": {"value": 57467000}, "simInsts": {"value": 71908}}"#;

/// Writes `contents` to a temporary `.csv` file.
pub fn temp_csv(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Builds a commit-trace CSV with the given commit ticks and a few extra columns.
pub fn commit_trace_csv(ticks: &[i64]) -> String {
    let mut csv = String::from("pc,fetch_tick,commit_tick,mem_addr\n");
    for (i, tick) in ticks.iter().enumerate() {
        csv.push_str(&format!("0x{:x},{},{},0x0\n", 0x401000 + 4 * i, tick - 50, tick));
    }
    csv
}

/// Writes a file into `dir` and returns its path.
pub fn write_file(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

/// Creates a stand-in simulator: a shell script that writes the given reports
/// into the directory passed as `--outdir=<dir>`, then exits with `exit_code`.
///
/// The script is run through `sh` so it never needs the executable bit.
pub fn fake_gem5(dir: &TempDir, write_text: bool, write_json: bool, exit_code: i32) -> PathBuf {
    let mut script = String::from(
        "for arg in \"$@\"; do\n  case \"$arg\" in\n    --outdir=*) out=\"${arg#--outdir=}\" ;;\n  esac\ndone\n",
    );
    if write_text {
        script.push_str(&format!("cat > \"$out/stats.txt\" <<'EOF'\n{SAMPLE_STATS_TXT}\nEOF\n"));
    }
    if write_json {
        script.push_str(&format!("cat > \"$out/stats.json\" <<'EOF'\n{SAMPLE_STATS_JSON}\nEOF\n"));
    }
    script.push_str("printf 'pc,commit_tick\\n0x0,1000\\n0x4,1666\\n0x8,2332\\n' > \"$out/inst_trace.csv\"\n");
    script.push_str(&format!("exit {exit_code}\n"));
    write_file(dir.path(), "fake_gem5.sh", script.as_bytes())
}
