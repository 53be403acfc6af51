// ADJBENCH TIMING REPORT
// FOLDS PARSED LOG RECORDS INTO ONE ROW PER DISTINCT COMMAND,
// IN FIRST-SEEN ORDER. REPEATED SWEEPS INTO THE SAME LOG ACCUMULATE.

use crate::timelog::LogRecord;

#[derive(Clone, Debug, PartialEq)]
pub struct CommandStats {
    pub command: String,
    pub runs: usize,
    pub mean_secs: f64,
    pub min_secs: f64,
    pub max_secs: f64,
}

pub fn summarize(records: &[LogRecord]) -> Vec<CommandStats> {
    let mut rows: Vec<(String, Vec<f64>)> = Vec::new();
    for r in records {
        match rows.iter_mut().find(|(c, _)| *c == r.command) {
            Some((_, times)) => times.push(r.elapsed_secs),
            None => rows.push((r.command.clone(), vec![r.elapsed_secs])),
        }
    }

    rows.into_iter()
        .map(|(command, times)| {
            let runs = times.len();
            let sum: f64 = times.iter().sum();
            let min_secs = times.iter().copied().fold(f64::INFINITY, f64::min);
            let max_secs = times.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            CommandStats {
                command,
                runs,
                mean_secs: sum / runs as f64,
                min_secs,
                max_secs,
            }
        })
        .collect()
}

pub fn render(title: &str, stats: &[CommandStats]) -> String {
    let sep = "=".repeat(72);
    let mut lines = vec![sep.clone(), title.to_string(), sep.clone()];
    lines.push(format!(
        "{:>4} {:>9} {:>9} {:>9}  {}",
        "RUNS", "MEAN", "MIN", "MAX", "COMMAND"
    ));
    lines.push(format!(
        "{} {} {} {}  {}",
        "-".repeat(4),
        "-".repeat(9),
        "-".repeat(9),
        "-".repeat(9),
        "-".repeat(7),
    ));
    for s in stats {
        lines.push(format!(
            "{:>4} {:>8.2}s {:>8.2}s {:>8.2}s  {}",
            s.runs, s.mean_secs, s.min_secs, s.max_secs, s.command
        ));
    }
    if stats.is_empty() {
        lines.push("(NO RECORDS)".to_string());
    }
    lines.push(sep);
    lines.join("\n") + "\n"
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(command: &str, elapsed_secs: f64) -> LogRecord {
        LogRecord {
            command: command.to_string(),
            elapsed_secs,
        }
    }

    #[test]
    fn summarize_groups_in_first_seen_order() {
        let stats = summarize(&[
            rec("make -f mpi_makefile", 1.0),
            rec("mpirun -np 2 ./matrix", 4.0),
            rec("make -f mpi_makefile", 3.0),
        ]);
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].command, "make -f mpi_makefile");
        assert_eq!(stats[0].runs, 2);
        assert_eq!(stats[0].mean_secs, 2.0);
        assert_eq!(stats[0].min_secs, 1.0);
        assert_eq!(stats[0].max_secs, 3.0);
        assert_eq!(stats[1].runs, 1);
    }

    #[test]
    fn summarize_empty() {
        assert!(summarize(&[]).is_empty());
    }

    #[test]
    fn render_rows() {
        let text = render("T", &summarize(&[rec("./a 1", 0.25)]));
        assert!(text.contains("   1     0.25s     0.25s     0.25s  ./a 1"));
        assert!(render("T", &[]).contains("(NO RECORDS)"));
    }
}
