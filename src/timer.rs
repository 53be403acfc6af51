// ADJBENCH BENCHMARK TIMER
// SINGLE-AXIS SIBLING OF THE ORCHESTRATOR: SAME EXECUTABLE, DIFFERENT INPUTS.
// RETURNS (LABEL, SECONDS) IN ORDER. NOTHING IS WRITTEN TO DISK.
//
// WEAKER ISOLATION THAN sweep.rs: A NON-ZERO EXIT IS STILL TIMED AND KEPT,
// BUT A COMMAND THAT CANNOT BE LAUNCHED ABORTS THE WHOLE RUN.

use std::path::Path;
use std::time::Instant;

use crate::error::LaunchError;
use crate::runner::CommandLine;

pub const DEFAULT_INPUTS: [&str; 3] = ["../in/small.txt", "../in/medium.txt", "../in/large.txt"];
pub const DEFAULT_FIXED: [&str; 2] = ["100", "1000"];

#[derive(Clone, Debug, PartialEq)]
pub struct Timing {
    pub label: String,
    pub elapsed_secs: f64,
}

pub struct BenchmarkTimer {
    jobs: Vec<(String, CommandLine)>,
}

impl BenchmarkTimer {
    pub fn new(jobs: Vec<(String, CommandLine)>) -> Self {
        Self { jobs }
    }

    // ONE JOB PER INPUT FILE, LABELLED BY FILE NAME
    pub fn for_inputs<S: AsRef<str>>(exe: &str, inputs: &[S], power: u64, fixed: &[String]) -> Self {
        let jobs = inputs
            .iter()
            .map(|input| {
                let input = input.as_ref();
                let label = Path::new(input)
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| input.to_string());
                let cmd = CommandLine::new(exe)
                    .arg(input)
                    .arg(power.to_string())
                    .args(fixed.iter().cloned());
                (label, cmd)
            })
            .collect();
        Self { jobs }
    }

    pub fn jobs(&self) -> &[(String, CommandLine)] {
        &self.jobs
    }

    // CHILD INHERITS STDIO. SAME TIMESTAMP-DELTA WINDOW AS CommandRunner.
    pub fn run(&self) -> Result<Vec<Timing>, LaunchError> {
        let mut timings = Vec::with_capacity(self.jobs.len());
        for (label, cmd) in &self.jobs {
            let start = Instant::now();
            let status = cmd.to_command().status().map_err(|source| LaunchError {
                command: cmd.to_string(),
                source,
            })?;
            let elapsed_secs = start.elapsed().as_secs_f64();

            if !status.success() {
                tracing::warn!(command = %cmd, %status, "benchmark command exited non-zero");
            }
            timings.push(Timing {
                label: label.clone(),
                elapsed_secs,
            });
        }
        Ok(timings)
    }
}

pub fn render_table(timings: &[Timing]) -> String {
    let width = timings
        .iter()
        .map(|t| t.label.len())
        .max()
        .unwrap_or(0)
        .max("INPUT".len());

    let mut lines = Vec::with_capacity(timings.len() + 2);
    lines.push(format!("{:<width$} {:>10}", "INPUT", "SECONDS", width = width));
    lines.push(format!("{} {}", "-".repeat(width), "-".repeat(10)));
    for t in timings {
        lines.push(format!("{:<width$} {:>10.2}", t.label, t.elapsed_secs, width = width));
    }
    lines.join("\n") + "\n"
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed() -> Vec<String> {
        DEFAULT_FIXED.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn for_inputs_builds_labels_and_commands() {
        let t = BenchmarkTimer::for_inputs("../serial/matrix", &DEFAULT_INPUTS, 1_000_000, &fixed());
        let labels: Vec<&str> = t.jobs().iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["small.txt", "medium.txt", "large.txt"]);
        assert_eq!(
            t.jobs()[0].1.to_string(),
            "../serial/matrix ../in/small.txt 1000000 100 1000"
        );
    }

    #[test]
    fn non_zero_exit_is_still_timed() {
        let t = BenchmarkTimer::new(vec![
            ("ok".to_string(), CommandLine::new("true")),
            ("bad".to_string(), CommandLine::new("false")),
        ]);
        let got = t.run().unwrap();
        assert_eq!(got.len(), 2);
        assert_eq!(got[0].label, "ok");
        assert_eq!(got[1].label, "bad");
    }

    #[test]
    fn launch_failure_raises() {
        let t = BenchmarkTimer::new(vec![(
            "missing".to_string(),
            CommandLine::new("/nonexistent/adjbench-missing-exe"),
        )]);
        let err = t.run().unwrap_err();
        assert!(err.command.contains("adjbench-missing-exe"));
    }

    #[test]
    fn table_layout() {
        let table = render_table(&[Timing {
            label: "small.txt".to_string(),
            elapsed_secs: 1.5,
        }]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "INPUT        SECONDS");
        assert_eq!(lines[2], "small.txt       1.50");
    }
}
