// ADJBENCH COMMAND RUNNER
// RUNS ONE EXTERNAL COMMAND, TIMES IT, APPENDS ONE LOG RECORD.
//
// TIMING WINDOW: Instant::now() RIGHT BEFORE SPAWN TO RIGHT AFTER EXIT.
// INCLUDES PROCESS LAUNCH + TEARDOWN. NOT A CPU-TIME MEASUREMENT.
// NO TIMEOUT: A HUNG CHILD BLOCKS THE CALLER UNTIL IT EXITS ON ITS OWN.
//
// ARGUMENTS GO STRAIGHT TO execve VIA std::process::Command. NO SHELL,
// NO QUOTING. THE SPACE-JOINED TEXT FORM EXISTS ONLY FOR LOGS AND CONSOLE.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Instant;

use crate::error::LogError;
use crate::timelog::{self, LogRecord};

// ---------------------------------------------------------------------------
// COMMAND LINE
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandLine {
    program: String,
    args: Vec<String>,
}

impl CommandLine {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    pub fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for a in &self.args {
            write!(f, " {}", a)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// OUTCOME
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    Success,
    // code IS None WHEN THE CHILD WAS KILLED BY A SIGNAL
    Failed { code: Option<i32> },
    LaunchFailed { reason: String },
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    pub fn label(&self) -> String {
        match self {
            Self::Success => "OK".to_string(),
            Self::Failed { code: Some(c) } => format!("EXIT {}", c),
            Self::Failed { code: None } => "KILLED BY SIGNAL".to_string(),
            Self::LaunchFailed { .. } => "LAUNCH FAILED".to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct RunReport {
    pub command: String,
    pub elapsed_secs: f64,
    pub outcome: RunOutcome,
    pub stdout: String,
    pub stderr: String,
}

impl RunReport {
    // CONSOLE-ONLY DIAGNOSTIC FOR A FAILED RUN. NEVER PERSISTED.
    pub fn diagnostic(&self) -> Option<String> {
        match &self.outcome {
            RunOutcome::Success => None,
            RunOutcome::Failed { .. } => Some(format!(
                "ERROR RUNNING COMMAND: {} ({})\n{}",
                self.command,
                self.outcome.label(),
                self.stderr
            )),
            RunOutcome::LaunchFailed { reason } => Some(format!(
                "FAILED TO LAUNCH COMMAND: {}\n{}",
                self.command, reason
            )),
        }
    }
}

pub fn round2(secs: f64) -> f64 {
    (secs * 100.0).round() / 100.0
}

// ---------------------------------------------------------------------------
// RUNNER
// ---------------------------------------------------------------------------

pub struct CommandRunner {
    log_path: PathBuf,
}

impl CommandRunner {
    pub fn new(log_path: impl Into<PathBuf>) -> Self {
        Self {
            log_path: log_path.into(),
        }
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    // ALWAYS APPENDS EXACTLY ONE RECORD, AFTER THE CONSOLE LINE. A NON-ZERO
    // EXIT OR A LAUNCH FAILURE IS RETURNED AS A RunOutcome; ONLY A LOG WRITE
    // FAILURE IS AN Err.
    pub fn run(&self, cmd: &CommandLine) -> Result<RunReport, LogError> {
        let text = cmd.to_string();
        tracing::debug!(command = %text, "spawning");

        let start = Instant::now();
        let result = cmd.to_command().output();
        let elapsed_secs = round2(start.elapsed().as_secs_f64());

        let report = match result {
            Ok(output) => {
                let outcome = if output.status.success() {
                    RunOutcome::Success
                } else {
                    RunOutcome::Failed {
                        code: output.status.code(),
                    }
                };
                tracing::debug!(command = %text, status = ?output.status, elapsed_secs, "exited");
                RunReport {
                    command: text,
                    elapsed_secs,
                    outcome,
                    stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                    stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                }
            }
            Err(e) => RunReport {
                command: text,
                elapsed_secs,
                outcome: RunOutcome::LaunchFailed {
                    reason: e.to_string(),
                },
                stdout: String::new(),
                stderr: String::new(),
            },
        };

        // CONSOLE FIRST: A FAILED LOG WRITE MUST NOT HIDE THE CHILD'S STDERR
        match report.diagnostic() {
            Some(diag) => eprintln!("{}", diag),
            None => println!("EXECUTED: {} IN {:.2} SECONDS", report.command, report.elapsed_secs),
        }

        timelog::append(
            &self.log_path,
            &LogRecord {
                command: report.command.clone(),
                elapsed_secs,
            },
        )?;

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line_text() {
        let c = CommandLine::new("mpirun")
            .args(["--oversubscribe", "-np", "4"])
            .arg("./matrix");
        assert_eq!(c.to_string(), "mpirun --oversubscribe -np 4 ./matrix");
        assert_eq!(c.program(), "mpirun");
        assert_eq!(c.arguments().len(), 4);
    }

    #[test]
    fn round2_values() {
        assert_eq!(round2(1.234), 1.23);
        assert_eq!(round2(1.235001), 1.24);
        assert_eq!(round2(0.0), 0.0);
    }

    #[test]
    fn outcome_labels() {
        assert_eq!(RunOutcome::Success.label(), "OK");
        assert_eq!(RunOutcome::Failed { code: Some(3) }.label(), "EXIT 3");
        assert_eq!(RunOutcome::Failed { code: None }.label(), "KILLED BY SIGNAL");
        assert!(!RunOutcome::LaunchFailed { reason: String::new() }.is_success());
    }

    #[test]
    fn success_has_no_diagnostic() {
        let r = RunReport {
            command: "true".to_string(),
            elapsed_secs: 0.0,
            outcome: RunOutcome::Success,
            stdout: String::new(),
            stderr: String::new(),
        };
        assert!(r.diagnostic().is_none());
    }

    #[test]
    fn run_captures_output() {
        let dir = tempfile::tempdir().unwrap();
        let runner = CommandRunner::new(dir.path().join("log.txt"));
        let report = runner
            .run(&CommandLine::new("sh").args(["-c", "echo out; echo err >&2"]))
            .unwrap();
        assert!(report.outcome.is_success());
        assert_eq!(report.stdout, "out\n");
        assert_eq!(report.stderr, "err\n");
        assert!(report.elapsed_secs >= 0.0);
    }

    #[test]
    fn log_directory_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("nested/log.txt");
        let runner = CommandRunner::new(&log);
        runner.run(&CommandLine::new("true")).unwrap();
        assert_eq!(timelog::read_log(&log).unwrap().len(), 1);
    }

    #[test]
    fn unwritable_log_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();
        let runner = CommandRunner::new(blocker.join("log.txt"));
        assert!(matches!(
            runner.run(&CommandLine::new("false")),
            Err(LogError::CreateDir { .. })
        ));
    }

    #[test]
    fn multiline_argument_logs_one_record() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("log.txt");
        let runner = CommandRunner::new(&log);
        runner.run(&CommandLine::new("printf").arg("a\nb")).unwrap();
        let records = timelog::read_log(&log).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].command, "printf a\\nb");
    }

    #[test]
    fn arguments_are_not_shell_split() {
        let dir = tempfile::tempdir().unwrap();
        let runner = CommandRunner::new(dir.path().join("log.txt"));
        // ONE ARGUMENT WITH A SPACE AND A SEMICOLON STAYS ONE ARGUMENT
        let report = runner
            .run(&CommandLine::new("sh").args(["-c", "printf '%s' \"$0\"", "a b; rm -rf x"]))
            .unwrap();
        assert_eq!(report.stdout, "a b; rm -rf x");
    }
}
