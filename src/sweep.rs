// ADJBENCH EXPERIMENT ORCHESTRATOR
// A SWEEP IS DATA: TARGET, FIXED ARGUMENTS, OPTIONAL BUILD STEP, NAMED AXES.
// CONFIGURATIONS ARE THE CARTESIAN PRODUCT OF THE AXES (FIRST AXIS OUTERMOST).
//
// STRICTLY SEQUENTIAL. ONE COMMAND PER CONFIGURATION, IN DECLARED ORDER.
// NO RETRIES, NO SHORT-CIRCUIT: A FAILED BUILD OR RUN IS RECORDED AND THE
// SWEEP MOVES ON. ONLY A BROKEN LOG FILE OR AN INVALID PLAN STOPS IT.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{LogError, PlanError, SweepError};
use crate::runner::{CommandLine, CommandRunner, RunOutcome, RunReport};

// ---------------------------------------------------------------------------
// AXES AND CONFIGURATIONS
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArgSlot {
    // APPENDED AFTER THE FIXED PARAMETERS (E.G. THREAD COUNT)
    Trailing,
    // PASSED TO THE LAUNCHER AS "<flag> <value>" (E.G. mpirun -np <processes>)
    Launcher { flag: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Axis {
    pub name: String,
    pub values: Vec<u32>,
    pub slot: ArgSlot,
}

impl Axis {
    pub fn trailing(name: impl Into<String>, values: &[u32]) -> Self {
        Self {
            name: name.into(),
            values: values.to_vec(),
            slot: ArgSlot::Trailing,
        }
    }

    pub fn launcher(name: impl Into<String>, flag: impl Into<String>, values: &[u32]) -> Self {
        Self {
            name: name.into(),
            values: values.to_vec(),
            slot: ArgSlot::Launcher { flag: flag.into() },
        }
    }
}

// ONE POINT IN THE PARAMETER SPACE. VALUES ARE IN AXIS DECLARATION ORDER.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Configuration {
    params: Vec<(String, u32)>,
}

impl Configuration {
    pub fn get(&self, axis: &str) -> Option<u32> {
        self.params.iter().find(|(n, _)| n == axis).map(|(_, v)| *v)
    }

    pub fn params(&self) -> &[(String, u32)] {
        &self.params
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.params.is_empty() {
            return f.write_str("(default)");
        }
        for (i, (name, value)) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}={}", name, value)?;
        }
        Ok(())
    }
}

// CARTESIAN PRODUCT, FIRST AXIS OUTERMOST. NO AXES = ONE EMPTY CONFIGURATION.
// ANY AXIS WITHOUT VALUES = NO CONFIGURATIONS.
pub fn enumerate(axes: &[Axis]) -> Vec<Configuration> {
    let mut configs = vec![Configuration { params: Vec::new() }];
    for axis in axes {
        let mut next = Vec::with_capacity(configs.len() * axis.values.len());
        for base in &configs {
            for &v in &axis.values {
                let mut params = base.params.clone();
                params.push((axis.name.clone(), v));
                next.push(Configuration { params });
            }
        }
        configs = next;
    }
    configs
}

// ---------------------------------------------------------------------------
// SWEEP
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Launcher {
    pub program: String,
    pub args: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct Sweep {
    pub name: String,
    pub log_file: String,
    pub launcher: Option<Launcher>,
    pub executable: String,
    pub input: String,
    pub power: u64,
    pub fixed: Vec<String>,
    pub build: Option<CommandLine>,
    pub axes: Vec<Axis>,
}

impl Sweep {
    pub fn validate(&self) -> Result<(), PlanError> {
        let mut seen = HashSet::new();
        for axis in &self.axes {
            if !seen.insert(axis.name.as_str()) {
                return Err(PlanError::DuplicateAxis {
                    sweep: self.name.clone(),
                    axis: axis.name.clone(),
                });
            }
            if self.launcher.is_none() && matches!(axis.slot, ArgSlot::Launcher { .. }) {
                return Err(PlanError::LauncherSlotWithoutLauncher {
                    sweep: self.name.clone(),
                    axis: axis.name.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn configurations(&self) -> Vec<Configuration> {
        enumerate(&self.axes)
    }

    // [LAUNCHER, LAUNCHER ARGS, LAUNCHER-SLOT FLAGS] EXE INPUT POWER FIXED.. TRAILING..
    pub fn command_for(&self, config: &Configuration) -> CommandLine {
        let slotted = || self.axes.iter().zip(config.params.iter().map(|(_, v)| *v));

        let mut cmd = match &self.launcher {
            Some(l) => {
                let mut c = CommandLine::new(l.program.as_str()).args(l.args.iter().cloned());
                for (axis, value) in slotted() {
                    if let ArgSlot::Launcher { flag } = &axis.slot {
                        c = c.arg(flag.as_str()).arg(value.to_string());
                    }
                }
                c.arg(self.executable.as_str())
            }
            None => CommandLine::new(self.executable.as_str()),
        };

        cmd = cmd
            .arg(self.input.as_str())
            .arg(self.power.to_string())
            .args(self.fixed.iter().cloned());

        for (axis, value) in slotted() {
            if axis.slot == ArgSlot::Trailing {
                cmd = cmd.arg(value.to_string());
            }
        }
        cmd
    }
}

// ---------------------------------------------------------------------------
// RESULTS
// ---------------------------------------------------------------------------

// WHAT SURVIVES OF A RUN AFTER THE CALL: stdout/stderr ARE DROPPED.
#[derive(Clone, Debug, PartialEq)]
pub struct RunSummary {
    pub command: String,
    pub elapsed_secs: f64,
    pub outcome: RunOutcome,
}

impl From<RunReport> for RunSummary {
    fn from(r: RunReport) -> Self {
        Self {
            command: r.command,
            elapsed_secs: r.elapsed_secs,
            outcome: r.outcome,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ConfigResult {
    pub configuration: Configuration,
    pub build: Option<RunSummary>,
    pub run: RunSummary,
}

impl ConfigResult {
    // A FAILED BUILD FAILS THE CONFIGURATION EVEN IF A STALE BINARY RAN FINE
    pub fn succeeded(&self) -> bool {
        self.run.outcome.is_success()
            && self.build.as_ref().map_or(true, |b| b.outcome.is_success())
    }
}

#[derive(Clone, Debug)]
pub struct SweepReport {
    pub name: String,
    pub log_path: PathBuf,
    pub results: Vec<ConfigResult>,
}

impl SweepReport {
    pub fn succeeded(&self) -> impl Iterator<Item = &ConfigResult> {
        self.results.iter().filter(|r| r.succeeded())
    }

    pub fn failed(&self) -> impl Iterator<Item = &ConfigResult> {
        self.results.iter().filter(|r| !r.succeeded())
    }

    pub fn summary_line(&self) -> String {
        format!(
            "{}: {} CONFIGURATIONS, {} OK, {} FAILED (LOG: {})",
            self.name.to_uppercase(),
            self.results.len(),
            self.succeeded().count(),
            self.failed().count(),
            self.log_path.display()
        )
    }
}

// ---------------------------------------------------------------------------
// ORCHESTRATOR
// ---------------------------------------------------------------------------

pub struct Orchestrator {
    out_dir: PathBuf,
}

impl Orchestrator {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    pub fn run(&self, sweep: &Sweep) -> Result<SweepReport, SweepError> {
        sweep.validate()?;
        fs::create_dir_all(&self.out_dir).map_err(|source| LogError::CreateDir {
            path: self.out_dir.clone(),
            source,
        })?;

        let runner = CommandRunner::new(self.out_dir.join(&sweep.log_file));
        let configs = sweep.configurations();
        tracing::debug!(sweep = %sweep.name, count = configs.len(), "starting sweep");

        let mut results = Vec::with_capacity(configs.len());
        for configuration in configs {
            // BUILD BEFORE EVERY MEASURED RUN; ITS FAILURE DOES NOT SKIP THE RUN
            let build = match &sweep.build {
                Some(b) => Some(RunSummary::from(runner.run(b)?)),
                None => None,
            };
            let run = RunSummary::from(runner.run(&sweep.command_for(&configuration))?);
            results.push(ConfigResult {
                configuration,
                build,
                run,
            });
        }

        Ok(SweepReport {
            name: sweep.name.clone(),
            log_path: runner.log_path().to_path_buf(),
            results,
        })
    }

    pub fn run_all(&self, sweeps: &[Sweep]) -> Result<Vec<SweepReport>, SweepError> {
        let mut reports = Vec::with_capacity(sweeps.len());
        for sweep in sweeps {
            println!("RUNNING {} EXPERIMENTS...", sweep.name.to_uppercase());
            let report = self.run(sweep)?;
            println!("{}", report.summary_line());
            reports.push(report);
        }
        println!("ALL EXPERIMENTS COMPLETED.");
        Ok(reports)
    }
}

// ---------------------------------------------------------------------------
// DEFAULT PLAN
// ---------------------------------------------------------------------------

pub const DEFAULT_INPUT: &str = "../in/large.txt";
pub const DEFAULT_POWER: u64 = 1_000_000;
pub const DEFAULT_FIXED: [&str; 2] = ["1", "2"];
pub const DEFAULT_OUT_DIR: &str = "times";

pub const PLAN_NAMES: [&str; 3] = ["pthreads", "mpi", "hybrid"];

fn mpirun() -> Launcher {
    Launcher {
        program: "mpirun".to_string(),
        args: vec!["--oversubscribe".to_string()],
    }
}

// THREADED, DISTRIBUTED, AND HYBRID SWEEPS OVER ONE INPUT MATRIX
pub fn default_plan(input: &str, power: u64, fixed: &[String]) -> Vec<Sweep> {
    vec![
        Sweep {
            name: "pthreads".to_string(),
            log_file: "pthread_times.txt".to_string(),
            launcher: None,
            executable: "./Pthreads/matrix".to_string(),
            input: input.to_string(),
            power,
            fixed: fixed.to_vec(),
            build: None,
            axes: vec![Axis::trailing("threads", &[2, 4, 6])],
        },
        Sweep {
            name: "mpi".to_string(),
            log_file: "mpi_times.txt".to_string(),
            launcher: Some(mpirun()),
            executable: "./matrix".to_string(),
            input: input.to_string(),
            power,
            fixed: fixed.to_vec(),
            build: Some(CommandLine::new("make").args(["-f", "mpi_makefile"])),
            axes: vec![Axis::launcher("processes", "-np", &[2, 4, 6])],
        },
        Sweep {
            name: "hybrid".to_string(),
            log_file: "hybrid_times.txt".to_string(),
            launcher: Some(mpirun()),
            executable: "./mpi_pthreads".to_string(),
            input: input.to_string(),
            power,
            fixed: fixed.to_vec(),
            build: Some(CommandLine::new("make").args(["-f", "hybrid_makefile"])),
            axes: vec![
                Axis::trailing("threads", &[2, 4, 8]),
                Axis::launcher("processes", "-np", &[2, 4, 8]),
            ],
        },
    ]
}
