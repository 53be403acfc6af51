// ADJBENCH -- ADJACENCY MATRIX BENCHMARK HARNESS
// GENERATES REPRODUCIBLE SYMMETRIC 0/1 INPUT MATRICES AND TIMES EXTERNAL
// MATRIX EXECUTABLES ACROSS THREAD / PROCESS / HYBRID CONFIGURATIONS.
//
// THE HARNESS IS SINGLE-THREADED. ALL CONCURRENCY UNDER MEASUREMENT LIVES
// INSIDE THE EXTERNAL EXECUTABLES; WE ONLY PASS THE DEGREE AS AN ARGUMENT.

mod cli;

use std::path::PathBuf;

use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use adjbench::sweep::{self, default_plan};
use adjbench::timer;

#[derive(Parser)]
#[command(name = "adjbench")]
#[command(about = "ADJBENCH -- MATRIX INPUT GENERATOR AND CONCURRENCY BENCHMARK HARNESS")]
struct Cli {
    // DEBUG-LEVEL TRACING ON STDERR (RUST_LOG OVERRIDES)
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    // WRITE <out-dir>/<label>.txt FOR EACH SIZE
    Generate {
        #[arg(long)]
        seed: u64,

        #[arg(long, default_value = "../in")]
        out_dir: PathBuf,

        // label=N, REPEATABLE, ORDER MATTERS (DEFAULT small=100 medium=300 large=600)
        #[arg(long = "size")]
        sizes: Vec<String>,

        // READ EVERY FILE BACK AND COMPARE
        #[arg(long)]
        verify: bool,
    },

    // RUN THE THREADED / MPI / HYBRID SWEEPS
    Sweep {
        #[arg(long, default_value = sweep::DEFAULT_OUT_DIR)]
        out_dir: PathBuf,

        #[arg(long, default_value = sweep::DEFAULT_INPUT)]
        input: String,

        #[arg(long, default_value_t = sweep::DEFAULT_POWER)]
        power: u64,

        #[arg(long, num_args = 1.., default_values = sweep::DEFAULT_FIXED)]
        fixed: Vec<String>,

        // RESTRICT TO NAMED SWEEPS (REPEATABLE)
        #[arg(long, value_parser = PossibleValuesParser::new(sweep::PLAN_NAMES))]
        only: Vec<String>,

        // PRINT THE COMMANDS WITHOUT RUNNING THEM
        #[arg(long)]
        dry_run: bool,
    },

    // TIME ONE EXECUTABLE ACROSS SEVERAL INPUT FILES
    Time {
        #[arg(long)]
        exe: String,

        #[arg(long = "input", num_args = 1.., default_values = timer::DEFAULT_INPUTS)]
        inputs: Vec<String>,

        #[arg(long, default_value_t = sweep::DEFAULT_POWER)]
        power: u64,

        #[arg(long, num_args = 1.., default_values = timer::DEFAULT_FIXED)]
        fixed: Vec<String>,
    },

    // SUMMARISE ONE OR MORE TIMING LOGS
    Report {
        #[arg(required = true)]
        logs: Vec<PathBuf>,
    },

    // VERIFY PROGRAMS AND INPUT MATRIX FOR THE SWEEP PLAN
    Check {
        #[arg(long, default_value = sweep::DEFAULT_INPUT)]
        input: String,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Generate { seed, out_dir, sizes, verify } => {
            cli::run_generate(seed, &out_dir, &sizes, verify)
        }
        Commands::Sweep { out_dir, input, power, fixed, only, dry_run } => {
            let sweeps = cli::select(default_plan(&input, power, &fixed), &only)?;
            if dry_run {
                cli::print_plan(&sweeps);
                return Ok(());
            }
            cli::run_sweep(&out_dir, &sweeps)
        }
        Commands::Time { exe, inputs, power, fixed } => {
            cli::run_time(&exe, &inputs, power, &fixed)
        }
        Commands::Report { logs } => cli::run_report(&logs),
        Commands::Check { input } => {
            let fixed: Vec<String> = sweep::DEFAULT_FIXED.iter().map(|s| s.to_string()).collect();
            cli::run_check(&default_plan(&input, sweep::DEFAULT_POWER, &fixed))
        }
    }
}
