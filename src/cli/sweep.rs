use std::path::Path;

use anyhow::{bail, Result};

use adjbench::sweep::{Orchestrator, Sweep};

pub fn select(plan: Vec<Sweep>, only: &[String]) -> Result<Vec<Sweep>> {
    if only.is_empty() {
        return Ok(plan);
    }
    for name in only {
        if !plan.iter().any(|s| &s.name == name) {
            bail!("UNKNOWN SWEEP: {}", name);
        }
    }
    // KEEP PLAN ORDER, NOT --only ORDER
    Ok(plan.into_iter().filter(|s| only.contains(&s.name)).collect())
}

pub fn print_plan(sweeps: &[Sweep]) {
    for s in sweeps {
        println!("{} ({})", s.name.to_uppercase(), s.log_file);
        for config in s.configurations() {
            if let Some(b) = &s.build {
                println!("  [{}] {}", config, b);
            }
            println!("  [{}] {}", config, s.command_for(&config));
        }
        println!();
    }
}

pub fn run_sweep(out_dir: &Path, sweeps: &[Sweep]) -> Result<()> {
    let orchestrator = Orchestrator::new(out_dir);
    let reports = orchestrator.run_all(sweeps)?;

    let failed: Vec<_> = reports
        .iter()
        .flat_map(|r| r.failed().map(move |c| (r.name.as_str(), c)))
        .collect();
    if !failed.is_empty() {
        println!();
        println!("FAILED CONFIGURATIONS:");
        for (sweep, c) in failed {
            let what = match &c.build {
                Some(b) if !b.outcome.is_success() => format!("BUILD {}", b.outcome.label()),
                _ => c.run.outcome.label(),
            };
            println!("  {:<10} [{}] {}", sweep, c.configuration, what);
        }
    }
    Ok(())
}
