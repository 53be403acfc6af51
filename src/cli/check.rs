use std::path::Path;
use std::process::Command;

use anyhow::{bail, Result};

use adjbench::sweep::Sweep;

fn check_tool(name: &str) -> bool {
    // RELATIVE PATHS (./matrix) ARE CHECKED ON DISK, BARE NAMES ON $PATH
    if name.contains('/') {
        return Path::new(name).is_file();
    }
    Command::new("which")
        .arg(name)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

// EVERY PROGRAM A SWEEP WILL LAUNCH, IN FIRST-USE ORDER, NO DUPLICATES
fn required_programs(sweeps: &[Sweep]) -> Vec<String> {
    let mut programs: Vec<String> = Vec::new();
    let mut push = |p: &str| {
        if !programs.iter().any(|q| q == p) {
            programs.push(p.to_string());
        }
    };
    for s in sweeps {
        if let Some(b) = &s.build {
            push(b.program());
        }
        if let Some(l) = &s.launcher {
            push(&l.program);
        }
        // BUILT TARGETS MAY NOT EXIST YET; THE BUILD STEP CREATES THEM
        if s.build.is_none() {
            push(&s.executable);
        }
    }
    programs
}

pub fn run_check(sweeps: &[Sweep]) -> Result<()> {
    println!("ADJBENCH PREFLIGHT CHECK");
    println!();

    let mut ok = true;
    println!("PROGRAMS:");
    for program in required_programs(sweeps) {
        if check_tool(&program) {
            println!("  {:<24}OK", program);
        } else {
            println!("  {:<24}MISSING", program);
            ok = false;
        }
    }
    println!();

    println!("INPUTS:");
    let mut inputs: Vec<&str> = sweeps.iter().map(|s| s.input.as_str()).collect();
    inputs.dedup();
    for input in inputs {
        if Path::new(input).is_file() {
            println!("  {:<24}OK", input);
        } else {
            println!("  {:<24}MISSING (RUN: adjbench generate --seed <N>)", input);
            ok = false;
        }
    }
    println!();

    if !ok {
        bail!("SOME CHECKS FAILED");
    }
    println!("ALL CHECKS PASSED");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use adjbench::sweep::{default_plan, DEFAULT_FIXED, DEFAULT_INPUT, DEFAULT_POWER};

    #[test]
    fn required_programs_default_plan() {
        let fixed: Vec<String> = DEFAULT_FIXED.iter().map(|s| s.to_string()).collect();
        let plan = default_plan(DEFAULT_INPUT, DEFAULT_POWER, &fixed);
        assert_eq!(required_programs(&plan), vec!["./Pthreads/matrix", "make", "mpirun"]);
    }

    #[test]
    fn check_tool_relative_path() {
        assert!(!check_tool("./definitely/not/here"));
        assert!(check_tool("/bin/sh"));
    }
}
