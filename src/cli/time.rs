use anyhow::Result;

use adjbench::timer::{self, BenchmarkTimer};

pub fn run_time(exe: &str, inputs: &[String], power: u64, fixed: &[String]) -> Result<()> {
    let bench = BenchmarkTimer::for_inputs(exe, inputs, power, fixed);
    println!("TIMING {} ACROSS {} INPUTS", exe, bench.jobs().len());
    println!();

    let timings = bench.run()?;

    println!();
    print!("{}", timer::render_table(&timings));
    Ok(())
}
