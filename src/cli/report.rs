use std::path::PathBuf;

use anyhow::Result;

use adjbench::{report, timelog};

pub fn run_report(logs: &[PathBuf]) -> Result<()> {
    for path in logs {
        let records = timelog::read_log(path)?;
        let stats = report::summarize(&records);
        let title = format!("{} ({} RECORDS)", path.display(), records.len());
        print!("{}", report::render(&title, &stats));
    }
    Ok(())
}
