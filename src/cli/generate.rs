use std::path::Path;

use anyhow::{bail, Context, Result};

use adjbench::matrix::{self, SizeSpec};
use adjbench::writer;

// ALL-OR-NOTHING: SIZES ARE VALIDATED BEFORE ANY DRAW, AND THE FIRST
// WRITE FAILURE ABORTS THE BATCH WITH A NON-ZERO EXIT.
pub fn run_generate(seed: u64, out_dir: &Path, sizes: &[String], verify: bool) -> Result<()> {
    let spec = if sizes.is_empty() {
        SizeSpec::default()
    } else {
        SizeSpec::parse_entries(sizes)?
    };

    let set = matrix::generate(seed, &spec)?;
    let paths = writer::write_all(&set, out_dir)?;

    for ((label, _), path) in set.iter().zip(&paths) {
        println!("{} MATRIX SAVED TO {}", label.to_uppercase(), path.display());
    }

    if verify {
        for ((label, expected), path) in set.iter().zip(&paths) {
            let got = writer::read_matrix(path)
                .with_context(|| format!("verifying {}", label))?;
            if &got != expected {
                bail!("VERIFY FAILED: {} DOES NOT MATCH THE GENERATED MATRIX", path.display());
            }
        }
        println!("VERIFIED {} MATRICES", paths.len());
    }

    Ok(())
}
