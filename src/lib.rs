// ADJBENCH LIBRARY
// MATRIX GENERATION + BENCHMARK ORCHESTRATION. NO CLI DEPENDENCIES;
// THE BINARY (main.rs) AND THE INTEGRATION TESTS BOTH LINK AGAINST THIS.

pub mod error;
pub mod matrix;
pub mod report;
pub mod runner;
pub mod sweep;
pub mod timelog;
pub mod timer;
pub mod writer;
