mod check;
mod generate;
mod report;
mod sweep;
mod time;

pub use check::run_check;
pub use generate::run_generate;
pub use report::run_report;
pub use sweep::{print_plan, run_sweep, select};
pub use time::run_time;
