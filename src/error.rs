// ADJBENCH ERROR TYPES
// GENERATION-SIDE ERRORS ARE FATAL TO THE BATCH.
// COMMAND FAILURES ARE NOT ERRORS: THEY ARE RunOutcome VALUES (runner.rs).

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("invalid size for '{label}': {size} (must be >= 1 with N*N addressable)")]
    InvalidSize { label: String, size: i64 },

    #[error("duplicate size label '{0}'")]
    DuplicateLabel(String),

    #[error("malformed size entry '{0}' (expected label=N)")]
    InvalidEntry(String),
}

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("failed to create directory {}: {source}", .path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("missing dimension line")]
    MissingDimension,

    #[error("invalid dimension '{0}'")]
    InvalidDimension(String),

    #[error("expected {expected} rows, found {found}")]
    RowCount { expected: usize, found: usize },

    #[error("row {row}: expected {expected} values, found {found}")]
    RowLength { row: usize, expected: usize, found: usize },

    #[error("row {row}, column {col}: invalid value '{value}'")]
    InvalidValue { row: usize, col: usize, value: String },
}

#[derive(Error, Debug)]
pub enum ReadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("{}: {source}", .path.display())]
    Parse { path: PathBuf, source: ParseError },
}

#[derive(Error, Debug)]
pub enum LogError {
    #[error("failed to create log directory {}: {source}", .path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("failed to append to {}: {source}", .path.display())]
    Append { path: PathBuf, source: io::Error },

    #[error("failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PlanError {
    #[error("sweep '{sweep}': axis '{axis}' is a launcher argument but the sweep has no launcher")]
    LauncherSlotWithoutLauncher { sweep: String, axis: String },

    #[error("sweep '{sweep}': duplicate axis '{axis}'")]
    DuplicateAxis { sweep: String, axis: String },
}

#[derive(Error, Debug)]
pub enum SweepError {
    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error(transparent)]
    Log(#[from] LogError),
}

#[derive(Error, Debug)]
#[error("failed to launch {command}: {source}")]
pub struct LaunchError {
    pub command: String,
    pub source: io::Error,
}
