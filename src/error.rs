use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TallyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("could not load statement: {0}")]
    Load(#[from] LoadError),

    #[error("Cannot read category file {}: {source}", path.display())]
    Store {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Category '{0}' already exists")]
    DuplicateCategory(String),

    #[error("Category '{0}' does not exist. Please create it first.")]
    UnknownCategory(String),

    #[error("Please enter a category name.")]
    EmptyName,

    #[error("Edited table has {found} rows, expected {expected}")]
    RowCountMismatch { expected: usize, found: usize },

    #[error("Edited row {row} does not match any transaction in the statement")]
    RowMismatch { row: usize },

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

/// Reasons a statement could not be turned into a transaction table.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("cannot open statement: {0}")]
    Io(#[from] std::io::Error),

    #[error("not a valid CSV file: {0}")]
    Malformed(#[from] csv::Error),

    #[error("file has no header row")]
    MissingHeader,

    #[error("missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

pub type Result<T> = std::result::Result<T, TallyError>;
