use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building a table of contents
#[derive(Error, Debug)]
pub enum TocError {
    #[error("Directory not found: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("Failed to walk directory: {0}")]
    Walk(#[from] ignore::Error),

    #[error("Failed to read file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid glob pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },

    #[error("Config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("Failed to read config file {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {}: {message}", path.display())]
    ConfigParse { path: PathBuf, message: String },

    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(String),

    #[error("Failed to compile regex: {0}")]
    Regex(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, TocError>;
