use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MazeError {
    #[error("failed to read maze file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("maze is empty")]
    Empty,
    #[error("maze row {row} is {found} cells wide, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("maze has no player spawn ('P')")]
    MissingPlayer,
    #[error("maze has more than one player spawn (second at row {row}, col {col})")]
    DuplicatePlayer { row: usize, col: usize },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("pill_duration_secs must be greater than zero")]
    ZeroPillDuration,
}
