//! Errors raised by environments and loggers.
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while interacting with an environment.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnvError {
    /// The action is outside the environment's declared action space.
    #[error("invalid action {action}: expected a value in [0, {n_actions})")]
    InvalidAction { action: usize, n_actions: usize },
}

/// Errors raised by a [`Logger`](crate::common::logger::Logger).
#[derive(Error, Debug)]
pub enum LoggerError {
    #[error("logger dump file already exists: {0:?}")]
    AlreadyExists(PathBuf),

    #[error("logger dump path should be a csv: {0:?}")]
    NotCsv(PathBuf),

    #[error("logger dump path dir does not exist: {0:?}")]
    MissingDir(PathBuf),

    #[error("couldn't create directory {path:?}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
