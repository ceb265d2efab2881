//! Error taxonomy for an attendance run.
//!
//! Every variant is fatal: the pipeline propagates with `?` and the binary
//! exits on the first one.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AttendanceError>;

#[derive(Debug, Error)]
pub enum AttendanceError {
    /// Missing or malformed configuration.
    #[error("config error in {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },

    /// Record file header lacks a required column.
    #[error("record file {} is missing required column '{column}'", path.display())]
    MissingColumn { path: PathBuf, column: &'static str },

    /// Record file is not valid delimited text.
    #[error("record file {} could not be parsed: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// `Attendance Count` is not a non-negative integer.
    #[error("row {row}: attendance count '{value}' is not a whole number")]
    InvalidAttendance { row: usize, value: String },

    #[error("total sessions is zero, attendance percentage is undefined")]
    ZeroSessions,

    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl AttendanceError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn config(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
