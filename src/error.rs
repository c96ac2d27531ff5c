use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FaturaError {
    #[error("Config error ({}): {message}", .path.display())]
    Config { path: PathBuf, message: String },

    #[error("Input error ({}): {message}", .path.display())]
    Input { path: PathBuf, message: String },

    #[error("Output error ({}): {message}", .path.display())]
    Output { path: PathBuf, message: String },
}

impl FaturaError {
    pub fn config(path: &Path, message: impl ToString) -> Self {
        Self::Config {
            path: path.to_path_buf(),
            message: message.to_string(),
        }
    }

    pub fn input(path: &Path, message: impl ToString) -> Self {
        Self::Input {
            path: path.to_path_buf(),
            message: message.to_string(),
        }
    }

    pub fn output(path: &Path, message: impl ToString) -> Self {
        Self::Output {
            path: path.to_path_buf(),
            message: message.to_string(),
        }
    }
}

/// Per-row installment failure. Never aborts a run; the row is logged and
/// passed through untouched.
#[derive(Error, Debug, PartialEq)]
pub enum InstallmentError {
    #[error("installment '{0}' is not of the form current/total")]
    Malformed(String),

    #[error("installment '{0}' must use positive integers")]
    NotPositive(String),

    #[error("date '{0}' is not a day-first date")]
    BadDate(String),

    #[error("date '{0}' cannot be moved back {1} months")]
    OutOfRange(String, i64),
}

pub type Result<T> = std::result::Result<T, FaturaError>;
