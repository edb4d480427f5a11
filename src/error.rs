// src/error.rs

use std::{path::PathBuf, process::ExitStatus};
use thiserror::Error;

/// Everything that can stop a report run. There is no recovery path: each
/// variant is surfaced to the binary, which exits non-zero.
#[derive(Debug, Error)]
pub enum ReportError {
    /// A simulation stage ran but exited unsuccessfully.
    #[error("{tool} exited with {status}")]
    ExternalToolFailure { tool: String, status: ExitStatus },

    /// A simulation stage could not be started (missing binary, permissions).
    #[error("failed to launch {tool}: {source}")]
    ExternalToolSpawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    /// Simulator output that cannot be turned into a rectangular table.
    #[error("malformed simulator output: {0}")]
    MalformedOutput(String),

    /// The spreadsheet could not be written to disk.
    #[error("failed to write report {path:?}: {source}")]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: umya_spreadsheet::XlsxError,
    },
}

impl ReportError {
    /// Process exit code for this error. A failing tool's own exit code is
    /// propagated when the OS reports one.
    pub fn exit_code(&self) -> u8 {
        match self {
            ReportError::ExternalToolFailure { status, .. } => status
                .code()
                .and_then(|c| u8::try_from(c).ok())
                .filter(|c| *c != 0)
                .unwrap_or(1),
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
