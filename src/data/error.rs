use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or querying the job table.
#[derive(Error, Debug)]
pub enum DataError {
    /// The source file could not be opened or read.
    #[error("job data source {} is unavailable: {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The source was readable but is not a well-formed table.
    #[error("malformed job data{}: {reason}", line.map(|l| format!(" at line {l}")).unwrap_or_default())]
    MalformedSource { line: Option<u64>, reason: String },

    /// A query named a column that is not in the header.
    #[error("unknown column: {0}")]
    MissingColumn(String),

    /// A column query ran against the empty stand-in for a table that
    /// failed to load.
    #[error("cannot query column '{column}': job data is unavailable ({reason})")]
    Unavailable { column: String, reason: String },
}

impl DataError {
    pub(crate) fn malformed(line: Option<u64>, reason: impl Into<String>) -> Self {
        DataError::MalformedSource {
            line,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DataError>;
