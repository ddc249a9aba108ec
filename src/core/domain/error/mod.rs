use std::path::PathBuf;
use thiserror::Error;

/// Stack trace captured where an error was raised.
///
/// Printed with the error's `Debug` form when `RUST_BACKTRACE` is set.
pub type CapturedTrace = std::backtrace::Backtrace;

/// The main error type for report generation.
///
/// Every variant except `LoadSample` means the run cannot produce a trustworthy
/// report and is propagated up to the entry point.
#[derive(Error, Debug)]
pub enum ReportError {
    /// Represents a failed read of a guest directory, guest config or host status file
    ///
    /// # Fields
    /// * `path` - The file or directory being accessed
    /// * `source` - The underlying I/O error
    /// * `backtrace` - Stack trace where the error occurred
    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
        backtrace: CapturedTrace,
    },

    /// Represents a failure to write the rendered report into its sink
    #[error("Output error: {source}")]
    Output {
        source: std::io::Error,
        backtrace: CapturedTrace,
    },

    /// Represents a host status source whose contents could not be understood
    ///
    /// # Fields
    /// * `source` - The underlying parse error
    /// * `backtrace` - Stack trace where the error occurred
    #[error("Host status error: {source}")]
    HostStatus {
        source: ParseError,
        backtrace: CapturedTrace,
    },

    /// Represents a failed CPU load sample. The probe recovers from this one.
    #[error("Load sampling error: {0}")]
    LoadSample(String),
}

impl ReportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ReportError::Io {
            path: path.into(),
            source,
            backtrace: CapturedTrace::capture(),
        }
    }

    pub(crate) fn output(source: std::io::Error) -> Self {
        ReportError::Output {
            source,
            backtrace: CapturedTrace::capture(),
        }
    }

    /// The trace captured when the error was raised, if the variant keeps one.
    pub fn trace(&self) -> Option<&CapturedTrace> {
        match self {
            ReportError::Io { backtrace, .. }
            | ReportError::Output { backtrace, .. }
            | ReportError::HostStatus { backtrace, .. } => Some(backtrace),
            ReportError::LoadSample(_) => None,
        }
    }
}

impl From<ParseError> for ReportError {
    fn from(error: ParseError) -> Self {
        ReportError::HostStatus {
            source: error,
            backtrace: CapturedTrace::capture(),
        }
    }
}

/// Specialized error type for text that does not parse into the expected shape.
///
/// Guest configs downgrade these to warnings; host status files do not.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// Represents a field whose value is not of the expected type
    ///
    /// # Fields
    /// * `field` - The name of the field
    /// * `value` - The raw value that failed to parse
    #[error("Field '{field}' has invalid value '{value}'")]
    Field { field: String, value: String },

    /// Represents format/syntax violations
    #[error("Format error: {0}")]
    Format(String),

    /// Represents values that parse but break a domain constraint
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
}

/// Type alias for Results that may fail with a ReportError
pub type ReportResult<T> = Result<T, ReportError>;
