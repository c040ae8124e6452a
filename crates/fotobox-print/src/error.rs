//! Error types for the print module.

use thiserror::Error;

/// Errors that can occur during print operations.
#[derive(Debug, Error)]
pub enum PrintError {
    /// No printer names were configured.
    #[error("no printer configured")]
    NoPrinterConfigured,

    /// The print spooler could not be reached.
    #[error("print spooler unavailable: {0}")]
    Spooler(#[from] std::io::Error),

    /// The spooler rejected the job.
    #[error("print submission to {printer} failed: {message}")]
    SubmissionFailed { printer: String, message: String },
}
