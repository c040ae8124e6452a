//! Print job submission.

use std::path::Path;
use std::process::Command;

use tracing::{debug, info, instrument};

use crate::error::PrintError;
use crate::PrintResult;

/// Trait for print sinks.
pub trait PrintSink: Send {
    /// Submit a photo to the named printer, fit to the page margins.
    fn submit(&mut self, printer: &str, photo: &Path) -> PrintResult<()>;
}

/// Submits jobs through the CUPS `lp` spooler.
#[derive(Debug, Default)]
pub struct CupsPrintSink;

impl PrintSink for CupsPrintSink {
    #[instrument(name = "print_submit", skip(self, photo), fields(photo = %photo.display()))]
    fn submit(&mut self, printer: &str, photo: &Path) -> PrintResult<()> {
        debug!("submitting print job");

        let output = Command::new("lp")
            .arg("-d")
            .arg(printer)
            .arg("-o")
            .arg("fit-to-page")
            .arg(photo)
            .output()?;

        if !output.status.success() {
            return Err(PrintError::SubmissionFailed {
                printer: printer.to_string(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        info!(printer, "print job submitted");
        Ok(())
    }
}
