//! Printer rotation and print job submission for the fotobox.

mod error;
mod rotation;
mod sink;

pub use error::PrintError;
pub use rotation::PrinterRotation;
pub use sink::{CupsPrintSink, PrintSink};

/// Result type for print operations.
pub type PrintResult<T> = Result<T, PrintError>;
