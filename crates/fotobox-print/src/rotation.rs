//! Round-robin printer selection.

/// An ordered set of printer names with a monotonically incrementing
/// counter. The active printer is `printers[counter % len]`; the counter
/// resets to 0 on every process start.
#[derive(Debug, Clone)]
pub struct PrinterRotation {
    printers: Vec<String>,
    counter: u64,
}

impl PrinterRotation {
    /// Create a rotation over the given printers, starting at the first.
    pub fn new(printers: Vec<String>) -> Self {
        Self {
            printers,
            counter: 0,
        }
    }

    /// The printer the next job should go to, if any is configured.
    pub fn current(&self) -> Option<&str> {
        if self.printers.is_empty() {
            return None;
        }
        let index = (self.counter % self.printers.len() as u64) as usize;
        Some(&self.printers[index])
    }

    /// Move the rotation to the next printer.
    pub fn advance(&mut self) {
        self.counter += 1;
    }

    /// Number of jobs selected so far.
    pub fn counter(&self) -> u64 {
        self.counter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_printers() -> PrinterRotation {
        PrinterRotation::new(vec!["Drucker1".to_string(), "Drucker2".to_string()])
    }

    #[test]
    fn test_rotation_alternates_from_zero() {
        let mut rotation = two_printers();
        let mut selected = Vec::new();
        for _ in 0..5 {
            selected.push(rotation.current().unwrap().to_string());
            rotation.advance();
        }
        assert_eq!(
            selected,
            ["Drucker1", "Drucker2", "Drucker1", "Drucker2", "Drucker1"]
        );
    }

    #[test]
    fn test_current_is_stable_without_advance() {
        let rotation = two_printers();
        assert_eq!(rotation.current(), Some("Drucker1"));
        assert_eq!(rotation.current(), Some("Drucker1"));
        assert_eq!(rotation.counter(), 0);
    }

    #[test]
    fn test_single_printer_rotation() {
        let mut rotation = PrinterRotation::new(vec!["Only".to_string()]);
        rotation.advance();
        rotation.advance();
        assert_eq!(rotation.current(), Some("Only"));
    }

    #[test]
    fn test_empty_rotation_has_no_printer() {
        let rotation = PrinterRotation::new(Vec::new());
        assert_eq!(rotation.current(), None);
    }
}
