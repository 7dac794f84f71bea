use crate::rejection::Stage;

/// Receives progress as pipeline stages pass
pub trait Reporter {
    fn stage_passed(&mut self, stage: Stage, detail: &str);
}

/// Prints `✓ detail` lines to stdout
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn stage_passed(&mut self, _stage: Stage, detail: &str) {
        println!("✓ {}", detail);
    }
}

/// Discards progress
impl Reporter for () {
    fn stage_passed(&mut self, _stage: Stage, _detail: &str) {}
}

/// Records progress, mostly for tests
impl Reporter for Vec<(Stage, String)> {
    fn stage_passed(&mut self, stage: Stage, detail: &str) {
        self.push((stage, detail.to_string()));
    }
}
