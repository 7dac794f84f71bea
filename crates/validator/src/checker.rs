use crate::cursor::LogCursor;
use crate::rejection::Rejection;
use crate::report::Reporter;
use crate::resolve::DriveDatabase;
use crate::xld::{self, XldChecker};
use riplog_core::Policy;
use std::fmt;
use tracing::debug;

/// A per-ripper validation pipeline.
///
/// `check` is called with the cursor positioned on the log's first line and
/// either accepts the log or returns the first rejection it hits.
pub trait LogChecker {
    fn check(&self, cursor: &mut LogCursor<'_>, reporter: &mut dyn Reporter) -> Result<(), Rejection>;
}

/// Ripping software that produced a log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RipperFormat {
    Xld,
    Eac,
}

impl RipperFormat {
    /// Identify the ripper from the first line of its log
    pub fn detect(header: &str) -> Option<Self> {
        let header = header.trim_start_matches('\u{feff}').trim_start();
        if header.starts_with(xld::HEADER_PREFIX.trim_end()) {
            Some(RipperFormat::Xld)
        } else if header.starts_with("Exact Audio Copy") || header.starts_with("EAC extraction logfile") {
            Some(RipperFormat::Eac)
        } else {
            None
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RipperFormat::Xld => "X Lossless Decoder",
            RipperFormat::Eac => "Exact Audio Copy",
        }
    }
}

impl fmt::Display for RipperFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Dispatches a log to the checker for its ripper
pub struct Validator<'a> {
    drives: &'a DriveDatabase,
    policy: &'a Policy,
}

impl<'a> Validator<'a> {
    pub fn new(drives: &'a DriveDatabase, policy: &'a Policy) -> Self {
        Self { drives, policy }
    }

    /// Validate a complete log. On success returns the detected format.
    pub fn validate(&self, log: &str, reporter: &mut dyn Reporter) -> Result<RipperFormat, Rejection> {
        let mut cursor = LogCursor::new(log);
        let header = cursor.advance().ok_or(Rejection::UnrecognizedLog)?;
        let format = RipperFormat::detect(header).ok_or(Rejection::UnrecognizedLog)?;
        debug!(%format, "detected rip log format");

        let checker: Box<dyn LogChecker + '_> = match format {
            RipperFormat::Xld => Box::new(XldChecker::new(self.drives, self.policy)),
            RipperFormat::Eac => return Err(Rejection::UnsupportedFormat(format.name())),
        };

        checker.check(&mut cursor, reporter)?;
        Ok(format)
    }
}
