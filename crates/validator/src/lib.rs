//! Rip log validation.
//!
//! A log is read once, top to bottom, through a [`LogCursor`]. The checker for
//! its ripper walks a fixed list of stages; the drive stage maps the logged
//! drive name onto a reference [`DriveRecord`](riplog_core::DriveRecord) via
//! [`normalize`] and [`DriveDatabase::resolve`]. The first failing stage
//! rejects the log with a [`Rejection`].

pub mod checker;
pub mod cursor;
pub mod normalize;
pub mod rejection;
pub mod report;
pub mod resolve;
pub mod xld;

pub use checker::{LogChecker, RipperFormat, Validator};
pub use cursor::LogCursor;
pub use normalize::normalize;
pub use rejection::{Rejection, RejectionKind, Stage};
pub use report::{ConsoleReporter, Reporter};
pub use resolve::{DriveDatabase, DriveMatch};
pub use xld::XldChecker;
