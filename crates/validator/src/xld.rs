//! X Lossless Decoder log checker.
//!
//! XLD logs have no formal grammar and their layout shifts between releases,
//! so each stage skips forward to a stable marker and reads its fields from
//! the lines that follow. Stages run in order and stop at the first rejection.

use crate::checker::LogChecker;
use crate::cursor::{LogCursor, field_value};
use crate::rejection::{Rejection, Stage};
use crate::report::Reporter;
use crate::resolve::DriveDatabase;
use riplog_core::config::{XLD_VERSION_FORMAT, parse_xld_version};
use riplog_core::{AlbumInfo, DriveRecord, Policy};
use tracing::debug;

pub const HEADER_PREFIX: &str = "X Lossless Decoder version ";

const USED_DRIVE: &str = "Used drive";
const PRESSED_CD: &str = "Pressed CD";
const RIPPER_MODE: &str = "Ripper";
const SECURE_RIPPER: &str = "XLD Secure Ripper";
const STATISTICS: &str = "Statistics";
const DAMAGED: &str = "Damaged";

pub struct XldChecker<'a> {
    drives: &'a DriveDatabase,
    policy: &'a Policy,
}

impl<'a> XldChecker<'a> {
    pub fn new(drives: &'a DriveDatabase, policy: &'a Policy) -> Self {
        Self { drives, policy }
    }

    fn check_version(&self, cursor: &mut LogCursor<'_>) -> Result<(), Rejection> {
        let header = match cursor.current() {
            Some(line) => line,
            None => cursor.advance().ok_or(Rejection::InvalidHeader)?,
        };

        let token = header
            .strip_prefix(HEADER_PREFIX.trim_end())
            .filter(|rest| rest.starts_with(char::is_whitespace))
            .and_then(|rest| rest.split_whitespace().next())
            .ok_or(Rejection::InvalidHeader)?;

        let date = parse_xld_version(token)
            .ok_or_else(|| Rejection::InvalidVersionDate(token.to_string()))?;

        if date < self.policy.minimum_xld_version {
            return Err(Rejection::VersionTooOld {
                found: token.to_string(),
                minimum: self
                    .policy
                    .minimum_xld_version
                    .format(XLD_VERSION_FORMAT)
                    .to_string(),
            });
        }

        Ok(())
    }

    fn verify_settings(&self, cursor: &mut LogCursor<'_>) -> Result<DriveRecord, Rejection> {
        let line = cursor
            .advance_until(|l| l.starts_with(USED_DRIVE))
            .ok_or(truncated(Stage::Settings, "used drive"))?;
        let drive_name = field_value(line).ok_or(Rejection::MalformedField {
            stage: Stage::Settings,
            field: "used drive",
        })?;

        if drive_name.is_empty() {
            return Err(Rejection::MissingDrive);
        }

        if drive_name.contains("null") {
            return Err(Rejection::NullDrive);
        }

        if self.policy.is_virtual_drive(drive_name) {
            return Err(Rejection::VirtualDrive(drive_name.to_string()));
        }

        let drive = self.drives.resolve(drive_name);
        if drive.score < self.policy.minimum_drive_score {
            return Err(Rejection::DriveScoreTooLow {
                identifier: drive.identifier,
                score: drive.score,
            });
        }

        let media = cursor
            .advance_non_blank()
            .ok_or(truncated(Stage::Settings, "media type"))?;
        if !media.contains(PRESSED_CD) {
            return Err(Rejection::NotPressedCd);
        }

        let ripper = cursor
            .advance_until(|l| l.starts_with(RIPPER_MODE))
            .ok_or(truncated(Stage::Settings, "ripper mode"))?;
        if !field_value(ripper).is_some_and(|mode| mode.contains(SECURE_RIPPER)) {
            return Err(Rejection::InsecureRipper);
        }

        let cache = next_line(cursor, "disable audio cache")?;
        if !cache.contains("OK") && !cache.contains("YES") {
            return Err(Rejection::AudioCacheEnabled);
        }

        let c2 = next_line(cursor, "c2 pointer setting")?;
        if !c2.contains("NO") {
            return Err(Rejection::C2PointersUsed);
        }

        let offset_value = field_value(next_line(cursor, "read offset")?).unwrap_or_default();
        let offset: i32 = offset_value
            .parse()
            .map_err(|_| Rejection::InvalidOffset(offset_value.to_string()))?;

        if offset == 0 {
            return Err(Rejection::ZeroOffset);
        }

        if offset != drive.offset {
            debug!(
                identifier = %drive.identifier,
                expected = drive.offset,
                found = offset,
                "read offset mismatch"
            );
            return Err(Rejection::OffsetMismatch {
                found: offset,
                expected: drive.offset,
            });
        }

        let retries = field_value(next_line(cursor, "max retry count")?)
            .filter(|value| !value.is_empty())
            .ok_or(Rejection::MissingMaxRetries)?;

        let minimum = self.policy.minimum_retries;
        match retries.split_whitespace().next().map(str::parse::<u32>) {
            Some(Ok(count)) if count >= minimum => Ok(drive),
            _ => Err(Rejection::TooFewRetries { minimum }),
        }
    }
}

impl LogChecker for XldChecker<'_> {
    fn check(&self, cursor: &mut LogCursor<'_>, reporter: &mut dyn Reporter) -> Result<(), Rejection> {
        self.check_version(cursor)?;
        reporter.stage_passed(Stage::Version, "Valid XLD version");

        let album = album_info(cursor)?;
        reporter.stage_passed(Stage::Album, &format!("Checking XLD log for {}", album));

        let drive = self.verify_settings(cursor)?;
        reporter.stage_passed(
            Stage::Settings,
            &format!("Verified rip settings ({})", drive.identifier),
        );

        check_accurate_rip(cursor)?;
        reporter.stage_passed(Stage::AccurateRip, "Verified AccurateRip data");

        check_statistics(cursor)?;
        reporter.stage_passed(Stage::Statistics, "Verified track statistics");

        Ok(())
    }
}

fn album_info(cursor: &mut LogCursor<'_>) -> Result<AlbumInfo, Rejection> {
    let line = cursor
        .advance_until(|l| l.contains(" / "))
        .ok_or(Rejection::InvalidAlbum)?;
    AlbumInfo::parse(line).ok_or(Rejection::InvalidAlbum)
}

fn check_accurate_rip(cursor: &mut LogCursor<'_>) -> Result<(), Rejection> {
    let line = cursor
        .advance_until(is_accurate_rip_result)
        .ok_or(truncated(Stage::AccurateRip, "accuraterip result"))?;
    debug!(line = cursor.line_number(), result = line.trim(), "accuraterip result");

    if line.contains("not") {
        return Err(Rejection::TrackNotAccurate);
    }

    Ok(())
}

/// Result lines start with a dash (`->All tracks accurately ripped`); table
/// rules made only of dashes do not count.
fn is_accurate_rip_result(line: &str) -> bool {
    let line = line.trim();
    line.starts_with('-') && !line.chars().all(|c| c == '-')
}

fn check_statistics(cursor: &mut LogCursor<'_>) -> Result<(), Rejection> {
    cursor
        .advance_until(|l| l.contains(STATISTICS))
        .ok_or(truncated(Stage::Statistics, "statistics section"))?;

    let read_errors = next_count(cursor, "read error count", Rejection::InvalidReadErrorCount)?;
    if read_errors > 0 {
        return Err(Rejection::ReadErrors(read_errors));
    }

    let line = cursor
        .advance_until(|l| l.contains(DAMAGED))
        .ok_or(truncated(Stage::Statistics, "damaged sector count"))?;
    let damaged = parse_count(line, Rejection::InvalidDamagedSectorCount)?;
    if damaged > 0 {
        return Err(Rejection::DamagedSectors(damaged));
    }

    Ok(())
}

fn next_count(
    cursor: &mut LogCursor<'_>,
    expected: &'static str,
    invalid: fn(String) -> Rejection,
) -> Result<u64, Rejection> {
    let line = cursor
        .advance()
        .ok_or(truncated(Stage::Statistics, expected))?;
    parse_count(line, invalid)
}

fn parse_count(line: &str, invalid: fn(String) -> Rejection) -> Result<u64, Rejection> {
    let value = field_value(line).unwrap_or_default();
    value.parse().map_err(|_| invalid(value.to_string()))
}

fn next_line<'a>(cursor: &mut LogCursor<'a>, expected: &'static str) -> Result<&'a str, Rejection> {
    cursor.advance().ok_or(truncated(Stage::Settings, expected))
}

fn truncated(stage: Stage, expected: &'static str) -> Rejection {
    Rejection::Truncated { stage, expected }
}
