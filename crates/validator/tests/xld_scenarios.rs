//! End-to-end XLD log scenarios.
//!
//! Each test builds a complete XLD log from [`XldLog`], changes one field, and
//! checks which stage accepts or rejects it.
//!
//! ```sh
//! cargo test -p riplog-validator --test xld_scenarios
//! ```

use pretty_assertions::assert_eq;
use riplog_core::{DriveEntry, Policy};
use riplog_validator::{DriveDatabase, Rejection, RipperFormat, Stage, Validator};
use rstest::{fixture, rstest};

#[derive(Debug)]
struct XldLog {
    version: &'static str,
    album: &'static str,
    drive: &'static str,
    media: &'static str,
    ripper: &'static str,
    cache: &'static str,
    c2: &'static str,
    offset: &'static str,
    retries: &'static str,
    accurate_rip: &'static str,
    read_errors: &'static str,
    damaged: &'static str,
}

impl Default for XldLog {
    fn default() -> Self {
        Self {
            version: "20230101",
            album: "Pink Floyd / The Wall",
            drive: "PLEXTOR DVDR   PX-716A (revision 1.11)",
            media: "Pressed CD",
            ripper: "XLD Secure Ripper",
            cache: "OK",
            c2: "NO",
            offset: "30",
            retries: "16",
            accurate_rip: "->All tracks accurately ripped.",
            read_errors: "0",
            damaged: "0",
        }
    }
}

impl XldLog {
    fn render(&self) -> String {
        format!(
            "X Lossless Decoder version {version} (155.1)

XLD extraction logfile from 2023-01-05 20:11:32 +0100

{album}

Used drive  : {drive}
Media type  : {media}

Ripper mode             : {ripper}
Disable audio cache     : {cache}
Make use of C2 pointers : {c2}
Read offset correction  : {offset}
Max retry count         : {retries}
Gap status              : Analyzed, Appended

TOC of the extracted CD
     Track |   Start  |  Length  | Start sector | End sector
    ---------------------------------------------------------
        1  | 00:00:00 | 03:09:00 |         0    |    14174
        2  | 03:09:00 | 02:33:40 |     14175    |    25689

AccurateRip Summary (DiscID: 002b2a5c-0135f6d3-a10b3b0c)
    Track 01 : OK (A1+A2, v1+v2, confidence 12+8/23)
    Track 02 : OK (A1+A2, v1+v2, confidence 12+8/23)
        {accurate_rip}

All Tracks
    Album gain               : -7.32 dB
    Peak                     : 1.000000
    Statistics
        Read error                           : {read_errors}
        Jitter error (maybe fixed)           : 0
        Retry sector count                   : 0
        Damaged sector count                 : {damaged}

Track 01
    Filename : /Music/Pink Floyd/The Wall/01 In the Flesh.flac
    CRC32 hash               : 2E3C6BD1
    Statistics
        Read error                           : 0
        Damaged sector count                 : 0
",
            version = self.version,
            album = self.album,
            drive = self.drive,
            media = self.media,
            ripper = self.ripper,
            cache = self.cache,
            c2 = self.c2,
            offset = self.offset,
            retries = self.retries,
            accurate_rip = self.accurate_rip,
            read_errors = self.read_errors,
            damaged = self.damaged,
        )
    }
}

#[fixture]
fn drives() -> DriveDatabase {
    DriveDatabase::from_entries([
        DriveEntry::new("PLEXTOR DVDR   PX-716A", 30, 100),
        DriveEntry::new("HL-DT-ST DVDRAM GH22NS50", 667, 100),
        DriveEntry::new("ASUS DRW-24B1ST", 6, 99),
    ])
}

fn run(drives: &DriveDatabase, log: &XldLog) -> (Result<RipperFormat, Rejection>, Vec<Stage>) {
    let policy = Policy::default();
    let mut events: Vec<(Stage, String)> = Vec::new();
    let result = Validator::new(drives, &policy).validate(&log.render(), &mut events);
    (result, events.into_iter().map(|(stage, _)| stage).collect())
}

#[rstest]
fn accepts_clean_log(drives: DriveDatabase) {
    let policy = Policy::default();
    let mut events: Vec<(Stage, String)> = Vec::new();
    let result = Validator::new(&drives, &policy).validate(&XldLog::default().render(), &mut events);

    assert_eq!(result, Ok(RipperFormat::Xld));
    assert_eq!(
        events,
        vec![
            (Stage::Version, "Valid XLD version".to_string()),
            (Stage::Album, "Checking XLD log for Pink Floyd - The Wall".to_string()),
            (
                Stage::Settings,
                "Verified rip settings (plextor dvdr px-716a)".to_string()
            ),
            (Stage::AccurateRip, "Verified AccurateRip data".to_string()),
            (Stage::Statistics, "Verified track statistics".to_string()),
        ]
    );
}

#[rstest]
fn rejects_version_before_cutoff(drives: DriveDatabase) {
    let log = XldLog {
        version: "20090101",
        ..Default::default()
    };
    let (result, stages) = run(&drives, &log);

    let rejection = result.unwrap_err();
    assert_eq!(rejection.stage(), Stage::Version);
    assert!(rejection.to_string().contains("before cutoff"));
    assert!(stages.is_empty());
}

#[rstest]
fn rejects_virtual_drive_regardless_of_later_fields(drives: DriveDatabase) {
    let log = XldLog {
        drive: "Generic DVD-ROM",
        offset: "0",
        damaged: "12",
        ..Default::default()
    };
    let (result, stages) = run(&drives, &log);

    assert_eq!(result, Err(Rejection::VirtualDrive("Generic DVD-ROM".to_string())));
    assert_eq!(stages, vec![Stage::Version, Stage::Album]);
}

#[rstest]
fn rejects_zero_offset_even_when_drive_matches(drives: DriveDatabase) {
    let log = XldLog {
        offset: "0",
        ..Default::default()
    };
    assert_eq!(run(&drives, &log).0, Err(Rejection::ZeroOffset));
}

#[rstest]
fn accuraterip_failure_stops_before_statistics(drives: DriveDatabase) {
    let log = XldLog {
        accurate_rip: "- Track 3 was not accurately ripped",
        read_errors: "5",
        ..Default::default()
    };
    let (result, stages) = run(&drives, &log);

    assert_eq!(result, Err(Rejection::TrackNotAccurate));
    assert_eq!(stages.last(), Some(&Stage::Settings));
}

#[rstest]
#[case::exact_minimum("10", true)]
#[case::below_minimum("9", false)]
#[case::trailing_text("20 (retry)", true)]
#[case::negative("-1", false)]
#[case::not_a_number("lots", false)]
fn max_retries_boundary(drives: DriveDatabase, #[case] retries: &'static str, #[case] accepted: bool) {
    let log = XldLog {
        retries,
        ..Default::default()
    };
    let result = run(&drives, &log).0;

    if accepted {
        assert_eq!(result, Ok(RipperFormat::Xld));
    } else {
        assert_eq!(result, Err(Rejection::TooFewRetries { minimum: 10 }));
    }
}

#[rstest]
fn drive_score_boundary(drives: DriveDatabase) {
    let trusted = XldLog {
        drive: "HL-DT-ST DVDRAM GH22NS50",
        offset: "667",
        ..Default::default()
    };
    assert_eq!(run(&drives, &trusted).0, Ok(RipperFormat::Xld));

    let untrusted = XldLog {
        drive: "ASUS DRW-24B1ST",
        offset: "6",
        ..Default::default()
    };
    assert_eq!(
        run(&drives, &untrusted).0,
        Err(Rejection::DriveScoreTooLow {
            identifier: "asus drw-24b1st".to_string(),
            score: 99,
        })
    );
}

#[rstest]
#[case::empty_drive(XldLog { drive: "", offset: "6", ..Default::default() }, Rejection::MissingDrive)]
#[case::blank_drive(XldLog { drive: "   ", ..Default::default() }, Rejection::MissingDrive)]
#[case::null_drive(XldLog { drive: "(null)", ..Default::default() }, Rejection::NullDrive)]
#[case::cd_r(XldLog { media: "CD-Record", ..Default::default() }, Rejection::NotPressedCd)]
#[case::paranoia(XldLog { ripper: "CDParanoia III 10.2", ..Default::default() }, Rejection::InsecureRipper)]
#[case::cache_on(XldLog { cache: "NO", ..Default::default() }, Rejection::AudioCacheEnabled)]
#[case::c2_on(XldLog { c2: "YES", ..Default::default() }, Rejection::C2PointersUsed)]
#[case::bad_offset(XldLog { offset: "abc", ..Default::default() }, Rejection::InvalidOffset("abc".to_string()))]
#[case::offset_mismatch(
    XldLog { offset: "48", ..Default::default() },
    Rejection::OffsetMismatch { found: 48, expected: 30 }
)]
#[case::no_retries(XldLog { retries: "", ..Default::default() }, Rejection::MissingMaxRetries)]
#[case::empty_title(XldLog { album: "Pink Floyd / ", ..Default::default() }, Rejection::InvalidAlbum)]
#[case::read_errors(XldLog { read_errors: "2", ..Default::default() }, Rejection::ReadErrors(2))]
#[case::damaged(XldLog { damaged: "1", ..Default::default() }, Rejection::DamagedSectors(1))]
#[case::bad_date(
    XldLog { version: "2023011", ..Default::default() },
    Rejection::InvalidVersionDate("2023011".to_string())
)]
fn rejects_with_reason(drives: DriveDatabase, #[case] log: XldLog, #[case] expected: Rejection) {
    assert_eq!(run(&drives, &log).0, Err(expected));
}

#[rstest]
#[case::explicit_sign("+30")]
#[case::near_drive_name("PLEXTOR DVDR PX-716AL")]
fn tolerated_variations(drives: DriveDatabase, #[case] value: &'static str) {
    let log = if value.starts_with('+') {
        XldLog {
            offset: value,
            ..Default::default()
        }
    } else {
        XldLog {
            drive: value,
            ..Default::default()
        }
    };
    assert_eq!(run(&drives, &log).0, Ok(RipperFormat::Xld));
}

#[rstest]
fn crlf_log_is_accepted(drives: DriveDatabase) {
    let policy = Policy::default();
    let log = XldLog::default().render().replace('\n', "\r\n");
    let result = Validator::new(&drives, &policy).validate(&log, &mut ());
    assert_eq!(result, Ok(RipperFormat::Xld));
}

#[rstest]
fn truncated_log_names_missing_field(drives: DriveDatabase) {
    let policy = Policy::default();
    let full = XldLog::default().render();
    let cut = &full[..full.find("Media type").unwrap()];

    let result = Validator::new(&drives, &policy).validate(cut, &mut ());
    assert_eq!(
        result,
        Err(Rejection::Truncated {
            stage: Stage::Settings,
            expected: "media type",
        })
    );
}

#[test]
fn empty_database_rejects_on_score() {
    let drives = DriveDatabase::default();
    let (result, _) = run(&drives, &XldLog::default());
    assert_eq!(
        result,
        Err(Rejection::DriveScoreTooLow {
            identifier: String::new(),
            score: 0,
        })
    );
}
