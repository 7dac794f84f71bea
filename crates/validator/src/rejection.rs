use std::fmt;
use thiserror::Error;

/// Pipeline stages, in the order they run
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Format,
    Version,
    Album,
    Settings,
    AccurateRip,
    Statistics,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Format => write!(f, "format"),
            Stage::Version => write!(f, "version"),
            Stage::Album => write!(f, "album"),
            Stage::Settings => write!(f, "settings"),
            Stage::AccurateRip => write!(f, "accuraterip"),
            Stage::Statistics => write!(f, "statistics"),
        }
    }
}

/// Broad category of a rejection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectionKind {
    /// The log does not have the expected shape
    Format,
    VersionPolicy,
    DriveTrust,
    SettingsPolicy,
    Integrity,
}

impl fmt::Display for RejectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionKind::Format => write!(f, "format error"),
            RejectionKind::VersionPolicy => write!(f, "version policy"),
            RejectionKind::DriveTrust => write!(f, "drive trust"),
            RejectionKind::SettingsPolicy => write!(f, "settings policy"),
            RejectionKind::Integrity => write!(f, "integrity"),
        }
    }
}

/// Why a rip log was not admitted. Every variant is final for that log.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("unrecognized rip log format")]
    UnrecognizedLog,
    #[error("{0} logs are not supported yet")]
    UnsupportedFormat(&'static str),

    #[error("invalid xld version header")]
    InvalidHeader,
    #[error("invalid xld version date '{0}'")]
    InvalidVersionDate(String),
    #[error("xld version is before cutoff ({found} < {minimum})")]
    VersionTooOld { found: String, minimum: String },

    #[error("invalid album information")]
    InvalidAlbum,

    #[error("log ended before {expected} ({stage} stage)")]
    Truncated { stage: Stage, expected: &'static str },
    #[error("malformed {field} line")]
    MalformedField { stage: Stage, field: &'static str },

    #[error("missing drive information")]
    MissingDrive,
    #[error("null drive information")]
    NullDrive,
    #[error("virtual drive detected: {0}")]
    VirtualDrive(String),
    #[error("drive score is too low: {identifier} has score {score}")]
    DriveScoreTooLow { identifier: String, score: i32 },

    #[error("media type must be pressed cd")]
    NotPressedCd,
    #[error("ripper mode must be secure")]
    InsecureRipper,
    #[error("disable audio cache must be ok or yes")]
    AudioCacheEnabled,
    #[error("must not make use of c2 pointers")]
    C2PointersUsed,
    #[error("invalid offset value '{0}'")]
    InvalidOffset(String),
    #[error("read offset is almost never zero")]
    ZeroOffset,
    #[error("read offset does not match drive data (log {found}, drive {expected})")]
    OffsetMismatch { found: i32, expected: i32 },
    #[error("no max retry information found")]
    MissingMaxRetries,
    #[error("max retries must be at least {minimum}")]
    TooFewRetries { minimum: u32 },

    #[error("at least one track was not accurately ripped")]
    TrackNotAccurate,
    #[error("invalid read error count '{0}'")]
    InvalidReadErrorCount(String),
    #[error("rip had at least one read error")]
    ReadErrors(u64),
    #[error("invalid damaged sector count '{0}'")]
    InvalidDamagedSectorCount(String),
    #[error("rip had at least one damaged sector")]
    DamagedSectors(u64),
}

impl Rejection {
    /// The stage that produced this rejection
    pub fn stage(&self) -> Stage {
        use Rejection::*;
        match self {
            UnrecognizedLog | UnsupportedFormat(_) => Stage::Format,
            InvalidHeader | InvalidVersionDate(_) | VersionTooOld { .. } => Stage::Version,
            InvalidAlbum => Stage::Album,
            Truncated { stage, .. } | MalformedField { stage, .. } => *stage,
            MissingDrive
            | NullDrive
            | VirtualDrive(_)
            | DriveScoreTooLow { .. }
            | NotPressedCd
            | InsecureRipper
            | AudioCacheEnabled
            | C2PointersUsed
            | InvalidOffset(_)
            | ZeroOffset
            | OffsetMismatch { .. }
            | MissingMaxRetries
            | TooFewRetries { .. } => Stage::Settings,
            TrackNotAccurate => Stage::AccurateRip,
            InvalidReadErrorCount(_)
            | ReadErrors(_)
            | InvalidDamagedSectorCount(_)
            | DamagedSectors(_) => Stage::Statistics,
        }
    }

    pub fn kind(&self) -> RejectionKind {
        use Rejection::*;
        match self {
            UnrecognizedLog
            | UnsupportedFormat(_)
            | InvalidHeader
            | InvalidVersionDate(_)
            | InvalidAlbum
            | Truncated { .. }
            | MalformedField { .. }
            | InvalidReadErrorCount(_)
            | InvalidDamagedSectorCount(_) => RejectionKind::Format,
            VersionTooOld { .. } => RejectionKind::VersionPolicy,
            MissingDrive | NullDrive | VirtualDrive(_) | DriveScoreTooLow { .. } => {
                RejectionKind::DriveTrust
            }
            NotPressedCd
            | InsecureRipper
            | AudioCacheEnabled
            | C2PointersUsed
            | InvalidOffset(_)
            | ZeroOffset
            | OffsetMismatch { .. }
            | MissingMaxRetries
            | TooFewRetries { .. } => RejectionKind::SettingsPolicy,
            TrackNotAccurate | ReadErrors(_) | DamagedSectors(_) => RejectionKind::Integrity,
        }
    }
}
