use std::fmt;

/// A reference drive with known-good calibration data.
///
/// `identifier` is always the normalized form of the drive's display name, so
/// it can be compared directly against a normalized name read from a log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DriveRecord {
    pub identifier: String,
    /// Read offset correction in sample frames
    pub offset: i32,
    /// Community trust rating
    pub score: i32,
}

impl fmt::Display for DriveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (offset {:+}, score {})",
            self.identifier, self.offset, self.score
        )
    }
}

/// A raw drive entry as published in the drive offset list, before its name
/// has been normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriveEntry {
    pub name: String,
    pub offset: i32,
    pub score: i32,
}

impl DriveEntry {
    pub fn new(name: impl Into<String>, offset: i32, score: i32) -> Self {
        Self {
            name: name.into(),
            offset,
            score,
        }
    }
}

/// Artist and title of the ripped disc, as printed in the log header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumInfo {
    pub artist: String,
    pub title: String,
}

impl AlbumInfo {
    /// Parse an `Artist / Title` line. Returns `None` if either side is empty.
    pub fn parse(line: &str) -> Option<Self> {
        let (artist, title) = line.split_once(" / ")?;
        let (artist, title) = (artist.trim(), title.trim());
        if artist.is_empty() || title.is_empty() {
            return None;
        }

        Some(Self {
            artist: artist.to_string(),
            title: title.to_string(),
        })
    }
}

impl fmt::Display for AlbumInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.artist, self.title)
    }
}
