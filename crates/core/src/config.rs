use crate::error::{Error, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Date format used by XLD version strings, e.g. `20100701`
pub const XLD_VERSION_FORMAT: &str = "%Y%m%d";

const DEFAULT_MINIMUM_XLD_VERSION: &str = "20100701";
const DEFAULT_MINIMUM_DRIVE_SCORE: i32 = 100;
const DEFAULT_MINIMUM_RETRIES: u32 = 10;
const DEFAULT_VIRTUAL_DRIVES: &[&str] = &["Generic DVD-ROM", "Generic DVD-ROM SCSI CdRom Device"];

/// Acceptance thresholds applied to every rip log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    /// Oldest XLD build accepted
    pub minimum_xld_version: NaiveDate,
    /// Drives resolving to a lower trust score are rejected
    pub minimum_drive_score: i32,
    /// Exact drive names that identify emulated drives
    pub virtual_drives: Vec<String>,
    pub minimum_retries: u32,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            minimum_xld_version: NaiveDate::parse_from_str(
                DEFAULT_MINIMUM_XLD_VERSION,
                XLD_VERSION_FORMAT,
            )
            .unwrap_or(NaiveDate::MIN),
            minimum_drive_score: DEFAULT_MINIMUM_DRIVE_SCORE,
            virtual_drives: DEFAULT_VIRTUAL_DRIVES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            minimum_retries: DEFAULT_MINIMUM_RETRIES,
        }
    }
}

impl Policy {
    pub fn is_virtual_drive(&self, name: &str) -> bool {
        self.virtual_drives.iter().any(|d| d == name)
    }
}

/// Complete checker configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub policy: Policy,
    /// Location of the reference drive list, if configured
    pub drive_database: Option<PathBuf>,
}

/// Raw TOML configuration structure. Every section is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    drive_database: Option<String>,
    #[serde(default)]
    xld: RawXld,
    #[serde(default)]
    drive: RawDrive,
    #[serde(default)]
    settings: RawSettings,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawXld {
    minimum_version: Option<String>, // Parse as NaiveDate
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDrive {
    minimum_score: Option<i32>,
    virtual_drives: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSettings {
    minimum_retries: Option<u32>,
}

/// Parse a configuration file. A relative `drive_database` path is resolved
/// against the directory holding the configuration file.
pub fn parse_config_toml<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let mut config = parse_config_toml_str(&content)?;

    if let Some(db) = config.drive_database.take() {
        config.drive_database = Some(match path.parent() {
            Some(dir) if db.is_relative() => dir.join(db),
            _ => db,
        });
    }

    Ok(config)
}

/// Parse configuration from a string (useful for testing)
pub fn parse_config_toml_str(content: &str) -> Result<Config> {
    let raw: RawConfig = toml::from_str(content)?;
    let defaults = Policy::default();

    let minimum_xld_version = match raw.xld.minimum_version {
        Some(version) => parse_xld_version(&version).ok_or_else(|| {
            Error::Config(format!(
                "Invalid xld.minimum_version '{}', expected YYYYMMDD",
                version
            ))
        })?,
        None => defaults.minimum_xld_version,
    };

    let drive_database = match raw.drive_database {
        Some(db) if db.trim().is_empty() => {
            return Err(Error::Config("Empty path in 'drive_database' field".to_string()));
        }
        Some(db) => Some(PathBuf::from(db)),
        None => None,
    };

    Ok(Config {
        policy: Policy {
            minimum_xld_version,
            minimum_drive_score: raw.drive.minimum_score.unwrap_or(defaults.minimum_drive_score),
            virtual_drives: raw.drive.virtual_drives.unwrap_or(defaults.virtual_drives),
            minimum_retries: raw.settings.minimum_retries.unwrap_or(defaults.minimum_retries),
        },
        drive_database,
    })
}

/// Parse an XLD version token (`YYYYMMDD`) into a date
pub fn parse_xld_version(token: &str) -> Option<NaiveDate> {
    // chrono accepts fewer than four year digits, XLD never prints them
    if token.len() != 8 || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(token, XLD_VERSION_FORMAT).ok()
}
