pub mod check;
pub mod drive;

use anyhow::{Context, Result};
use clap::Args;
use riplog_core::{Config, load_drive_database, parse_config_toml};
use riplog_validator::DriveDatabase;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where the policy and the reference drive list come from
#[derive(Debug, Clone, Args)]
pub struct Sources {
    /// Policy file (defaults to ~/.riplog/config.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Reference drive list (JSON), overrides `drive_database` from the config
    #[arg(short, long)]
    pub drives: Option<PathBuf>,
}

impl Sources {
    pub fn load(&self) -> Result<(Config, DriveDatabase)> {
        let config = self.load_config()?;

        let db_path = self
            .drives
            .clone()
            .or_else(|| config.drive_database.clone())
            .context("No drive database configured; pass --drives or set drive_database in the config")?;

        let entries = load_drive_database(&db_path)
            .with_context(|| format!("Failed to load drive database {}", db_path.display()))?;
        let drives = DriveDatabase::from_entries(entries);
        debug!(path = %db_path.display(), drives = drives.len(), "loaded drive database");

        Ok((config, drives))
    }

    fn load_config(&self) -> Result<Config> {
        if let Some(path) = &self.config {
            return read_config(path);
        }

        match default_config_path() {
            Some(path) if path.exists() => read_config(&path),
            _ => Ok(Config::default()),
        }
    }
}

fn read_config(path: &Path) -> Result<Config> {
    debug!(path = %path.display(), "loading config");
    parse_config_toml(path).with_context(|| format!("Failed to parse config {}", path.display()))
}

/// `~/.riplog/config.toml`
fn default_config_path() -> Option<PathBuf> {
    let home = std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE"))?;
    Some(PathBuf::from(home).join(".riplog").join("config.toml"))
}
