pub mod config;
pub mod drives;
pub mod error;
pub mod types;

pub use config::{Config, Policy, parse_config_toml};
pub use drives::load_drive_database;
pub use error::{Error, Result};
pub use types::*;
