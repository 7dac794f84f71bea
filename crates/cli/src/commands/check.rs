use super::Sources;
use anyhow::{Context, Result};
use riplog_validator::{ConsoleReporter, Validator};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const LOG_EXTENSION: &str = "log";
const MAX_SCAN_DEPTH: usize = 2; // Maximum directory depth when scanning for logs

/// Check every log under `paths` and fail if any is rejected
pub fn run(paths: Vec<PathBuf>, sources: Sources) -> Result<()> {
    let (config, drives) = sources.load()?;
    let validator = Validator::new(&drives, &config.policy);

    let logs = collect_logs(&paths)?;
    if logs.is_empty() {
        anyhow::bail!("No .log files found");
    }

    let mut rejected = 0;
    for log_path in &logs {
        println!("Checking: {}", log_path.display());

        let bytes =
            fs::read(log_path).with_context(|| format!("Failed to read {}", log_path.display()))?;
        let text = String::from_utf8_lossy(&bytes);

        match validator.validate(&text, &mut ConsoleReporter) {
            Ok(format) => println!("✅ Accepted ({})", format),
            Err(rejection) => {
                rejected += 1;
                println!(
                    "❌ Rejected at {} stage ({}): {}",
                    rejection.stage(),
                    rejection.kind(),
                    rejection
                );
            }
        }
        println!();
    }

    match (rejected, logs.len()) {
        (0, _) => Ok(()),
        (_, 1) => anyhow::bail!("Log rejected"),
        (n, total) => anyhow::bail!("{} of {} logs rejected", n, total),
    }
}

/// Expand directories into the `.log` files they contain, sorted per directory
fn collect_logs(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut logs = Vec::new();

    for path in paths {
        if !path.exists() {
            anyhow::bail!("Path does not exist: {}", path.display());
        }

        if path.is_file() {
            logs.push(path.clone());
            continue;
        }

        let mut found: Vec<PathBuf> = WalkDir::new(path)
            .max_depth(MAX_SCAN_DEPTH)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file() && is_log_file(e.path()))
            .map(|e| e.into_path())
            .collect();
        found.sort();
        logs.extend(found);
    }

    Ok(logs)
}

fn is_log_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(LOG_EXTENSION))
}
