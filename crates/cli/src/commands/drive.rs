use super::Sources;
use anyhow::Result;
use riplog_validator::normalize;

/// Print the normalized form of `name` and the reference drive it resolves to
pub fn run(name: String, sources: Sources) -> Result<()> {
    let (config, drives) = sources.load()?;

    println!("Drive name:  {}", name);
    println!("Normalized:  {}", normalize(&name));

    let Some(found) = drives.closest(&name) else {
        anyhow::bail!("Drive database is empty");
    };

    println!("Resolved to: {}", found.record.identifier);
    println!("  Offset:    {:+}", found.record.offset);
    println!("  Score:     {}", found.record.score);
    println!("  Distance:  {}", found.distance);

    if config.policy.is_virtual_drive(&name) {
        println!("⚠ Virtual drive, logs from it are always rejected");
    } else if found.record.score < config.policy.minimum_drive_score {
        println!(
            "⚠ Score below the accepted minimum of {}",
            config.policy.minimum_drive_score
        );
    }

    Ok(())
}
