//! Snapshot cache and config file commands.

use liner_notes::config::{self, Config};
use liner_notes::source::SnapshotCache;

/// Remove every page snapshot
pub fn cmd_clear_cache(cache: &SnapshotCache) -> anyhow::Result<()> {
    cache.clear()?;
    println!("Cleared snapshots in {}", cache.dir().display());
    Ok(())
}

/// Show the config file location and the effective settings, optionally
/// saving them
pub fn cmd_config(config: &Config, save: bool) -> anyhow::Result<()> {
    match config::config_path() {
        Some(path) => println!("# {}", path.display()),
        None => println!("# (no config directory on this system)"),
    }
    println!("{}", toml::to_string_pretty(config)?);

    if save {
        let path = config::save(config)?;
        println!("Saved to {}", path.display());
    }
    Ok(())
}
