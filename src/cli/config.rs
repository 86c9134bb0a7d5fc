use std::fs;
use std::path::PathBuf;

/// CLI config directory, created on first use. Holds the persisted session.
pub fn get_config_dir() -> anyhow::Result<PathBuf> {
    let config_dir = resolve_config_dir(
        std::env::var("SALESSYNC_CONFIG_DIR").ok(),
        std::env::var("HOME").ok(),
    )?;

    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)?;
    }

    Ok(config_dir)
}

fn resolve_config_dir(custom_dir: Option<String>, home: Option<String>) -> anyhow::Result<PathBuf> {
    if let Some(custom_dir) = custom_dir.filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(custom_dir));
    }
    let home = home.ok_or_else(|| anyhow::anyhow!("HOME environment variable not set"))?;
    Ok(PathBuf::from(home).join(".config").join("salessync"))
}
