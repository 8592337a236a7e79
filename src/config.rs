//! Wrapper settings stored as `.codeagent.json` in a project directory.

use std::path::Path;

use anyhow::Context;

use crate::types::WrapperConfig;

pub const CONFIG_FILE_NAME: &str = ".codeagent.json";

/// Load settings from `dir`. A missing or malformed file yields the defaults.
pub async fn load_wrapper_config(dir_path: &Path) -> WrapperConfig {
    let path = dir_path.join(CONFIG_FILE_NAME);
    let content = match tokio::fs::read_to_string(&path).await {
        Ok(c) => c,
        Err(_) => return WrapperConfig::default(),
    };
    match serde_json::from_str(&content) {
        Ok(cfg) => cfg,
        Err(err) => {
            log::warn!(
                "Ignoring malformed {}: {}. Using defaults.",
                path.display(),
                err
            );
            WrapperConfig::default()
        }
    }
}

pub async fn save_wrapper_config(dir_path: &Path, config: &WrapperConfig) -> anyhow::Result<()> {
    let path = dir_path.join(CONFIG_FILE_NAME);
    let content = serde_json::to_string_pretty(config)?;
    tokio::fs::write(&path, content)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
