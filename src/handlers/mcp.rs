//! Read, diagnose and repair the MCP server section of Claude Code's `~/.claude.json`.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde_json::{Map, Value};
use tokio::fs;

use crate::types::{ClaudeCodeConfig, Diagnostic, FixOutcome, McpServerConfig};
use crate::utils::platform::needs_cmd_wrapper;
use crate::utils::Platform;

/// Commands `diagnose` flags when they are launched directly on Windows.
const DIAGNOSED_COMMANDS: &[&str] = &["npx", "uvx", "node"];

pub const DEFAULT_API_KEY_PLACEHOLDER: &str = "YOUR_API_KEY";

/// Wrap the server's command in `cmd /c` when the platform needs it.
/// SSE servers have no command and are left alone.
pub fn apply_platform_command(server: &mut McpServerConfig, platform: &Platform) {
    let Some(command) = server.command.as_deref() else {
        return;
    };
    let mut wrapped = platform.mcp_command(command);
    if wrapped.first().map(String::as_str) != Some("cmd") {
        return;
    }
    let original_args = server.args.take().unwrap_or_default();
    let program = wrapped.remove(0);
    wrapped.extend(original_args);
    server.command = Some(program);
    server.args = Some(wrapped);
}

/// Copy `base`, apply the platform wrapper, and inject `api_key` if one is given.
///
/// The key goes into `env[env_var_name]` when both exist; otherwise `placeholder`
/// is replaced in the args and in the url.
pub fn build_mcp_server_config(
    base: &McpServerConfig,
    api_key: Option<&str>,
    placeholder: &str,
    env_var_name: Option<&str>,
    platform: &Platform,
) -> McpServerConfig {
    let mut config = base.clone();
    apply_platform_command(&mut config, platform);

    let Some(api_key) = api_key.filter(|k| !k.is_empty()) else {
        return config;
    };

    if let (Some(var), Some(env)) = (env_var_name, config.env.as_mut()) {
        env.insert(var.to_string(), Value::String(api_key.to_string()));
        return config;
    }

    if let Some(args) = config.args.as_mut() {
        for arg in args.iter_mut() {
            *arg = arg.replacen(placeholder, api_key, 1);
        }
    }
    if let Some(url) = config.url.as_mut() {
        *url = url.replacen(placeholder, api_key, 1);
    }
    config
}

/// Wrap a raw server entry in place. Other keys are left untouched and keep their position.
/// Returns false when the entry was not changed.
pub fn apply_platform_command_value(server: &mut Value, platform: &Platform) -> bool {
    let Some(obj) = server.as_object_mut() else {
        return false;
    };
    let Some(command) = obj.get("command").and_then(Value::as_str) else {
        return false;
    };
    let mut wrapped = platform.mcp_command(command);
    if wrapped.first().map(String::as_str) != Some("cmd") {
        return false;
    }

    let original_args = match obj.get("args") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(args)) => args.clone(),
        Some(other) => {
            log::warn!("Not wrapping {}: args is not an array ({})", command, other);
            return false;
        }
    };
    let program = wrapped.remove(0);
    let mut args: Vec<Value> = wrapped.into_iter().map(Value::String).collect();
    args.extend(original_args);
    obj.insert("command".to_string(), Value::String(program));
    obj.insert("args".to_string(), Value::Array(args));
    true
}

/// Apply the Windows command wrapper to every server that launches a command.
pub fn fix_windows_mcp_config(config: &ClaudeCodeConfig, platform: &Platform) -> ClaudeCodeConfig {
    let mut fixed = config.clone();
    if !platform.is_windows() {
        return fixed;
    }
    let Some(servers) = fixed.mcp_servers.as_mut() else {
        return fixed;
    };

    for (name, value) in servers.iter_mut() {
        if apply_platform_command_value(value, platform) {
            log::debug!("Wrapped MCP server {} with cmd /c", name);
        }
    }
    fixed
}

/// Merge `new_servers` into `existing`; same-named servers are replaced.
pub fn merge_mcp_servers(
    existing: Option<ClaudeCodeConfig>,
    new_servers: Map<String, Value>,
) -> ClaudeCodeConfig {
    let mut config = existing.unwrap_or_default();
    let servers = config.mcp_servers.get_or_insert_with(Map::new);
    for (name, server) in new_servers {
        servers.insert(name, server);
    }
    config
}

/// Default location of Claude Code's config: `<home>/.claude.json`.
pub fn claude_code_config_path(home: &Path) -> PathBuf {
    home.join(".claude.json")
}

pub struct McpConfigHandler {
    path: PathBuf,
}

impl McpConfigHandler {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `Ok(None)` when the file does not exist; an error when it cannot be parsed.
    pub async fn read(&self) -> anyhow::Result<Option<ClaudeCodeConfig>> {
        if !fs::try_exists(&self.path).await.unwrap_or(false) {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse {}", self.path.display()))?;
        Ok(Some(config))
    }

    pub async fn write(&self, config: &ClaudeCodeConfig) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(config)?;
        fs::write(&self.path, content)
            .await
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        Ok(())
    }

    /// Copy the config into `backup_dir`. Returns the backup path, or `None` if there is nothing to back up.
    pub async fn backup(&self, backup_dir: &Path) -> anyhow::Result<Option<PathBuf>> {
        if !fs::try_exists(&self.path).await.unwrap_or(false) {
            return Ok(None);
        }
        fs::create_dir_all(backup_dir)
            .await
            .with_context(|| format!("failed to create {}", backup_dir.display()))?;

        let timestamp = chrono::Utc::now()
            .format("%Y-%m-%dT%H:%M:%S%.3fZ")
            .to_string()
            .replace([':', '.'], "-");
        let backup_path = backup_dir.join(format!("claude-config-{}.json", timestamp));
        fs::copy(&self.path, &backup_path)
            .await
            .with_context(|| format!("failed to back up {}", self.path.display()))?;
        log::debug!("Backed up {} to {}", self.path.display(), backup_path.display());
        Ok(Some(backup_path))
    }

    pub async fn diagnose(&self, platform: &Platform) -> Vec<Diagnostic> {
        let name = self.path.display();
        let config = match self.read().await {
            Ok(Some(c)) => c,
            Ok(None) => return vec![Diagnostic::Error(format!("{} does not exist", name))],
            Err(err) => {
                log::debug!("{:#}", err);
                return vec![Diagnostic::Error(format!("Failed to parse {}", name))];
            }
        };

        let servers = match config.mcp_servers.as_ref() {
            Some(s) if !s.is_empty() => s,
            _ => return vec![Diagnostic::Warning("No MCP servers configured".to_string())],
        };

        let mut issues = Vec::new();
        if platform.is_windows() {
            for (server_name, server) in servers {
                let command = server.get("command").and_then(Value::as_str);
                if command.is_some_and(|c| DIAGNOSED_COMMANDS.contains(&c)) {
                    issues.push(Diagnostic::Error(format!(
                        "{}: Command not properly wrapped for Windows (should use cmd /c)",
                        server_name
                    )));
                }
            }
        }

        if issues.is_empty() {
            issues.push(Diagnostic::Ok("MCP configuration looks good".to_string()));
        }
        issues
    }

    /// Rewrite the config with Windows command wrappers applied.
    pub async fn fix(&self, platform: &Platform) -> anyhow::Result<FixOutcome> {
        if !platform.is_windows() {
            return Ok(FixOutcome::NotWindows);
        }
        let Some(config) = self.read().await? else {
            return Ok(FixOutcome::Missing);
        };
        if !config.has_servers() {
            return Ok(FixOutcome::NoServers);
        }
        let fixed = fix_windows_mcp_config(&config, platform);
        self.write(&fixed).await?;
        Ok(FixOutcome::Fixed(fixed))
    }
}

/// True if any server still launches a wrapped command directly.
pub fn has_unwrapped_commands(config: &ClaudeCodeConfig) -> bool {
    config.mcp_servers.iter().flatten().any(|(_, server)| {
        server
            .get("command")
            .and_then(Value::as_str)
            .is_some_and(needs_cmd_wrapper)
    })
}
