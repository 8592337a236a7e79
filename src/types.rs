//! Type definitions shared by the path, role-file and MCP handlers.
//!
//! JSON-facing types keep unknown fields in a flattened `extra` map so a
//! read-modify-write of `~/.claude.json` never drops settings this crate does
//! not model. `serde_json` is built with `preserve_order`, so key order survives too.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// How the drive letter of an already-native path (`c:\...`) is written back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DriveCase {
    /// Keep the letter exactly as given.
    #[default]
    Preserve,
    /// Uppercase it, matching what Git-Bash paths normalize to.
    Upper,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeOptions {
    pub native_drive_case: DriveCase,
}

/// Settings read from `.codeagent.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WrapperConfig {
    pub native_drive_case: DriveCase,
    pub role_directive: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mcp_config_path: Option<PathBuf>,
}

impl Default for WrapperConfig {
    fn default() -> Self {
        Self {
            native_drive_case: DriveCase::Preserve,
            role_directive: "ROLE_FILE:".to_string(),
            mcp_config_path: None,
        }
    }
}

impl WrapperConfig {
    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            native_drive_case: self.native_drive_case,
        }
    }
}

/// Result of expanding role file directives in a prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleInjection {
    pub prompt: String,
    /// Files whose contents replaced a directive, in prompt order.
    pub injected: Vec<PathBuf>,
    /// Raw directive paths that could not be read; their lines are left in place.
    pub unresolved: Vec<String>,
}

/// One MCP server entry under `mcpServers`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct McpServerConfig {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub server_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub startup_timeout_ms: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The subset of `~/.claude.json` this crate reads and rewrites.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClaudeCodeConfig {
    #[serde(rename = "mcpServers", skip_serializing_if = "Option::is_none")]
    pub mcp_servers: Option<Map<String, Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ClaudeCodeConfig {
    pub fn has_servers(&self) -> bool {
        self.mcp_servers.as_ref().is_some_and(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    Ok(String),
    Warning(String),
    Error(String),
}

impl Diagnostic {
    pub fn message(&self) -> &str {
        match self {
            Diagnostic::Ok(m) | Diagnostic::Warning(m) | Diagnostic::Error(m) => m,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Diagnostic::Error(_))
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let marker = match self {
            Diagnostic::Ok(_) => "✅",
            Diagnostic::Warning(_) => "⚠️ ",
            Diagnostic::Error(_) => "❌",
        };
        write!(f, "{} {}", marker, self.message())
    }
}

/// What `fix-mcp` did.
#[derive(Debug, Clone, PartialEq)]
pub enum FixOutcome {
    NotWindows,
    Missing,
    NoServers,
    Fixed(ClaudeCodeConfig),
}
