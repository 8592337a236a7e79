//! Host platform detection and platform-specific command wrapping.

use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;

/// Launchers that must go through `cmd /c` on Windows to resolve their `.cmd` shims.
const WRAPPED_COMMANDS: &[&str] = &["npx", "uvx", "node", "npm", "pnpm", "yarn"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
    Other(String),
}

impl Platform {
    /// Platform this binary was compiled for.
    pub fn current() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    pub fn from_os(os: &str) -> Self {
        match os {
            "windows" | "win32" => Platform::Windows,
            "macos" | "darwin" => Platform::MacOs,
            "linux" => Platform::Linux,
            other => Platform::Other(other.to_string()),
        }
    }

    pub fn is_windows(&self) -> bool {
        matches!(self, Platform::Windows)
    }

    /// Human-readable platform name.
    pub fn name(&self) -> &str {
        match self {
            Platform::Windows => "Windows",
            Platform::MacOs => "macOS",
            Platform::Linux => "Linux",
            Platform::Other(os) => os,
        }
    }

    pub fn path_separator(&self) -> char {
        if self.is_windows() {
            '\\'
        } else {
            '/'
        }
    }

    /// Command line prefix for launching `command` as an MCP server.
    ///
    /// On Windows `npx` becomes `["cmd", "/c", "npx"]`; elsewhere it is `["npx"]`.
    pub fn mcp_command(&self, command: &str) -> Vec<String> {
        if self.is_windows() && needs_cmd_wrapper(command) {
            vec!["cmd".to_string(), "/c".to_string(), command.to_string()]
        } else {
            vec![command.to_string()]
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub fn needs_cmd_wrapper(command: &str) -> bool {
    WRAPPED_COMMANDS.contains(&command)
}

/// Home directory from `HOME`, falling back to `USERPROFILE`. Empty values are skipped.
pub fn home_dir() -> Option<PathBuf> {
    home_dir_from(|key| std::env::var_os(key))
}

fn home_dir_from(lookup: impl Fn(&str) -> Option<OsString>) -> Option<PathBuf> {
    ["HOME", "USERPROFILE"]
        .into_iter()
        .filter_map(lookup)
        .find(|v| !v.is_empty())
        .map(PathBuf::from)
}
