//! codeagent-wrapper - normalize Git-Bash and Windows paths, inject role files into prompts,
//! and repair MCP server launch commands for Windows.

pub mod config;
pub mod handlers;
pub mod types;
pub mod utils;

pub use config::{load_wrapper_config, save_wrapper_config, CONFIG_FILE_NAME};
pub use handlers::{McpConfigHandler, RoleFileInjector};
pub use types::{
    ClaudeCodeConfig, Diagnostic, DriveCase, FixOutcome, McpServerConfig, NormalizeOptions,
    RoleInjection, WrapperConfig,
};
pub use utils::{normalize_windows_path, normalize_windows_path_with, to_git_bash_path, Platform};
