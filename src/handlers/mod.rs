pub mod mcp;
pub mod role_file;

pub use mcp::{
    apply_platform_command, apply_platform_command_value, build_mcp_server_config,
    claude_code_config_path, fix_windows_mcp_config, merge_mcp_servers, McpConfigHandler,
};
pub use role_file::{resolve_role_path, RoleFileInjector};
