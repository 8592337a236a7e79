//! codeagent-wrapper CLI - path normalization, role file injection and MCP config repair.

use codeagent_wrapper::handlers::claude_code_config_path;
use codeagent_wrapper::handlers::mcp::has_unwrapped_commands;
use codeagent_wrapper::utils::home_dir;
use codeagent_wrapper::{
    load_wrapper_config, normalize_windows_path_with, to_git_bash_path, DriveCase, FixOutcome,
    McpConfigHandler, Platform, RoleFileInjector, WrapperConfig,
};
use std::env;
use std::path::{Path, PathBuf};

fn print_usage() {
    eprintln!("Usage: codeagent-wrapper <command> [options]");
    eprintln!("  normalize <path> [--upper-drive]  - Normalize a Git-Bash or Windows path");
    eprintln!("  git-bash <path>                   - Convert a Windows drive path to Git-Bash form");
    eprintln!("  inject-role <prompt-file>         - Expand ROLE_FILE directives and print the prompt");
    eprintln!("  diagnose-mcp [config]             - Check MCP servers in ~/.claude.json");
    eprintln!("  fix-mcp [config]                  - Wrap MCP launch commands for Windows");
    eprintln!("  platform                          - Show the detected platform");
}

fn mcp_config_path(arg: Option<&String>, config: &WrapperConfig) -> anyhow::Result<PathBuf> {
    if let Some(p) = arg {
        return Ok(PathBuf::from(p));
    }
    if let Some(p) = &config.mcp_config_path {
        return Ok(p.clone());
    }
    home_dir()
        .map(|home| claude_code_config_path(&home))
        .ok_or_else(|| anyhow::anyhow!("cannot locate home directory; pass the config path explicitly"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        print_usage();
        return Ok(());
    }

    let cwd = env::current_dir().unwrap_or_else(|_| Path::new(".").to_path_buf());
    let mut config = load_wrapper_config(&cwd).await;
    let platform = Platform::current();
    let command = args[1].as_str();

    match command {
        "normalize" => {
            let Some(path) = args.get(2) else {
                print_usage();
                return Ok(());
            };
            if args.iter().skip(3).any(|a| a == "--upper-drive") {
                config.native_drive_case = DriveCase::Upper;
            }
            println!("{}", normalize_windows_path_with(path, &config.normalize_options()));
        }
        "git-bash" => {
            let Some(path) = args.get(2) else {
                print_usage();
                return Ok(());
            };
            println!("{}", to_git_bash_path(path));
        }
        "inject-role" => {
            let Some(prompt_path) = args.get(2) else {
                print_usage();
                return Ok(());
            };
            let injector = RoleFileInjector::new(&config, platform)?;
            let result = injector.inject_file(Path::new(prompt_path)).await?;
            for raw in &result.unresolved {
                log::error!("Role file not found: {}", raw);
            }
            print!("{}", result.prompt);
        }
        "diagnose-mcp" => {
            let path = mcp_config_path(args.get(2), &config)?;
            let handler = McpConfigHandler::new(path);
            println!("MCP Configuration Diagnostics ({})", platform);
            for issue in handler.diagnose(&platform).await {
                println!("  {}", issue);
            }
            if platform.is_windows() {
                if let Ok(Some(current)) = handler.read().await {
                    if has_unwrapped_commands(&current) {
                        println!("  Tip: run `codeagent-wrapper fix-mcp` to wrap commands with cmd /c");
                    }
                }
            }
        }
        "fix-mcp" => {
            let path = mcp_config_path(args.get(2), &config)?;
            let handler = McpConfigHandler::new(path);
            if platform.is_windows() {
                let backup_dir = handler
                    .path()
                    .parent()
                    .unwrap_or(Path::new("."))
                    .join(".claude")
                    .join("backup");
                if let Some(backup) = handler.backup(&backup_dir).await? {
                    log::info!("Backed up MCP config to {}", backup.display());
                }
            }
            match handler.fix(&platform).await? {
                FixOutcome::NotWindows => println!("This command is only needed on Windows"),
                FixOutcome::Missing => println!("No {} found", handler.path().display()),
                FixOutcome::NoServers => println!("No MCP servers configured"),
                FixOutcome::Fixed(_) => println!("Windows MCP configuration fixed"),
            }
        }
        "platform" => {
            println!("{} (path separator {:?})", platform, platform.path_separator());
        }
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
        }
    }

    Ok(())
}
