//! Integration test: diagnose and fix a Claude Code config file on disk.

use codeagent_wrapper::{Diagnostic, FixOutcome, McpConfigHandler, Platform};
use serde_json::{json, Value};

fn write_config(dir: &std::path::Path, value: &Value) -> std::path::PathBuf {
    let path = dir.join(".claude.json");
    std::fs::write(&path, serde_json::to_string_pretty(value).unwrap()).expect("write config");
    path
}

fn sample() -> Value {
    json!({
        "installMethod": "npm-global",
        "mcpServers": {
            "ace-tool": { "type": "stdio", "command": "npx", "args": ["-y", "ace-tool"] },
            "docs": { "type": "sse", "url": "https://docs.test/sse" }
        }
    })
}

#[tokio::test]
async fn diagnose_reports_missing_and_empty_configs() {
    let _ = env_logger::try_init();
    let temp_dir = tempfile::tempdir().expect("temp dir");

    let missing = McpConfigHandler::new(temp_dir.path().join(".claude.json"));
    let issues = missing.diagnose(&Platform::Windows).await;
    assert_eq!(issues.len(), 1);
    assert!(issues[0].is_error());
    assert!(issues[0].message().ends_with("does not exist"));

    let broken_path = temp_dir.path().join("broken.json");
    std::fs::write(&broken_path, "{").expect("write broken");
    let broken = McpConfigHandler::new(&broken_path);
    assert!(broken.read().await.is_err());
    assert!(broken.diagnose(&Platform::Linux).await[0]
        .message()
        .starts_with("Failed to parse"));

    let empty = McpConfigHandler::new(write_config(temp_dir.path(), &json!({ "mcpServers": {} })));
    assert_eq!(
        empty.diagnose(&Platform::Windows).await,
        vec![Diagnostic::Warning("No MCP servers configured".to_string())]
    );
}

#[tokio::test]
async fn diagnose_flags_unwrapped_commands_on_windows_only() {
    let _ = env_logger::try_init();
    let temp_dir = tempfile::tempdir().expect("temp dir");
    let handler = McpConfigHandler::new(write_config(temp_dir.path(), &sample()));

    let windows = handler.diagnose(&Platform::Windows).await;
    assert_eq!(
        windows,
        vec![Diagnostic::Error(
            "ace-tool: Command not properly wrapped for Windows (should use cmd /c)".to_string()
        )]
    );

    let linux = handler.diagnose(&Platform::Linux).await;
    assert_eq!(
        linux,
        vec![Diagnostic::Ok("MCP configuration looks good".to_string())]
    );
}

#[tokio::test]
async fn fix_rewrites_file_and_preserves_other_settings() {
    let _ = env_logger::try_init();
    let temp_dir = tempfile::tempdir().expect("temp dir");
    let path = write_config(temp_dir.path(), &sample());
    let handler = McpConfigHandler::new(&path);

    assert_eq!(
        handler.fix(&Platform::Linux).await.expect("fix on linux"),
        FixOutcome::NotWindows
    );

    let outcome = handler.fix(&Platform::Windows).await.expect("fix on windows");
    assert!(matches!(outcome, FixOutcome::Fixed(_)));

    let written: Value =
        serde_json::from_str(&std::fs::read_to_string(&path).expect("read back")).expect("json");
    assert_eq!(written["installMethod"], json!("npm-global"));
    assert_eq!(written["mcpServers"]["ace-tool"]["command"], json!("cmd"));
    assert_eq!(
        written["mcpServers"]["ace-tool"]["args"],
        json!(["/c", "npx", "-y", "ace-tool"])
    );
    assert_eq!(written["mcpServers"]["docs"], sample()["mcpServers"]["docs"]);

    assert_eq!(
        handler.diagnose(&Platform::Windows).await,
        vec![Diagnostic::Ok("MCP configuration looks good".to_string())]
    );
}

#[tokio::test]
async fn fix_handles_missing_file_and_no_servers() {
    let _ = env_logger::try_init();
    let temp_dir = tempfile::tempdir().expect("temp dir");

    let missing = McpConfigHandler::new(temp_dir.path().join("none.json"));
    assert_eq!(
        missing.fix(&Platform::Windows).await.expect("fix missing"),
        FixOutcome::Missing
    );

    let bare = McpConfigHandler::new(write_config(temp_dir.path(), &json!({ "env": {} })));
    assert_eq!(
        bare.fix(&Platform::Windows).await.expect("fix bare"),
        FixOutcome::NoServers
    );
}

#[tokio::test]
async fn backup_copies_config_with_timestamped_name() {
    let _ = env_logger::try_init();
    let temp_dir = tempfile::tempdir().expect("temp dir");
    let path = write_config(temp_dir.path(), &sample());
    let handler = McpConfigHandler::new(&path);
    let backup_dir = temp_dir.path().join(".claude").join("backup");

    let backup = handler
        .backup(&backup_dir)
        .await
        .expect("backup")
        .expect("backup path");
    let name = backup.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("claude-config-"));
    assert!(name.ends_with("Z.json"));
    assert!(!name.contains(':'));
    assert_eq!(
        std::fs::read_to_string(&backup).unwrap(),
        std::fs::read_to_string(&path).unwrap()
    );

    let missing = McpConfigHandler::new(temp_dir.path().join("absent.json"));
    assert!(missing.backup(&backup_dir).await.expect("backup missing").is_none());
}

#[tokio::test]
async fn fix_wraps_server_with_float_timeout() {
    let _ = env_logger::try_init();
    let temp_dir = tempfile::tempdir().expect("temp dir");
    let path = write_config(
        temp_dir.path(),
        &json!({
            "mcpServers": {
                "b": { "type": "stdio", "command": "npx", "startup_timeout_ms": 30000.0 }
            }
        }),
    );
    let handler = McpConfigHandler::new(&path);

    let outcome = handler.fix(&Platform::Windows).await.expect("fix on windows");
    assert!(matches!(outcome, FixOutcome::Fixed(_)));

    let written: Value =
        serde_json::from_str(&std::fs::read_to_string(&path).expect("read back")).expect("json");
    assert_eq!(written["mcpServers"]["b"]["command"], json!("cmd"));
    assert_eq!(written["mcpServers"]["b"]["args"], json!(["/c", "npx"]));
    assert_eq!(written["mcpServers"]["b"]["startup_timeout_ms"], json!(30000.0));
    assert_eq!(
        handler.diagnose(&Platform::Windows).await,
        vec![Diagnostic::Ok("MCP configuration looks good".to_string())]
    );
}
