//! End-to-end tests for the `tendem-mcpb` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::Value;
use tempfile::TempDir;

const MANIFEST: &str = r#"{
  "manifest_version": "0.3",
  "name": "tendem-mcp",
  "version": "0.1.0",
  "description": "Delegate work to human experts",
  "tools": [],
  "user_config": {
    "tendem_api_key": {
      "type": "string",
      "sensitive": true,
      "required": true
    }
  },
  "compatibility": {
    "platforms": [
      "darwin",
      "linux"
    ]
  }
}
"#;

const TOOLS: &str = r#"{"tools": [
  {"name": "search_tasks", "description": "Search Tendem tasks."},
  {"name": "create_task", "description": "Create a new Tendem task for a human expert."}
]}"#;

/// Get a Command for the tendem-mcpb binary, isolated from the caller's env
fn mcpb_cmd(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("tendem-mcpb").expect("Failed to find tendem-mcpb binary");
    cmd.current_dir(dir)
        .env_remove("TENDEM_MCPB_MANIFEST")
        .env_remove("TENDEM_MCPB_CONFIG")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

/// A bundle layout with the default manifest location and a registry file
fn bundle() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("mcpb")).unwrap();
    fs::write(dir.path().join("mcpb/manifest.json"), MANIFEST).unwrap();
    fs::write(dir.path().join("tools.json"), TOOLS).unwrap();
    dir
}

fn manifest(dir: &TempDir) -> String {
    fs::read_to_string(dir.path().join("mcpb/manifest.json")).unwrap()
}

// ============================================================================
// sync
// ============================================================================

#[test]
fn test_help_lists_commands() {
    let dir = TempDir::new().unwrap();
    mcpb_cmd(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("sync"))
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("set-version"))
        .stdout(predicate::str::contains("client-config"));
}

#[test]
fn test_no_arguments_runs_sync() {
    let dir = bundle();

    mcpb_cmd(dir.path())
        .args(["--registry-file", "tools.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 2 tools"));

    let value: Value = serde_json::from_str(&manifest(&dir)).unwrap();
    assert_eq!(value["tools"][0]["name"], "search_tasks");
    assert_eq!(value["tools"][1]["name"], "create_task");
    assert_eq!(value["version"], "0.1.0");
}

#[test]
fn test_sync_twice_is_byte_identical() {
    let dir = bundle();

    mcpb_cmd(dir.path())
        .args(["sync", "--registry-file", "tools.json"])
        .assert()
        .success();
    let first = manifest(&dir);

    mcpb_cmd(dir.path())
        .args(["sync", "--registry-file", "tools.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already declares all 2 tools"));

    assert_eq!(manifest(&dir), first);
}

#[test]
fn test_sync_dry_run_leaves_file() {
    let dir = bundle();

    mcpb_cmd(dir.path())
        .args(["sync", "--dry-run", "--registry-file", "tools.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("add tool 'search_tasks'"))
        .stdout(predicate::str::contains("Would rewrite"));

    assert_eq!(manifest(&dir), MANIFEST);
}

#[test]
fn test_sync_json_report() {
    let dir = bundle();

    let output = mcpb_cmd(dir.path())
        .args(["sync", "--json", "--registry-file", "tools.json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["written"], true);
    assert_eq!(report["tools"], serde_json::json!(["search_tasks", "create_task"]));
    assert_eq!(report["changes"][0]["kind"], "added");
    assert!(report["checksum"].as_str().unwrap().starts_with("sha256:"));
}

#[test]
fn test_missing_manifest_fails_without_creating_it() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("tools.json"), TOOLS).unwrap();

    mcpb_cmd(dir.path())
        .args(["sync", "--registry-file", "tools.json"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error (manifest):"))
        .stderr(predicate::str::contains("manifest.json"));

    assert!(!dir.path().join("mcpb").exists());
}

#[test]
fn test_manifest_flag_overrides_default_location() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("custom.json"), MANIFEST).unwrap();
    fs::write(dir.path().join("tools.json"), TOOLS).unwrap();

    mcpb_cmd(dir.path())
        .args(["sync", "--manifest", "custom.json", "--registry-file", "tools.json"])
        .assert()
        .success();

    let value: Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("custom.json")).unwrap()).unwrap();
    assert_eq!(value["tools"].as_array().unwrap().len(), 2);
}

#[test]
fn test_unstartable_server_fails_and_leaves_manifest() {
    let dir = bundle();
    fs::write(
        dir.path().join("tendem-mcpb.toml"),
        "[server]\ncommand = \"tendem-mcp-command-that-does-not-exist\"\nargs = []\n",
    )
    .unwrap();

    mcpb_cmd(dir.path())
        .arg("sync")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error (discovery): failed to start MCP server"));

    assert_eq!(manifest(&dir), MANIFEST);
}

#[test]
fn test_invalid_registry_file_fails() {
    let dir = bundle();
    fs::write(dir.path().join("tools.json"), r#"{"tools": [{"description": "no name"}]}"#).unwrap();

    mcpb_cmd(dir.path())
        .args(["sync", "--registry-file", "tools.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid registry file"));

    assert_eq!(manifest(&dir), MANIFEST);
}

#[cfg(unix)]
#[test]
fn test_sync_from_stdio_server() {
    let dir = bundle();
    fs::write(
        dir.path().join("server.sh"),
        r#"read -r init
echo '{"jsonrpc":"2.0","id":1,"result":{"protocolVersion":"2024-11-05","capabilities":{"tools":{}},"serverInfo":{"name":"tendem-mcp","version":"1.0.0"}}}'
read -r initialized
read -r list
echo '{"jsonrpc":"2.0","id":2,"result":{"tools":[{"name":"list_tasks","description":"List all Tendem tasks."}]}}'
"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("tendem-mcpb.toml"),
        "[server]\ncommand = \"sh\"\nargs = [\"server.sh\"]\ncwd = \".\"\ntimeout_secs = 10\n",
    )
    .unwrap();

    mcpb_cmd(dir.path())
        .arg("sync")
        .assert()
        .success()
        .stdout(predicate::str::contains("MCP server 'sh server.sh'"));

    let value: Value = serde_json::from_str(&manifest(&dir)).unwrap();
    assert_eq!(
        value["tools"],
        serde_json::json!([{"name": "list_tasks", "description": "List all Tendem tasks."}])
    );
}

// ============================================================================
// check
// ============================================================================

#[test]
fn test_check_drift_exits_nonzero() {
    let dir = bundle();

    mcpb_cmd(dir.path())
        .args(["check", "--registry-file", "tools.json"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("DRIFTED"))
        .stdout(predicate::str::contains("+      \"name\": \"search_tasks\","))
        .stderr(predicate::str::contains("error: "))
        .stderr(predicate::str::contains("out of date"));

    assert_eq!(manifest(&dir), MANIFEST);
}

#[test]
fn test_check_passes_after_sync() {
    let dir = bundle();

    mcpb_cmd(dir.path())
        .args(["sync", "--registry-file", "tools.json"])
        .assert()
        .success();

    mcpb_cmd(dir.path())
        .args(["check", "--registry-file", "tools.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("match the registry"));
}

#[test]
fn test_check_json_reports_status() {
    let dir = bundle();

    let output = mcpb_cmd(dir.path())
        .args(["check", "--json", "--registry-file", "tools.json"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));

    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["status"], "drifted");
    assert_eq!(report["changes"].as_array().unwrap().len(), 2);
}

// ============================================================================
// set-version / list-tools / client-config
// ============================================================================

#[test]
fn test_set_version_from_tag() {
    let dir = bundle();

    mcpb_cmd(dir.path())
        .args(["set-version", "refs/tags/v2.3.1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1.0 -> 2.3.1"));

    assert_eq!(manifest(&dir), MANIFEST.replace("\"0.1.0\"", "\"2.3.1\""));
}

#[test]
fn test_set_version_same_version_reports_reformat() {
    let dir = bundle();
    let compact = serde_json::to_string(&serde_json::from_str::<Value>(MANIFEST).unwrap()).unwrap();
    fs::write(dir.path().join("mcpb/manifest.json"), &compact).unwrap();

    mcpb_cmd(dir.path())
        .args(["set-version", "v0.1.0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rewrote"))
        .stdout(predicate::str::contains("already at version").not());

    assert_eq!(manifest(&dir), MANIFEST);

    mcpb_cmd(dir.path())
        .args(["set-version", "v0.1.0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already at version 0.1.0"));
}

#[test]
fn test_set_version_rejects_bad_tag() {
    let dir = bundle();

    mcpb_cmd(dir.path())
        .args(["set-version", "latest"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid release tag 'latest'"));

    assert_eq!(manifest(&dir), MANIFEST);
}

#[test]
fn test_list_tools_json() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("tools.json"), TOOLS).unwrap();

    let output = mcpb_cmd(dir.path())
        .args(["list-tools", "--json", "--registry-file", "tools.json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let tools: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(tools[0]["name"], "search_tasks");
    assert_eq!(tools[1]["description"], "Create a new Tendem task for a human expert.");
}

#[test]
fn test_list_tools_table() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("tools.json"), TOOLS).unwrap();

    mcpb_cmd(dir.path())
        .args(["list-tools", "--registry-file", "tools.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("create_task"))
        .stdout(predicate::str::contains("2 tools registered"));
}

#[test]
fn test_client_config_vscode() {
    let dir = TempDir::new().unwrap();

    let output = mcpb_cmd(dir.path())
        .args(["client-config", "vscode", "--api-key", "sk-test"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let snippet: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        snippet,
        serde_json::json!({
            "servers": {
                "tendem": {
                    "type": "stdio",
                    "command": "uvx",
                    "args": ["tendem-mcp"],
                    "env": {"TENDEM_API_KEY": "sk-test"}
                }
            }
        })
    );
}

#[test]
fn test_client_config_unknown_client() {
    let dir = TempDir::new().unwrap();

    mcpb_cmd(dir.path())
        .args(["client-config", "notepad"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error (config): Unknown MCP client 'notepad'"));
}
