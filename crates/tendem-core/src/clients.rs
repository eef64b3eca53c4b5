//! MCP client configuration snippets
//!
//! End users who do not install the `.mcpb` bundle register the published
//! server with their client by hand. Each client nests stdio servers under
//! its own key, and some require an explicit `"type": "stdio"`.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde_json::{Map, Value, json};

use crate::error::Error;

/// Key the server is registered under in every snippet.
pub const SERVER_NAME: &str = "tendem";

/// Environment variable the server reads its API key from.
pub const API_KEY_ENV: &str = "TENDEM_API_KEY";

/// Placeholder shown when no key is supplied.
pub const API_KEY_PLACEHOLDER: &str = "<your-tendem-api-key>";

/// MCP clients with a known config format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum McpClient {
    ClaudeDesktop,
    ClaudeCode,
    Cursor,
    Windsurf,
    VsCode,
    Zed,
    Gemini,
}

impl McpClient {
    pub const ALL: &'static [McpClient] = &[
        Self::ClaudeDesktop,
        Self::ClaudeCode,
        Self::Cursor,
        Self::Windsurf,
        Self::VsCode,
        Self::Zed,
        Self::Gemini,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            Self::ClaudeDesktop => "claude-desktop",
            Self::ClaudeCode => "claude-code",
            Self::Cursor => "cursor",
            Self::Windsurf => "windsurf",
            Self::VsCode => "vscode",
            Self::Zed => "zed",
            Self::Gemini => "gemini",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::ClaudeDesktop => "Claude Desktop",
            Self::ClaudeCode => "Claude Code",
            Self::Cursor => "Cursor",
            Self::Windsurf => "Windsurf",
            Self::VsCode => "VS Code",
            Self::Zed => "Zed",
            Self::Gemini => "Gemini CLI",
        }
    }

    /// Top-level key holding server entries.
    pub fn servers_key(self) -> &'static str {
        match self {
            Self::VsCode => "servers",
            Self::Zed => "context_servers",
            _ => "mcpServers",
        }
    }

    fn requires_type_field(self) -> bool {
        matches!(self, Self::ClaudeCode | Self::VsCode)
    }

    /// Where the snippet goes.
    pub fn config_location(self) -> &'static str {
        match self {
            Self::ClaudeDesktop => {
                "claude_desktop_config.json (Settings > Developer > Edit Config)"
            }
            Self::ClaudeCode => ".mcp.json in the project root",
            Self::Cursor => ".cursor/mcp.json or ~/.cursor/mcp.json",
            Self::Windsurf => "~/.codeium/windsurf/mcp_config.json",
            Self::VsCode => ".vscode/mcp.json",
            Self::Zed => "Zed settings.json",
            Self::Gemini => ".gemini/settings.json or ~/.gemini/settings.json",
        }
    }
}

impl std::fmt::Display for McpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for McpClient {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.slug() == wanted)
            .ok_or_else(|| Error::UnknownClient {
                name: s.to_string(),
                expected: Self::ALL
                    .iter()
                    .map(|c| c.slug())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

/// How the client should launch the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerLaunch {
    pub command: String,
    pub args: Vec<String>,
    pub env: BTreeMap<String, String>,
}

impl ServerLaunch {
    /// `uvx tendem-mcp` with the API key in the environment.
    pub fn published(api_key: Option<&str>) -> Self {
        Self {
            command: "uvx".into(),
            args: vec!["tendem-mcp".into()],
            env: BTreeMap::from([(
                API_KEY_ENV.to_string(),
                api_key.unwrap_or(API_KEY_PLACEHOLDER).to_string(),
            )]),
        }
    }
}

/// Build the JSON fragment registering the server with `client`.
pub fn client_config(client: McpClient, launch: &ServerLaunch) -> Value {
    let mut entry = Map::new();
    if client.requires_type_field() {
        entry.insert("type".into(), json!("stdio"));
    }
    entry.insert("command".into(), json!(launch.command));
    entry.insert("args".into(), json!(launch.args));
    if !launch.env.is_empty() {
        entry.insert("env".into(), json!(launch.env));
    }

    let mut servers = Map::new();
    servers.insert(SERVER_NAME.into(), Value::Object(entry));
    let mut root = Map::new();
    root.insert(client.servers_key().into(), Value::Object(servers));
    Value::Object(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("claude-desktop", McpClient::ClaudeDesktop)]
    #[case("Claude_Code", McpClient::ClaudeCode)]
    #[case(" vscode ", McpClient::VsCode)]
    #[case("zed", McpClient::Zed)]
    fn parses_client_names(#[case] input: &str, #[case] expected: McpClient) {
        assert_eq!(input.parse::<McpClient>().unwrap(), expected);
    }

    #[test]
    fn unknown_client_lists_options() {
        let err = "emacs".parse::<McpClient>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("'emacs'"));
        assert!(msg.contains("claude-desktop, claude-code"));
    }

    #[test]
    fn claude_desktop_snippet() {
        let value = client_config(McpClient::ClaudeDesktop, &ServerLaunch::published(Some("sk-123")));
        assert_eq!(
            value,
            json!({
                "mcpServers": {
                    "tendem": {
                        "command": "uvx",
                        "args": ["tendem-mcp"],
                        "env": {"TENDEM_API_KEY": "sk-123"}
                    }
                }
            })
        );
    }

    #[test]
    fn vscode_snippet_has_type_and_servers_key() {
        let value = client_config(McpClient::VsCode, &ServerLaunch::published(None));
        let entry = &value["servers"]["tendem"];
        assert_eq!(entry["type"], "stdio");
        assert_eq!(entry["env"]["TENDEM_API_KEY"], API_KEY_PLACEHOLDER);
    }

    #[test]
    fn zed_uses_context_servers() {
        let value = client_config(McpClient::Zed, &ServerLaunch::published(None));
        assert!(value.get("context_servers").is_some());
        assert!(value["context_servers"]["tendem"].get("type").is_none());
    }

    #[test]
    fn every_client_round_trips_through_its_slug() {
        for client in McpClient::ALL {
            assert_eq!(client.slug().parse::<McpClient>().unwrap(), *client);
        }
    }
}
