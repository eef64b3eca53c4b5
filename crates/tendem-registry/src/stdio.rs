//! Tool discovery over stdio
//!
//! Spawns the server, performs the MCP handshake, pages through `tools/list`
//! and shuts the child down. Stdout carries the protocol; stderr is drained
//! in the background and attached to errors when the server dies early.

use std::collections::{BTreeMap, HashSet, VecDeque};
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tendem_manifest::ToolEntry;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWriteExt, BufReader, Lines};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tokio::task::JoinHandle;

use crate::error::{Error, Result};
use crate::protocol::{
    InitializeParams, InitializeResult, JsonRpcMessage, JsonRpcRequest, JsonRpcResponse,
    ListToolsResult, METHOD_NOT_FOUND,
};
use crate::registry::{ToolRegistry, validate_tools};

/// Default command used to run the published server.
pub const DEFAULT_COMMAND: &str = "uvx";

/// Default arguments used to run the published server.
pub const DEFAULT_ARGS: &[&str] = &["tendem-mcp"];

/// Default bound on the whole discovery, including package download.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Lines of stderr kept for error messages.
const STDERR_TAIL_LINES: usize = 20;

/// Grace period for the child to exit after stdin closes.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

const CLIENT_NAME: &str = "tendem-mcpb";

/// How to launch the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StdioServerConfig {
    pub command: String,
    pub args: Vec<String>,
    /// Extra environment variables, added to the inherited environment
    pub env: BTreeMap<String, String>,
    pub cwd: Option<PathBuf>,
    pub timeout: Duration,
}

impl Default for StdioServerConfig {
    fn default() -> Self {
        Self {
            command: DEFAULT_COMMAND.to_string(),
            args: DEFAULT_ARGS.iter().map(|s| s.to_string()).collect(),
            env: BTreeMap::new(),
            cwd: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl StdioServerConfig {
    /// The command line as one string, for messages.
    pub fn display_command(&self) -> String {
        std::iter::once(self.command.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Tool registry read from a live server over stdio
#[derive(Debug, Clone, Default)]
pub struct StdioRegistry {
    config: StdioServerConfig,
}

impl StdioRegistry {
    pub fn new(config: StdioServerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StdioServerConfig {
        &self.config
    }

    async fn discover(&self) -> Result<Vec<ToolEntry>> {
        let mut session = StdioSession::spawn(&self.config)?;
        let result = session.list_all_tools().await;
        session.shutdown().await;
        validate_tools(result?)
    }
}

#[async_trait]
impl ToolRegistry for StdioRegistry {
    fn source(&self) -> String {
        format!("MCP server '{}'", self.config.display_command())
    }

    async fn list_tools(&self) -> Result<Vec<ToolEntry>> {
        match tokio::time::timeout(self.config.timeout, self.discover()).await {
            Ok(result) => result,
            // Dropping the session kills the child
            Err(_) => Err(Error::Timeout {
                command: self.config.display_command(),
                secs: self.config.timeout.as_secs(),
            }),
        }
    }
}

/// One running server and the protocol state around it
struct StdioSession {
    command: String,
    child: Child,
    stdin: ChildStdin,
    stdout: Lines<BufReader<ChildStdout>>,
    stderr_task: Option<JoinHandle<VecDeque<String>>>,
    next_id: u64,
}

impl StdioSession {
    fn spawn(config: &StdioServerConfig) -> Result<Self> {
        let command = config.display_command();

        let mut cmd = Command::new(&config.command);
        cmd.args(&config.args)
            .envs(&config.env)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(cwd) = &config.cwd {
            cmd.current_dir(cwd);
        }

        tracing::debug!(command = %command, "Spawning MCP server");
        let mut child = cmd.spawn().map_err(|source| Error::Spawn {
            command: command.clone(),
            source,
        })?;

        let (Some(stdin), Some(stdout), Some(stderr)) =
            (child.stdin.take(), child.stdout.take(), child.stderr.take())
        else {
            return Err(Error::Protocol {
                method: "spawn".into(),
                message: "child process is missing a piped stdio handle".into(),
            });
        };

        let stderr_task = tokio::spawn(collect_tail(stderr, STDERR_TAIL_LINES));

        Ok(Self {
            command,
            child,
            stdin,
            stdout: BufReader::new(stdout).lines(),
            stderr_task: Some(stderr_task),
            next_id: 1,
        })
    }

    async fn list_all_tools(&mut self) -> Result<Vec<ToolEntry>> {
        let init: InitializeResult = self
            .request(
                "initialize",
                serde_json::to_value(InitializeParams::for_client(
                    CLIENT_NAME,
                    env!("CARGO_PKG_VERSION"),
                ))?,
            )
            .await?;
        match &init.server_info {
            Some(info) => tracing::info!(
                server = %info.name,
                version = %info.version,
                protocol = %init.protocol_version,
                "MCP server initialized"
            ),
            None => tracing::info!(protocol = %init.protocol_version, "MCP server initialized"),
        }
        self.send(&JsonRpcRequest::notification("notifications/initialized"), "initialize")
            .await?;

        let mut tools = Vec::new();
        let mut cursor: Option<String> = None;
        let mut seen_cursors = HashSet::new();
        loop {
            let params = match &cursor {
                Some(c) => json!({ "cursor": c }),
                None => json!({}),
            };
            let page: ListToolsResult = self.request("tools/list", params).await?;
            tracing::debug!(count = page.tools.len(), "Received tools/list page");
            tools.extend(page.tools.into_iter().map(ToolEntry::from));

            match page.next_cursor.filter(|c| !c.is_empty()) {
                Some(next) => {
                    if !seen_cursors.insert(next.clone()) {
                        return Err(Error::Protocol {
                            method: "tools/list".into(),
                            message: format!("cursor '{next}' repeated"),
                        });
                    }
                    cursor = Some(next);
                }
                None => break,
            }
        }

        Ok(tools)
    }

    /// Send a request and wait for its response, answering or skipping any
    /// other traffic in between.
    async fn request<T: DeserializeOwned>(&mut self, method: &str, params: Value) -> Result<T> {
        let id = self.next_id;
        self.next_id += 1;
        self.send(&JsonRpcRequest::call(id, method, params), method)
            .await?;

        loop {
            let Some(line) = self.stdout.next_line().await? else {
                return Err(self.exited(method).await);
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let message: JsonRpcMessage = match serde_json::from_str(line) {
                Ok(message) => message,
                Err(_) => {
                    tracing::warn!(line = %line, "Skipping non JSON-RPC output from server");
                    continue;
                }
            };

            if let Some(request_id) = message.server_request_id() {
                self.answer_server_request(request_id.clone(), message.method.as_deref())
                    .await?;
                continue;
            }

            if !message.answers(id) {
                tracing::debug!(message = %line, "Ignoring unrelated message");
                continue;
            }

            if let Some(error) = message.error {
                return Err(Error::Rpc {
                    method: method.to_string(),
                    code: error.code,
                    message: error.message,
                });
            }

            let result = message.result.ok_or_else(|| Error::Protocol {
                method: method.to_string(),
                message: "response has neither result nor error".into(),
            })?;
            return serde_json::from_value(result).map_err(|e| Error::Protocol {
                method: method.to_string(),
                message: e.to_string(),
            });
        }
    }

    async fn answer_server_request(&mut self, id: Value, method: Option<&str>) -> Result<()> {
        let method = method.unwrap_or_default();
        tracing::debug!(method = %method, "Answering server request");
        let response = match method {
            "ping" => JsonRpcResponse::success(id, json!({})),
            _ => JsonRpcResponse::error(id, METHOD_NOT_FOUND, format!("Method not found: {method}")),
        };
        self.write_line(&serde_json::to_string(&response)?, method)
            .await
    }

    async fn send(&mut self, request: &JsonRpcRequest, context: &str) -> Result<()> {
        let line = serde_json::to_string(request)?;
        tracing::debug!(request = %line, "Sending message");
        self.write_line(&line, context).await
    }

    async fn write_line(&mut self, line: &str, context: &str) -> Result<()> {
        let written = async {
            self.stdin.write_all(line.as_bytes()).await?;
            self.stdin.write_all(b"\n").await?;
            self.stdin.flush().await
        }
        .await;

        match written {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => Err(self.exited(context).await),
            Err(e) => Err(Error::Io(e)),
        }
    }

    async fn exited(&mut self, method: &str) -> Error {
        Error::ServerExited {
            command: self.command.clone(),
            method: method.to_string(),
            stderr: self.stderr_tail().await,
        }
    }

    async fn stderr_tail(&mut self) -> String {
        let Some(task) = self.stderr_task.take() else {
            return String::new();
        };
        match tokio::time::timeout(Duration::from_secs(2), task).await {
            Ok(Ok(tail)) => Vec::from(tail).join("\n"),
            _ => String::new(),
        }
    }

    /// Close stdin and give the server a moment to exit before killing it.
    async fn shutdown(self) {
        let Self {
            mut child,
            stdin,
            stderr_task,
            ..
        } = self;
        drop(stdin);

        match tokio::time::timeout(SHUTDOWN_GRACE, child.wait()).await {
            Ok(Ok(status)) => tracing::debug!(%status, "MCP server exited"),
            Ok(Err(e)) => tracing::warn!(error = %e, "Failed waiting for MCP server"),
            Err(_) => {
                tracing::debug!("MCP server still running after stdin closed, killing it");
                let _ = child.kill().await;
            }
        }

        if let Some(task) = stderr_task {
            task.abort();
        }
    }
}

/// Read `reader` to the end, keeping only its last `limit` lines.
///
/// Reading continues past invalid UTF-8 so the child never blocks on a full
/// stderr pipe.
async fn collect_tail<R: AsyncRead + Unpin>(reader: R, limit: usize) -> VecDeque<String> {
    let mut reader = BufReader::new(reader);
    let mut tail = VecDeque::with_capacity(limit);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) | Err(_) => break,
            Ok(_) => {
                if tail.len() == limit {
                    tail.pop_front();
                }
                tail.push_back(String::from_utf8_lossy(&buf).trim_end().to_string());
            }
        }
    }
    tail
}
