//! MCP client backed by the `rmcp` SDK
//!
//! Supports the two transports a server target can resolve to: a child
//! process speaking over stdio, and a streamable-HTTP endpoint.

use std::process::Stdio;

use async_trait::async_trait;
use rmcp::{
    model::{CallToolRequestParam, ClientInfo},
    service::{RoleClient, RunningService},
    transport::{
        streamable_http_client::StreamableHttpClientTransportConfig,
        StreamableHttpClientTransport, TokioChildProcess,
    },
    ServiceExt,
};
use serde::Serialize;
use serde_json::Value;
use tokio::process::Command;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{ContentItem, ToolArguments, ToolCallOutcome, TransportSpec};
use crate::infrastructure::traits::{McpConnector, McpSession};

const CLIENT_NAME: &str = "mcp-tool";

type ClientService = RunningService<RoleClient, ClientInfo>;

/// Connector that speaks MCP through `rmcp`.
#[derive(Debug, Default)]
pub struct RmcpConnector;

#[async_trait]
impl McpConnector for RmcpConnector {
    #[instrument(level = "debug", skip(self))]
    async fn connect(&self, transport: &TransportSpec) -> ApplicationResult<Box<dyn McpSession>> {
        let target = transport.describe();
        let connect_err = |message: String| ApplicationError::Connect {
            target: target.clone(),
            message,
        };

        let service = match transport {
            TransportSpec::StreamableHttp { url, bearer_token } => {
                let mut config = StreamableHttpClientTransportConfig::with_uri(url.clone());
                if let Some(token) = bearer_token {
                    config = config.auth_header(token.clone());
                }
                let transport = StreamableHttpClientTransport::from_config(config);
                client_info()
                    .serve(transport)
                    .await
                    .map_err(|e| connect_err(e.to_string()))?
            }
            TransportSpec::Subprocess {
                program,
                args,
                forward_stderr,
            } => {
                let mut cmd = Command::new(program);
                cmd.args(args);
                let stderr = if *forward_stderr {
                    Stdio::inherit()
                } else {
                    Stdio::null()
                };
                let (transport, _stderr) = TokioChildProcess::builder(cmd)
                    .stderr(stderr)
                    .spawn()
                    .map_err(|e| connect_err(format!("cannot spawn {}: {}", program, e)))?;
                client_info()
                    .serve(transport)
                    .await
                    .map_err(|e| connect_err(e.to_string()))?
            }
        };

        debug!("connect: server info {:?}", service.peer_info());
        Ok(Box::new(RmcpSession { service }))
    }
}

fn client_info() -> ClientInfo {
    let mut info = ClientInfo::default();
    info.client_info.name = CLIENT_NAME.to_string();
    info.client_info.version = env!("CARGO_PKG_VERSION").to_string();
    info
}

/// Initialized `rmcp` client session.
struct RmcpSession {
    service: ClientService,
}

#[async_trait]
impl McpSession for RmcpSession {
    async fn list_tools(&self) -> ApplicationResult<Vec<Value>> {
        let tools = self
            .service
            .list_all_tools()
            .await
            .map_err(|e| protocol_err("tools/list", e))?;
        to_json_values("tools/list", &tools)
    }

    async fn list_resources(&self) -> ApplicationResult<Vec<Value>> {
        let resources = self
            .service
            .list_all_resources()
            .await
            .map_err(|e| protocol_err("resources/list", e))?;
        to_json_values("resources/list", &resources)
    }

    async fn list_prompts(&self) -> ApplicationResult<Vec<Value>> {
        let prompts = self
            .service
            .list_all_prompts()
            .await
            .map_err(|e| protocol_err("prompts/list", e))?;
        to_json_values("prompts/list", &prompts)
    }

    async fn call_tool(
        &self,
        name: &str,
        arguments: ToolArguments,
    ) -> ApplicationResult<ToolCallOutcome> {
        let result = self
            .service
            .call_tool(CallToolRequestParam {
                name: name.to_string().into(),
                arguments: Some(arguments),
            })
            .await
            .map_err(|e| protocol_err("tools/call", e))?;

        let content = to_json_values("tools/call", &result.content)?
            .iter()
            .map(ContentItem::from_json)
            .collect();

        Ok(ToolCallOutcome {
            structured_content: result.structured_content,
            content,
            is_error: result.is_error.unwrap_or(false),
        })
    }

    async fn close(self: Box<Self>) -> ApplicationResult<()> {
        let reason = self
            .service
            .cancel()
            .await
            .map_err(|e| ApplicationError::Disconnect {
                message: e.to_string(),
            })?;
        debug!("close: {:?}", reason);
        Ok(())
    }
}

fn protocol_err(operation: &'static str, err: impl std::fmt::Display) -> ApplicationError {
    ApplicationError::Protocol {
        operation,
        message: err.to_string(),
    }
}

fn to_json_values<T: Serialize>(operation: &'static str, items: &[T]) -> ApplicationResult<Vec<Value>> {
    items
        .iter()
        .map(|item| serde_json::to_value(item).map_err(|e| protocol_err(operation, e)))
        .collect()
}
