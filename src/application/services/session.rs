//! Scoped session execution
//!
//! One invocation, one session, one request: connect, perform the operation,
//! close the session on every path, then hand the output back for printing.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, instrument};

use crate::application::ApplicationResult;
use crate::domain::{render_listing, ToolArguments, ToolCallOutcome, TransportSpec};
use crate::infrastructure::traits::{Diagnostics, McpConnector, McpSession};

/// The single protocol request an invocation performs.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    ListTools,
    ListResources,
    ListPrompts,
    CallTool {
        name: String,
        arguments: ToolArguments,
    },
}

impl Operation {
    /// MCP method name, used in logs and error messages.
    pub fn method(&self) -> &'static str {
        match self {
            Self::ListTools => "tools/list",
            Self::ListResources => "resources/list",
            Self::ListPrompts => "prompts/list",
            Self::CallTool { .. } => "tools/call",
        }
    }
}

/// What an operation produced.
#[derive(Debug, Clone, PartialEq)]
pub enum OperationOutput {
    Listing(Vec<Value>),
    ToolCall(ToolCallOutcome),
}

impl OperationOutput {
    pub fn render_lines(&self) -> Vec<String> {
        match self {
            Self::Listing(items) => vec![render_listing(items)],
            Self::ToolCall(outcome) => outcome.render_lines(),
        }
    }
}

/// Runs one operation inside one scoped session.
pub struct SessionService {
    connector: Arc<dyn McpConnector>,
    diagnostics: Arc<dyn Diagnostics>,
}

impl SessionService {
    pub fn new(connector: Arc<dyn McpConnector>, diagnostics: Arc<dyn Diagnostics>) -> Self {
        Self {
            connector,
            diagnostics,
        }
    }

    /// Connect, perform `operation`, close.
    ///
    /// The session is closed whether or not the operation succeeded. When the
    /// operation fails its error wins; a close failure on top of it is
    /// reported as a warning. A close failure after a successful operation is
    /// returned as the error.
    #[instrument(skip(self, operation), fields(method = operation.method()))]
    pub async fn execute(
        &self,
        transport: &TransportSpec,
        operation: Operation,
    ) -> ApplicationResult<OperationOutput> {
        debug!("execute: connecting to {}", transport.describe());
        let session = self.connector.connect(transport).await?;

        let result = perform(session.as_ref(), operation).await;
        let closed = session.close().await;
        debug!("execute: session closed");

        match (result, closed) {
            (Ok(output), Ok(())) => Ok(output),
            (Ok(_), Err(close_err)) => Err(close_err),
            (Err(err), Ok(())) => Err(err),
            (Err(err), Err(close_err)) => {
                self.diagnostics.warning(&close_err.to_string());
                Err(err)
            }
        }
    }
}

async fn perform(
    session: &dyn McpSession,
    operation: Operation,
) -> ApplicationResult<OperationOutput> {
    let output = match operation {
        Operation::ListTools => OperationOutput::Listing(session.list_tools().await?),
        Operation::ListResources => OperationOutput::Listing(session.list_resources().await?),
        Operation::ListPrompts => OperationOutput::Listing(session.list_prompts().await?),
        Operation::CallTool { name, arguments } => {
            OperationOutput::ToolCall(session.call_tool(&name, arguments).await?)
        }
    };
    Ok(output)
}
