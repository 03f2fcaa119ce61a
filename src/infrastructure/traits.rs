//! I/O boundary traits for testability
//!
//! These traits abstract the MCP connection and the diagnostic output,
//! allowing services to be tested with in-memory implementations.

use async_trait::async_trait;
use serde_json::Value;

use crate::application::ApplicationResult;
use crate::domain::{ToolArguments, ToolCallOutcome, TransportSpec};

/// Opens MCP sessions.
#[async_trait]
pub trait McpConnector: Send + Sync {
    /// Establish the transport and complete the MCP initialize handshake.
    async fn connect(&self, transport: &TransportSpec) -> ApplicationResult<Box<dyn McpSession>>;
}

/// A live, initialized MCP client session.
///
/// Listings are returned as the JSON the server sent, so they print exactly
/// as received.
#[async_trait]
pub trait McpSession: Send + Sync {
    /// All tools, following pagination cursors.
    async fn list_tools(&self) -> ApplicationResult<Vec<Value>>;

    /// All resources, following pagination cursors.
    async fn list_resources(&self) -> ApplicationResult<Vec<Value>>;

    /// All prompts, following pagination cursors.
    async fn list_prompts(&self) -> ApplicationResult<Vec<Value>>;

    /// Invoke a tool.
    async fn call_tool(
        &self,
        name: &str,
        arguments: ToolArguments,
    ) -> ApplicationResult<ToolCallOutcome>;

    /// Shut the session down, terminating a spawned server process.
    async fn close(self: Box<Self>) -> ApplicationResult<()>;
}

/// Sink for user-facing diagnostics (warnings and errors).
///
/// Result payloads never go here; they are written to stdout.
pub trait Diagnostics: Send + Sync {
    fn warning(&self, message: &str);

    fn error(&self, message: &str);
}
