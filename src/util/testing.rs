//! Test support: logging setup and in-memory stand-ins for the I/O traits

use std::env;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Once};

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{ContentItem, ToolArguments, ToolCallOutcome, TransportSpec};
use crate::infrastructure::traits::{Diagnostics, McpConnector, McpSession};

static TEST_SETUP: Once = Once::new();

pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_test_writer()
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else if let Err(e) = subscriber.try_init() {
        eprintln!("Error: Failed to set up logging: {}", e);
    }
    debug!("RUST_LOG={:?}", env::var("RUST_LOG").ok());
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

// ============================================================
// DIAGNOSTICS
// ============================================================

/// Diagnostics sink that keeps every message for later assertions.
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    warnings: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
}

impl RecordingDiagnostics {
    pub fn warnings(&self) -> Vec<String> {
        lock(&self.warnings).clone()
    }

    pub fn errors(&self) -> Vec<String> {
        lock(&self.errors).clone()
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn warning(&self, message: &str) {
        lock(&self.warnings).push(message.to_string());
    }

    fn error(&self, message: &str) {
        lock(&self.errors).push(message.to_string());
    }
}

// ============================================================
// FAKE MCP SERVER
// ============================================================

/// Scripted server behind a [`FakeConnector`].
///
/// With no fixed `call_result`, the `echo` tool returns its `message`
/// argument as structured content and any other tool fails.
#[derive(Debug, Clone, Default)]
pub struct FakeServer {
    pub tools: Vec<Value>,
    pub resources: Vec<Value>,
    pub prompts: Vec<Value>,
    pub call_result: Option<ToolCallOutcome>,
    pub fail_close: bool,
}

impl FakeServer {
    /// Server exposing a single `echo` tool.
    pub fn echo() -> Self {
        Self {
            tools: vec![json!({
                "name": "echo",
                "description": "Echo back the message.",
                "inputSchema": {
                    "type": "object",
                    "properties": { "message": { "type": "string" } },
                    "required": ["message"]
                }
            })],
            ..Self::default()
        }
    }
}

/// What the fake observed.
#[derive(Debug, Default)]
pub struct FakeStats {
    connects: AtomicUsize,
    closes: AtomicUsize,
    transports: Mutex<Vec<TransportSpec>>,
    calls: Mutex<Vec<(String, ToolArguments)>>,
}

impl FakeStats {
    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    pub fn transports(&self) -> Vec<TransportSpec> {
        lock(&self.transports).clone()
    }

    pub fn calls(&self) -> Vec<(String, ToolArguments)> {
        lock(&self.calls).clone()
    }
}

/// In-memory connector: every session talks to the same [`FakeServer`].
#[derive(Debug, Default)]
pub struct FakeConnector {
    server: FakeServer,
    fail_connect: bool,
    stats: Arc<FakeStats>,
}

impl FakeConnector {
    pub fn new(server: FakeServer) -> Self {
        Self {
            server,
            ..Self::default()
        }
    }

    /// Connector whose every connection attempt fails.
    pub fn unreachable() -> Self {
        Self {
            fail_connect: true,
            ..Self::default()
        }
    }

    pub fn stats(&self) -> Arc<FakeStats> {
        Arc::clone(&self.stats)
    }
}

#[async_trait]
impl McpConnector for FakeConnector {
    async fn connect(&self, transport: &TransportSpec) -> ApplicationResult<Box<dyn McpSession>> {
        self.stats.connects.fetch_add(1, Ordering::SeqCst);
        lock(&self.stats.transports).push(transport.clone());
        if self.fail_connect {
            return Err(ApplicationError::Connect {
                target: transport.describe(),
                message: "connection refused".into(),
            });
        }
        Ok(Box::new(FakeSession {
            server: self.server.clone(),
            stats: Arc::clone(&self.stats),
        }))
    }
}

struct FakeSession {
    server: FakeServer,
    stats: Arc<FakeStats>,
}

#[async_trait]
impl McpSession for FakeSession {
    async fn list_tools(&self) -> ApplicationResult<Vec<Value>> {
        Ok(self.server.tools.clone())
    }

    async fn list_resources(&self) -> ApplicationResult<Vec<Value>> {
        Ok(self.server.resources.clone())
    }

    async fn list_prompts(&self) -> ApplicationResult<Vec<Value>> {
        Ok(self.server.prompts.clone())
    }

    async fn call_tool(
        &self,
        name: &str,
        arguments: ToolArguments,
    ) -> ApplicationResult<ToolCallOutcome> {
        lock(&self.stats.calls).push((name.to_string(), arguments.clone()));
        if let Some(outcome) = &self.server.call_result {
            return Ok(outcome.clone());
        }
        match name {
            "echo" => {
                let message = arguments.get("message").cloned().unwrap_or(Value::Null);
                Ok(ToolCallOutcome {
                    structured_content: Some(json!({ "result": message })),
                    content: vec![ContentItem::Text(message.to_string())],
                    is_error: false,
                })
            }
            other => Err(ApplicationError::Protocol {
                operation: "tools/call",
                message: format!("Unknown tool: {}", other),
            }),
        }
    }

    async fn close(self: Box<Self>) -> ApplicationResult<()> {
        self.stats.closes.fetch_add(1, Ordering::SeqCst);
        if self.server.fail_close {
            return Err(ApplicationError::Disconnect {
                message: "server did not shut down".into(),
            });
        }
        Ok(())
    }
}
