//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::{SessionService, TransportResolver};
use crate::cli::output::TerminalDiagnostics;
use crate::config::Settings;
use crate::infrastructure::mcp::RmcpConnector;
use crate::infrastructure::traits::{Diagnostics, McpConnector};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Effective settings (config layers plus command-line flags)
    pub settings: Arc<Settings>,

    /// Diagnostic sink shared by all services
    pub diagnostics: Arc<dyn Diagnostics>,

    pub resolver: TransportResolver,

    pub sessions: SessionService,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(
            settings,
            Arc::new(RmcpConnector),
            Arc::new(TerminalDiagnostics),
        )
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        connector: Arc<dyn McpConnector>,
        diagnostics: Arc<dyn Diagnostics>,
    ) -> Self {
        let settings = Arc::new(settings);
        let resolver = TransportResolver::new(Arc::clone(&diagnostics));
        let sessions = SessionService::new(connector, Arc::clone(&diagnostics));

        Self {
            settings,
            diagnostics,
            resolver,
            sessions,
        }
    }
}
