//! Transport resolution
//!
//! Turns the configured server target into a [`TransportSpec`] without any
//! network or process I/O.

use std::sync::Arc;

use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult};
use crate::config::Settings;
use crate::domain::{ServerTarget, TransportSpec};
use crate::infrastructure::traits::Diagnostics;

pub const BEARER_TOKEN_IGNORED: &str =
    "--bearer-token is only supported for HTTP servers; ignoring.";

/// Resolves settings into a transport, reporting advisory conditions.
pub struct TransportResolver {
    diagnostics: Arc<dyn Diagnostics>,
}

impl TransportResolver {
    pub fn new(diagnostics: Arc<dyn Diagnostics>) -> Self {
        Self { diagnostics }
    }

    /// Resolve the transport for the configured server.
    ///
    /// - no (or blank) server: [`ApplicationError::MissingServer`]
    /// - `http://` / `https://`: streamable HTTP, bearer token attached if set
    /// - anything else: `<shell> -c <target>`, stderr forwarded only in debug mode
    ///
    /// A bearer token next to a command target is ignored with a warning.
    pub fn resolve(&self, settings: &Settings) -> ApplicationResult<TransportSpec> {
        let target = settings
            .server
            .as_deref()
            .and_then(ServerTarget::parse)
            .ok_or(ApplicationError::MissingServer)?;

        let bearer_token = match (&target, &settings.bearer_token) {
            (ServerTarget::Command(_), Some(_)) => {
                self.diagnostics.warning(BEARER_TOKEN_IGNORED);
                None
            }
            (_, token) => token.clone(),
        };

        let transport = target.into_transport(bearer_token, &settings.shell, settings.debug);
        debug!("resolve: {:?}", transport);
        Ok(transport)
    }
}
