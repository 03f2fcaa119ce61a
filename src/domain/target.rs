//! Server targets and the transports they resolve to

use std::fmt;

const HTTP_SCHEMES: [&str; 2] = ["http://", "https://"];

/// Where the MCP server lives, as given by `--server`.
///
/// A target starting with `http://` or `https://` is a streamable-HTTP
/// endpoint; anything else is a shell command line that starts the server
/// as a subprocess speaking MCP over stdio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerTarget {
    /// Remote streamable-HTTP endpoint
    Http(String),
    /// Shell command line run through the configured shell
    Command(String),
}

impl ServerTarget {
    /// Classify a raw target string.
    ///
    /// Returns `None` for an empty or whitespace-only target, which callers
    /// treat the same as a missing `--server`.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        if HTTP_SCHEMES.iter().any(|scheme| raw.starts_with(scheme)) {
            Some(Self::Http(raw.to_string()))
        } else {
            Some(Self::Command(raw.to_string()))
        }
    }

    pub fn is_http(&self) -> bool {
        matches!(self, Self::Http(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Http(url) => url,
            Self::Command(command) => command,
        }
    }

    /// Build the transport descriptor for this target.
    ///
    /// The bearer token only survives for HTTP targets; `shell` and
    /// `forward_stderr` only matter for command targets.
    pub fn into_transport(
        self,
        bearer_token: Option<String>,
        shell: &str,
        forward_stderr: bool,
    ) -> TransportSpec {
        match self {
            Self::Http(url) => TransportSpec::StreamableHttp { url, bearer_token },
            Self::Command(command) => TransportSpec::Subprocess {
                program: shell.to_string(),
                args: vec!["-c".to_string(), command],
                forward_stderr,
            },
        }
    }
}

impl fmt::Display for ServerTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fully resolved transport, ready to hand to a connector.
#[derive(Clone, PartialEq, Eq)]
pub enum TransportSpec {
    StreamableHttp {
        url: String,
        /// Sent as `Authorization: Bearer <token>`
        bearer_token: Option<String>,
    },
    Subprocess {
        program: String,
        args: Vec<String>,
        /// Pass the child's stderr through instead of discarding it
        forward_stderr: bool,
    },
}

impl TransportSpec {
    /// Short human-readable description for logs and error messages.
    pub fn describe(&self) -> String {
        match self {
            Self::StreamableHttp { url, .. } => url.clone(),
            Self::Subprocess { program, args, .. } => {
                format!("{} {}", program, args.join(" "))
            }
        }
    }
}

// Manual impl keeps the bearer token out of debug logs.
impl fmt::Debug for TransportSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StreamableHttp { url, bearer_token } => f
                .debug_struct("StreamableHttp")
                .field("url", url)
                .field("bearer_token", &bearer_token.as_ref().map(|_| "<redacted>"))
                .finish(),
            Self::Subprocess {
                program,
                args,
                forward_stderr,
            } => f
                .debug_struct("Subprocess")
                .field("program", program)
                .field("args", args)
                .field("forward_stderr", forward_stderr)
                .finish(),
        }
    }
}
