//! Domain layer: server targets, tool arguments and call results
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arguments;
pub mod content;
pub mod error;
pub mod target;

pub use arguments::{parse_tool_arguments, ToolArguments};
pub use content::{render_listing, ContentItem, ToolCallOutcome};
pub use error::{DomainError, DomainResult};
pub use target::{ServerTarget, TransportSpec};
