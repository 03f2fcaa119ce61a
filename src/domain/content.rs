//! Tool call results and their terminal rendering

use serde_json::Value;

/// One item of a tool result's `content` array.
///
/// Only text is printed verbatim. Every other content type (image, audio,
/// embedded resource, resource link, or a type this build does not know)
/// renders as a placeholder naming the type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentItem {
    Text(String),
    Other { kind: String },
}

impl ContentItem {
    /// Build from the wire representation of a content item.
    pub fn from_json(value: &Value) -> Self {
        let kind = value
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or("unknown");
        match (kind, value.get("text").and_then(Value::as_str)) {
            ("text", Some(text)) => Self::Text(text.to_string()),
            _ => Self::Other {
                kind: kind.to_string(),
            },
        }
    }

    pub fn render(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Other { kind } => format!("[{} content]", kind),
        }
    }
}

/// Result of a single `tools/call`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToolCallOutcome {
    pub structured_content: Option<Value>,
    pub content: Vec<ContentItem>,
    /// Server flagged the call as failed (`isError`)
    pub is_error: bool,
}

impl ToolCallOutcome {
    /// Structured content counts only when it carries data: `null`, `{}`
    /// and `[]` fall back to the content items.
    pub fn structured(&self) -> Option<&Value> {
        self.structured_content.as_ref().filter(|value| match value {
            Value::Null => false,
            Value::Object(map) => !map.is_empty(),
            Value::Array(items) => !items.is_empty(),
            _ => true,
        })
    }

    /// Lines to print for this outcome, in order.
    pub fn render_lines(&self) -> Vec<String> {
        match self.structured() {
            Some(value) => vec![value.to_string()],
            None => self.content.iter().map(ContentItem::render).collect(),
        }
    }
}

/// Render a list of descriptors (tools, resources, prompts) as one JSON array.
pub fn render_listing(items: &[Value]) -> String {
    Value::Array(items.to_vec()).to_string()
}
