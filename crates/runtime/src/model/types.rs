use super::errors::ModelError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::future::Future;

/// A tool call requested by the model.
///
/// `arguments` is kept exactly as the model produced it. It is only parsed
/// when the call is about to be executed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    pub arguments: String,
}

/// A message in the conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Message {
    User {
        content: String,
    },
    Assistant {
        content: Option<String>,
        tool_calls: Vec<ToolCall>,
    },
    /// Result of a tool call, answering a call from the preceding assistant message.
    Tool {
        tool_call_id: String,
        content: String,
    },
}

impl Message {
    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::User {
            content: content.into(),
        }
    }

    /// Create an assistant message echoing content and tool calls.
    pub fn assistant(content: Option<String>, tool_calls: Vec<ToolCall>) -> Self {
        Self::Assistant {
            content,
            tool_calls,
        }
    }

    /// Create a tool result message.
    pub fn tool(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::Tool {
            tool_call_id: tool_call_id.into(),
            content: content.into(),
        }
    }
}

/// JSON Schema type of a function's parameters. Always `"object"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    #[default]
    Object,
}

/// Parameters block of a function-calling tool definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolParameters {
    #[serde(rename = "type")]
    pub kind: SchemaType,
    pub properties: Map<String, Value>,
    pub required: Vec<Value>,
}

/// A tool definition in the shape the model expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub parameters: ToolParameters,
}

/// Why the model stopped generating.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FinishReason {
    /// Natural end of response.
    #[default]
    Stop,
    /// Model wants to call tools.
    ToolCalls,
    /// Hit token limit.
    Length,
    /// Content filtered.
    ContentFilter,
    /// Unknown reason (forward compatibility).
    Unknown(String),
}

/// Token usage statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// Everything needed for a model request.
///
/// `tools` is `None` when no tools should be offered at all, which providers
/// must distinguish from an empty list.
#[derive(Debug, Clone, Copy)]
pub struct ModelRequest<'a> {
    pub messages: &'a [Message],
    pub tools: Option<&'a [ToolSpec]>,
}

/// The first choice of a model response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelResponse {
    pub content: Option<String>,
    pub tool_calls: Vec<ToolCall>,
    pub finish_reason: FinishReason,
    pub usage: Usage,
}

impl ModelResponse {
    /// Response text, if the model produced any.
    pub fn text(&self) -> Option<&str> {
        self.content.as_deref().filter(|text| !text.is_empty())
    }
}

/// Trait for LLM provider backends.
pub trait Backend: Send + Sync {
    fn call(
        &self,
        request: ModelRequest<'_>,
    ) -> impl Future<Output = Result<ModelResponse, ModelError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn message_is_role_tagged() {
        let value = serde_json::to_value(Message::tool("call_1", "5")).unwrap();
        assert_eq!(
            value,
            json!({"role": "tool", "tool_call_id": "call_1", "content": "5"})
        );
    }

    #[test]
    fn empty_content_is_not_text() {
        let response = ModelResponse {
            content: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(response.text(), None);

        let response = ModelResponse {
            content: Some("hi".into()),
            ..Default::default()
        };
        assert_eq!(response.text(), Some("hi"));
    }

    #[test]
    fn parameters_serialize_as_object_schema() {
        let value = serde_json::to_value(ToolParameters::default()).unwrap();
        assert_eq!(
            value,
            json!({"type": "object", "properties": {}, "required": []})
        );
    }
}
