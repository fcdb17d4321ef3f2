//! Per-query conversation state and output transcript.

use crate::model::{Message, ToolCall};
use crate::tools::ToolInvocationResult;

/// Message log for a single query, plus the number of tool rounds run so far.
#[derive(Debug, Clone)]
pub struct Conversation {
    messages: Vec<Message>,
    tool_rounds: usize,
}

impl Conversation {
    /// Start a conversation seeded with the user's query.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::user(query)],
            tool_rounds: 0,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn tool_rounds(&self) -> usize {
        self.tool_rounds
    }

    /// Append the assistant turn that requested tools, followed by one tool
    /// message per result in call order.
    pub fn record_tool_round(
        &mut self,
        content: Option<String>,
        tool_calls: Vec<ToolCall>,
        results: Vec<ToolInvocationResult>,
    ) {
        self.messages.push(Message::assistant(content, tool_calls));
        self.messages.extend(
            results
                .into_iter()
                .map(|r| Message::tool(r.tool_call_id, r.result.to_string())),
        );
        self.tool_rounds += 1;
    }
}

/// Output lines in emission order.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    lines: Vec<String>,
}

impl Transcript {
    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Join all lines with newlines.
    pub fn finish(self) -> String {
        self.lines.join("\n")
    }
}
