//! Query processing against a model and a tool host.

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::conversation::{Conversation, Transcript};
use crate::model::{Backend, ModelRequest, ToolCall, ToolSpec};
use crate::tools::{ToolHost, ToolInvocationResult, schema};
use crate::{Error, Result};

/// Tool rounds allowed per query unless configured otherwise.
pub const DEFAULT_MAX_TOOL_ROUNDS: usize = 1;

/// A live session: a model backend, a tool host, and the tool specs adapted
/// from the host's discovered tools.
///
/// Queries are independent. Each one starts a fresh conversation seeded only
/// with the query text.
pub struct Session<B, H> {
    backend: B,
    host: H,
    specs: Vec<ToolSpec>,
    max_tool_rounds: usize,
}

impl<B: Backend, H: ToolHost> Session<B, H> {
    /// Create a session, adapting the host's tools for the model.
    pub fn new(backend: B, host: H) -> Self {
        let specs = schema::adapt_all(host.descriptors());
        Self {
            backend,
            host,
            specs,
            max_tool_rounds: DEFAULT_MAX_TOOL_ROUNDS,
        }
    }

    /// Set how many rounds of tool execution a single query may run.
    pub fn with_max_tool_rounds(mut self, max_tool_rounds: usize) -> Self {
        self.max_tool_rounds = max_tool_rounds;
        self
    }

    /// Tool specs offered to the model.
    pub fn tool_specs(&self) -> &[ToolSpec] {
        &self.specs
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Consume the session, returning the tool host for shutdown.
    pub fn into_host(self) -> H {
        self.host
    }

    /// Answer a query, executing requested tools along the way.
    ///
    /// The result holds, newline-joined and in order: model text from each
    /// round and one `[Calling tool ...]` line per executed tool call.
    /// Tool calls run one at a time in the order the model listed them. The
    /// first failure aborts the query.
    pub async fn process_query(&self, query: &str) -> Result<String> {
        let mut conversation = Conversation::new(query);
        let mut transcript = Transcript::default();
        // An empty tool list is not the same as no tools for some providers.
        let tools = (!self.specs.is_empty()).then_some(self.specs.as_slice());

        loop {
            let response = self
                .backend
                .call(ModelRequest {
                    messages: conversation.messages(),
                    tools,
                })
                .await?;

            debug!(
                round = conversation.tool_rounds(),
                tool_calls = response.tool_calls.len(),
                finish_reason = ?response.finish_reason,
                input_tokens = response.usage.input_tokens,
                output_tokens = response.usage.output_tokens,
                "model responded"
            );

            if let Some(text) = response.text() {
                transcript.push(text);
            }

            if response.tool_calls.is_empty() {
                break;
            }
            if conversation.tool_rounds() >= self.max_tool_rounds {
                warn!(
                    dropped = response.tool_calls.len(),
                    max_tool_rounds = self.max_tool_rounds,
                    "tool round limit reached, ignoring requested tool calls"
                );
                break;
            }

            let results = self
                .execute_tool_calls(&response.tool_calls, &mut transcript)
                .await?;
            conversation.record_tool_round(response.content, response.tool_calls, results);
        }

        Ok(transcript.finish())
    }

    async fn execute_tool_calls(
        &self,
        calls: &[ToolCall],
        transcript: &mut Transcript,
    ) -> Result<Vec<ToolInvocationResult>> {
        let mut results = Vec::with_capacity(calls.len());

        for call in calls {
            let (arguments, rendered) = parse_arguments(call)?;
            transcript.push(format!("[Calling tool {} with args {rendered}]", call.name));

            info!(tool = %call.name, id = %call.id, "calling tool");
            let result = self.host.invoke(&call.name, arguments).await?;

            results.push(ToolInvocationResult {
                tool_call_id: call.id.clone(),
                result,
            });
        }

        Ok(results)
    }
}

/// Parse a call's arguments into a JSON object, also returning its compact
/// JSON rendering. Blank arguments mean no arguments.
fn parse_arguments(call: &ToolCall) -> Result<(Map<String, Value>, String)> {
    let arguments_error = |reason: String| Error::ArgumentParse {
        tool: call.name.clone(),
        reason,
    };

    let value = if call.arguments.trim().is_empty() {
        Value::Object(Map::new())
    } else {
        serde_json::from_str(&call.arguments).map_err(|e| arguments_error(e.to_string()))?
    };

    let rendered = value.to_string();
    match value {
        Value::Object(arguments) => Ok((arguments, rendered)),
        other => Err(arguments_error(format!(
            "expected a JSON object, got {other}"
        ))),
    }
}
