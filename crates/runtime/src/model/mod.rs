//! Chat-completion protocol types and backend trait.

pub mod errors;
pub mod types;

pub use errors::ModelError;
pub use types::{
    Backend, FinishReason, Message, ModelRequest, ModelResponse, SchemaType, ToolCall,
    ToolParameters, ToolSpec, Usage,
};
