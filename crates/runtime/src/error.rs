use thiserror::Error;

use crate::model::ModelError;
use crate::tools::ToolError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid arguments for tool {tool}: {reason}")]
    ArgumentParse { tool: String, reason: String },

    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error(transparent)]
    Model(#[from] ModelError),
}

pub type Result<T> = std::result::Result<T, Error>;
