//! Script command errors

use thiserror::Error;
use wayfinder_core::GraphError;
use wayfinder_data::DataError;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Unrecognized command: {0}")]
    Unrecognized(String),

    #[error("Bad arguments to {command}: [{}]", .args.join(", "))]
    BadArguments { command: String, args: Vec<String> },

    #[error("no graph named {0}")]
    UnknownGraph(String),

    #[error("invalid edge label {0:?}")]
    InvalidLabel(String),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ScriptError>;
