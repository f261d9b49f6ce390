//! Wayfinder Script — line-oriented command interpreter over named graphs
//!
//! Scripts create graphs, add nodes and edges, list them in sorted order and
//! search them. Every command prints a deterministic line, so a transcript
//! can be compared verbatim against an expected file.

pub mod error;
pub mod command;
pub mod registry;
pub mod dialect;
pub mod session;


pub use command::Command;
pub use dialect::{Dialect, Labeled, Social, Weighted};
pub use error::{Result, ScriptError};
pub use registry::GraphRegistry;
pub use session::Session;

/// Run a whole script and return its transcript.
pub fn transcript<D: Dialect>(dialect: D, script: &str) -> std::io::Result<String> {
    let mut session = Session::new(dialect, Vec::new());
    session.run(script.as_bytes())?;
    Ok(String::from_utf8_lossy(&session.into_output()).into_owned())
}
