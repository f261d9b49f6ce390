//! Parsing of one script line into a command

use crate::error::{Result, ScriptError};

/// A single script command with its arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    CreateGraph { graph: String },
    AddNode { graph: String, node: String },
    AddEdge { graph: String, parent: String, child: String, label: String },
    ListNodes { graph: String },
    ListChildren { graph: String, parent: String },
    LoadGraph { graph: String, file: String },
    FindPath { graph: String, start: String, dest: String },
}

impl Command {
    /// Build a command from its name and whitespace-split arguments.
    pub fn parse(name: &str, args: &[String]) -> Result<Command> {
        let arity = match name {
            "CreateGraph" | "ListNodes" => 1,
            "AddNode" | "ListChildren" | "LoadGraph" => 2,
            "FindPath" => 3,
            "AddEdge" => 4,
            _ => return Err(ScriptError::Unrecognized(name.to_string())),
        };
        if args.len() != arity {
            return Err(ScriptError::BadArguments {
                command: name.to_string(),
                args: args.to_vec(),
            });
        }

        let arg = |i: usize| args.get(i).cloned().unwrap_or_default();
        Ok(match name {
            "CreateGraph" => Command::CreateGraph { graph: arg(0) },
            "ListNodes" => Command::ListNodes { graph: arg(0) },
            "AddNode" => Command::AddNode { graph: arg(0), node: arg(1) },
            "ListChildren" => Command::ListChildren { graph: arg(0), parent: arg(1) },
            "LoadGraph" => Command::LoadGraph { graph: arg(0), file: arg(1) },
            "FindPath" => Command::FindPath {
                graph: arg(0),
                start: arg(1),
                dest: arg(2),
            },
            _ => Command::AddEdge {
                graph: arg(0),
                parent: arg(1),
                child: arg(2),
                label: arg(3),
            },
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::CreateGraph { .. } => "CreateGraph",
            Command::AddNode { .. } => "AddNode",
            Command::AddEdge { .. } => "AddEdge",
            Command::ListNodes { .. } => "ListNodes",
            Command::ListChildren { .. } => "ListChildren",
            Command::LoadGraph { .. } => "LoadGraph",
            Command::FindPath { .. } => "FindPath",
        }
    }
}
