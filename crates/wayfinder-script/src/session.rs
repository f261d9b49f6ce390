//! Line-by-line script execution

use std::io::{self, BufRead, Write};

use tracing::debug;
use wayfinder_core::{Graph, Node};

use crate::command::Command;
use crate::dialect::Dialect;
use crate::error::{Result, ScriptError};
use crate::registry::GraphRegistry;

/// One interpreter run: a dialect, the graphs it has created so far, and
/// the sink that receives its transcript.
pub struct Session<D: Dialect, W> {
    dialect: D,
    graphs: GraphRegistry<D::Label>,
    out: W,
}

impl<D: Dialect, W: Write> Session<D, W> {
    pub fn new(dialect: D, out: W) -> Self {
        Self {
            dialect,
            graphs: GraphRegistry::new(),
            out,
        }
    }

    pub fn graphs(&self) -> &GraphRegistry<D::Label> {
        &self.graphs
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Run every line of `input`, writing results as they are produced.
    ///
    /// Command failures are reported in the transcript and do not stop the
    /// run; only a failure to read input or write output is returned.
    pub fn run<R: BufRead>(&mut self, input: R) -> io::Result<()> {
        for line in input.lines() {
            self.run_line(&line?)?;
        }
        self.out.flush()
    }

    pub fn run_line(&mut self, line: &str) -> io::Result<()> {
        if line.trim().is_empty() || line.starts_with('#') {
            return writeln!(self.out, "{}", line);
        }

        let mut tokens = line.split_whitespace().map(str::to_string);
        let name = tokens.next().unwrap_or_default();
        let args: Vec<String> = tokens.collect();

        if !self.dialect.supports(&name) {
            return writeln!(self.out, "Unrecognized command: {}", name);
        }

        match Command::parse(&name, &args).and_then(|cmd| self.execute(cmd)) {
            Ok(lines) => {
                for line in lines {
                    writeln!(self.out, "{}", line)?;
                }
                Ok(())
            }
            Err(ScriptError::Io(err)) => Err(err),
            Err(err) => {
                debug!("Command {} failed: {}", name, err);
                write!(self.out, "Exception while running command: {}", name)?;
                for arg in &args {
                    write!(self.out, " {}", arg)?;
                }
                writeln!(self.out)?;
                writeln!(self.out, "{}", err)
            }
        }
    }

    fn execute(&mut self, command: Command) -> Result<Vec<String>> {
        let line = match command {
            Command::CreateGraph { graph } => {
                self.graphs.insert(&graph, Graph::new());
                format!("created graph {}", graph)
            }
            Command::AddNode { graph, node } => {
                self.graphs.get_mut(&graph)?.add_node(Node::new(node.clone()));
                format!("added node {} to {}", node, graph)
            }
            Command::AddEdge {
                graph,
                parent,
                child,
                label,
            } => {
                let label = self.dialect.parse_label(&label)?;
                let shown = self.dialect.format_label(&label);
                self.graphs.get_mut(&graph)?.add_edge(
                    &Node::new(parent.clone()),
                    &Node::new(child.clone()),
                    label,
                )?;
                format!("added edge {} from {} to {} in {}", shown, parent, child, graph)
            }
            Command::ListNodes { graph } => {
                let mut nodes: Vec<_> = self.graphs.get(&graph)?.all_nodes().into_iter().collect();
                nodes.sort();
                let mut line = format!("{} contains:", graph);
                for node in nodes {
                    line.push(' ');
                    line.push_str(node.data());
                }
                line
            }
            Command::ListChildren { graph, parent } => {
                let edges = self
                    .graphs
                    .get(&graph)?
                    .sorted_edges(&Node::new(parent.clone()))?;
                let mut line = format!("the children of {} in {} are:", parent, graph);
                for edge in edges {
                    line.push_str(&format!(
                        " {}({})",
                        edge.target().data(),
                        self.dialect.format_label(edge.label())
                    ));
                }
                line
            }
            Command::LoadGraph { graph, file } => {
                let loaded = self.dialect.load_graph(&file)?;
                self.graphs.insert(&graph, loaded);
                format!("loaded graph {}", graph)
            }
            Command::FindPath { graph, start, dest } => {
                return self.find_path(&graph, &start, &dest);
            }
        };
        Ok(vec![line])
    }

    fn find_path(&self, graph: &str, start: &str, dest: &str) -> Result<Vec<String>> {
        let graph = self.graphs.get(graph)?;
        let from = Node::new(start.to_string());
        let to = Node::new(dest.to_string());

        let mut unknown = Vec::new();
        if !graph.contains_node(&from) {
            unknown.push(format!("unknown: {}", start));
        }
        if !graph.contains_node(&to) {
            unknown.push(format!("unknown: {}", dest));
        }
        if !unknown.is_empty() {
            return Ok(unknown);
        }

        let mut lines = vec![format!("path from {} to {}:", start, dest)];
        match self.dialect.find_path(graph, &from, &to)? {
            Some(hops) => lines.extend(hops),
            None => lines.push("no path found".to_string()),
        }
        Ok(lines)
    }
}
