//! Result matrix parsing and relabeling onto column names.

use std::{io, path::Path};

use petgraph::graph::DiGraph;
use petgraph::visit::EdgeRef;
use serde::Serialize;

use crate::error::{GiesError, Result};

/// Square numeric matrix; a non-zero `(i, j)` is an edge `i -> j`.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjacencyMatrix {
    rows: Vec<Vec<f64>>,
}

impl AdjacencyMatrix {
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n = rows.len();
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != n) {
            return Err(GiesError::MalformedResult(format!(
                "row {} has {} entries in a {}x{} matrix",
                i,
                row.len(),
                n,
                n
            )));
        }
        Ok(Self { rows })
    }

    /// Read the matrix written by R's `write.csv`: one header line, then values.
    pub fn read_csv(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            let row = record
                .iter()
                .map(|v| {
                    v.trim()
                        .parse::<f64>()
                        .map_err(|_| GiesError::MalformedResult(format!("'{}' is not numeric", v)))
                })
                .collect::<Result<Vec<_>>>()?;
            rows.push(row);
        }
        Self::new(rows)
    }

    pub fn size(&self) -> usize {
        self.rows.len()
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.rows[i][j]
    }

    /// Directed graph whose node `k` is named `names[k]`. Correspondence is positional.
    pub fn relabel(&self, names: &[String]) -> Result<DiGraph<String, ()>> {
        if self.size() != names.len() {
            return Err(GiesError::MalformedResult(format!(
                "{}x{} matrix for {} columns",
                self.size(),
                self.size(),
                names.len()
            )));
        }
        let mut graph = DiGraph::with_capacity(names.len(), 0);
        let nodes = names
            .iter()
            .map(|n| graph.add_node(n.clone()))
            .collect::<Vec<_>>();
        for (i, row) in self.rows.iter().enumerate() {
            for (j, v) in row.iter().enumerate() {
                if *v != 0.0 {
                    graph.add_edge(nodes[i], nodes[j], ());
                }
            }
        }
        Ok(graph)
    }
}

/// Node and edge lists for JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphExport {
    pub nodes: Vec<String>,
    pub edges: Vec<(String, String)>,
}

impl From<&DiGraph<String, ()>> for GraphExport {
    fn from(graph: &DiGraph<String, ()>) -> Self {
        Self {
            nodes: graph.node_weights().cloned().collect(),
            edges: graph
                .edge_references()
                .map(|e| (graph[e.source()].clone(), graph[e.target()].clone()))
                .collect(),
        }
    }
}
