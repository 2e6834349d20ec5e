//! Skeleton graphs and their fixed-gaps complement.

use std::{collections::HashMap, io, path::Path};

use petgraph::graph::{DiGraph, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use petgraph::EdgeType;

use super::Dataset;
use crate::error::{GiesError, Result};

/// Graph over dataset column names that restricts which edges the search may use.
#[derive(Debug, Clone)]
pub enum Skeleton {
    Undirected(UnGraph<String, ()>),
    Directed(DiGraph<String, ()>),
}

impl Skeleton {
    /// Read an edge list with a header row. The first two columns name the endpoints;
    /// any further columns (weights) are ignored.
    pub fn from_edge_list_path(path: impl AsRef<Path>, directed: bool) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_edge_list_reader(file, directed)
    }

    pub fn from_edge_list_reader<R: io::Read>(reader: R, directed: bool) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
        let mut edges = Vec::new();
        for record in rdr.records() {
            let record = record?;
            match (record.get(0), record.get(1)) {
                (Some(a), Some(b)) => edges.push((a.trim().to_string(), b.trim().to_string())),
                _ => {
                    return Err(GiesError::Dataset(format!(
                        "edge list line {} needs two endpoints",
                        record.position().map(|p| p.line()).unwrap_or(0)
                    )))
                }
            }
        }
        let pairs = edges.iter().map(|(a, b)| (a.as_str(), b.as_str()));
        Ok(if directed {
            Skeleton::Directed(build_graph(pairs))
        } else {
            Skeleton::Undirected(build_graph(pairs))
        })
    }

    pub fn is_directed(&self) -> bool {
        matches!(self, Skeleton::Directed(_))
    }
}

/// Build a graph from named endpoint pairs, one node per distinct name.
pub fn build_graph<'a, Ty: EdgeType>(
    edges: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> petgraph::Graph<String, (), Ty> {
    let mut graph = petgraph::Graph::<String, (), Ty>::default();
    let mut index: HashMap<String, NodeIndex> = HashMap::new();
    let mut node = |graph: &mut petgraph::Graph<String, (), Ty>, name: &str| {
        *index
            .entry(name.to_string())
            .or_insert_with(|| graph.add_node(name.to_string()))
    };
    for (a, b) in edges {
        let ia = node(&mut graph, a);
        let ib = node(&mut graph, b);
        graph.add_edge(ia, ib, ());
    }
    graph
}

/// Forget edge directions. Opposite edges collapse to the same adjacency.
pub fn to_undirected(graph: &DiGraph<String, ()>) -> UnGraph<String, ()> {
    graph.clone().into_edge_type()
}

/// Square 0/1 matrix in dataset column order; 1 marks a forbidden edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedGaps {
    cells: Vec<Vec<u8>>,
}

impl FixedGaps {
    /// Complement of the skeleton adjacency. The diagonal is 1 unless the
    /// skeleton carries a self loop on that node.
    pub fn from_skeleton(graph: &UnGraph<String, ()>, data: &Dataset) -> Result<Self> {
        let n = data.n_columns();
        let mut position = Vec::with_capacity(graph.node_count());
        for idx in graph.node_indices() {
            let name = &graph[idx];
            let col = data
                .column_index(name)
                .ok_or_else(|| GiesError::UnknownNode(name.clone()))?;
            position.push(col);
        }

        let mut cells = vec![vec![1u8; n]; n];
        for edge in graph.edge_references() {
            let i = position[edge.source().index()];
            let j = position[edge.target().index()];
            cells[i][j] = 0;
            cells[j][i] = 0;
        }
        Ok(Self { cells })
    }

    pub fn get(&self, i: usize, j: usize) -> u8 {
        self.cells[i][j]
    }

    pub fn rows(&self) -> &[Vec<u8>] {
        &self.cells
    }

    pub fn write_headerless(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(path)?;
        for row in &self.cells {
            wtr.write_record(row.iter().map(|v| v.to_string()))?;
        }
        wtr.flush()?;
        Ok(())
    }
}
