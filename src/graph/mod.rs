//! Graph model for the event generator.
//!
//! Undirected graphs held as adjacency maps keyed by node name. Precomputed
//! graphs load from JSON adjacency files; the three shapes the experiments
//! use (complete, path, triangular lattice) can also be built directly.

pub mod events;

pub use events::{synthesize, write_events_json, EventOptions, SenseEvent};

use anyhow::{anyhow, Result};
use std::collections::BTreeMap;
use std::path::Path;

/// Undirected graph as an adjacency map.
///
/// Node order and neighbor order are deterministic: nodes sort by name,
/// neighbors keep insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Graph {
    adjacency: BTreeMap<String, Vec<String>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node with no neighbors (idempotent).
    pub fn add_node(&mut self, node: impl Into<String>) {
        self.adjacency.entry(node.into()).or_default();
    }

    /// Insert an undirected edge, both endpoints created as needed.
    /// Duplicate edges and self-loops are ignored.
    pub fn add_edge(&mut self, a: impl Into<String>, b: impl Into<String>) {
        let a = a.into();
        let b = b.into();
        if a == b {
            return;
        }
        let forward = self.adjacency.entry(a.clone()).or_default();
        if !forward.contains(&b) {
            forward.push(b.clone());
        }
        let backward = self.adjacency.entry(b).or_default();
        if !backward.contains(&a) {
            backward.push(a);
        }
    }

    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.adjacency.keys().map(String::as_str)
    }

    pub fn neighbors(&self, node: &str) -> &[String] {
        self.adjacency
            .get(node)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum::<usize>() / 2
    }

    /// Complete graph on `n` nodes named `0..n`.
    pub fn complete(n: usize) -> Self {
        let mut graph = Self::new();
        for i in 0..n {
            graph.add_node(i.to_string());
            for j in (i + 1)..n {
                graph.add_edge(i.to_string(), j.to_string());
            }
        }
        graph
    }

    /// Path graph on `n` nodes named `0..n`.
    pub fn path(n: usize) -> Self {
        let mut graph = Self::new();
        for i in 0..n {
            graph.add_node(i.to_string());
            if i + 1 < n {
                graph.add_edge(i.to_string(), (i + 1).to_string());
            }
        }
        graph
    }

    /// Triangular lattice on a `cols` x `rows` grid of points.
    ///
    /// Each grid square carries one diagonal, so every interior cell is a
    /// pair of triangles. Nodes are named `(i, j)` after their grid
    /// coordinates.
    pub fn triangular_lattice(rows: usize, cols: usize) -> Self {
        let name = |i: usize, j: usize| format!("({}, {})", i, j);
        let mut graph = Self::new();
        for j in 0..rows {
            for i in 0..cols {
                graph.add_node(name(i, j));
                if i + 1 < cols {
                    graph.add_edge(name(i, j), name(i + 1, j));
                }
                if j + 1 < rows {
                    graph.add_edge(name(i, j), name(i, j + 1));
                }
                if i + 1 < cols && j + 1 < rows {
                    graph.add_edge(name(i, j), name(i + 1, j + 1));
                }
            }
        }
        graph
    }

    /// Parse a JSON adjacency map (`{"node": ["neighbor", ...], ...}`).
    ///
    /// Edges are symmetrized: listing a neighbor on either side is enough.
    pub fn from_adjacency_json(raw: &str) -> Result<Self> {
        let adjacency: BTreeMap<String, Vec<String>> =
            serde_json::from_str(raw).map_err(|e| anyhow!("invalid adjacency JSON: {}", e))?;
        let mut graph = Self::new();
        for (node, neighbors) in adjacency {
            graph.add_node(node.clone());
            for neighbor in neighbors {
                graph.add_edge(node.clone(), neighbor);
            }
        }
        Ok(graph)
    }

    /// Load a precomputed graph from a JSON adjacency file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow!("failed to read graph file {}: {}", path.display(), e))?;
        Self::from_adjacency_json(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_graph_connects_every_pair() {
        let graph = Graph::complete(4);
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 6);
        for node in graph.nodes() {
            assert_eq!(graph.neighbors(node).len(), 3);
        }
    }

    #[test]
    fn path_graph_is_a_chain() {
        let graph = Graph::path(10);
        assert_eq!(graph.node_count(), 10);
        assert_eq!(graph.edge_count(), 9);
        assert_eq!(graph.neighbors("0").len(), 1);
        assert_eq!(graph.neighbors("5").len(), 2);
    }

    #[test]
    fn triangular_lattice_has_diagonals() {
        let graph = Graph::triangular_lattice(2, 2);
        assert_eq!(graph.node_count(), 4);
        // square edges plus one diagonal
        assert_eq!(graph.edge_count(), 5);
        assert!(graph.neighbors("(0, 0)").contains(&"(1, 1)".to_string()));
    }

    #[test]
    fn edges_are_undirected_and_deduplicated() {
        let mut graph = Graph::new();
        graph.add_edge("a", "b");
        graph.add_edge("b", "a");
        graph.add_edge("a", "a");
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.neighbors("b"), &["a".to_string()]);
    }

    #[test]
    fn adjacency_json_round_trips_symmetrized() -> Result<()> {
        let graph = Graph::from_adjacency_json(r#"{"a": ["b", "c"], "b": [], "c": []}"#)?;
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.neighbors("b"), &["a".to_string()]);
        Ok(())
    }

    #[test]
    fn adjacency_json_rejects_garbage() {
        assert!(Graph::from_adjacency_json("[1, 2]").is_err());
    }
}
