//! Shortest-path oracle capability.
//!
//! The core only consumes predecessor tables; anything that can produce one
//! for a source vertex satisfies [`ShortestPathOracle`].

use std::collections::{HashMap, HashSet};

use log::{info, warn};
use petgraph::algo::bellman_ford;
use petgraph::graph::{DiGraph, NodeIndex};

use super::error::OracleError;
use super::path::reconstruct_path;
use super::types::{Graph, Path, PredecessorEntry};

/// Produces a predecessor table for a source vertex.
pub trait ShortestPathOracle {
	/// Shortest-path predecessors of every vertex reachable from `source`.
	///
	/// Unreachable vertices may be omitted or carry a `None` predecessor.
	///
	/// # Errors
	///
	/// Any [`OracleError`]; callers surface it to the user and keep their
	/// graph and selection intact.
	fn solve_from(&self, source: &str) -> Result<Vec<PredecessorEntry>, OracleError>;
}

/// In-process oracle over a `petgraph` digraph with edges directed as stored.
#[derive(Clone, Debug)]
pub struct PetgraphOracle {
	graph: DiGraph<String, f64>,
	lookup: HashMap<String, NodeIndex>,
}

impl PetgraphOracle {
	/// Builds the oracle's own copy of `graph`.
	pub fn new(graph: &Graph) -> Self {
		let mut digraph = DiGraph::with_capacity(graph.nodes().len(), graph.edges().len());
		let mut lookup = HashMap::with_capacity(graph.nodes().len());
		for node in graph.nodes() {
			let idx = digraph.add_node(node.id.clone());
			lookup.insert(node.id.clone(), idx);
		}
		for edge in graph.edges() {
			if let (Some(&src), Some(&tgt)) = (lookup.get(&edge.source), lookup.get(&edge.target)) {
				digraph.add_edge(src, tgt, edge.weight);
			}
		}
		Self {
			graph: digraph,
			lookup,
		}
	}
}

impl ShortestPathOracle for PetgraphOracle {
	fn solve_from(&self, source: &str) -> Result<Vec<PredecessorEntry>, OracleError> {
		let &start = self.lookup.get(source).ok_or_else(|| OracleError::UnknownSource {
			id: source.to_string(),
		})?;
		let paths = bellman_ford(&self.graph, start)
			.map_err(|_| OracleError::Failed("graph contains a negative cycle".into()))?;

		let entries = self
			.graph
			.node_indices()
			.filter_map(|idx| {
				let vertex = self.graph.node_weight(idx)?.clone();
				if idx == start {
					return Some(PredecessorEntry::root(vertex));
				}
				let pred = (*paths.predecessors.get(idx.index())?)?;
				let distance = *paths.distances.get(idx.index())?;
				Some(PredecessorEntry::via(vertex, self.graph.node_weight(pred)?.clone(), distance))
			})
			.collect();
		Ok(entries)
	}
}

/// Checks that every vertex an oracle mentions exists in `graph` and that no
/// vertex has two entries.
///
/// # Errors
///
/// [`OracleError::Malformed`] describing the first offending entry.
pub fn validate_entries(graph: &Graph, entries: &[PredecessorEntry]) -> Result<(), OracleError> {
	let mut seen = HashSet::with_capacity(entries.len());
	for entry in entries {
		if !graph.contains(&entry.vertex) {
			return Err(OracleError::Malformed(format!("unknown vertex '{}'", entry.vertex)));
		}
		if !seen.insert(entry.vertex.as_str()) {
			return Err(OracleError::Malformed(format!(
				"duplicate entry for vertex '{}'",
				entry.vertex
			)));
		}
		if let Some(link) = &entry.predecessor {
			if !graph.contains(&link.predecessor) {
				return Err(OracleError::Malformed(format!(
					"vertex '{}' has unknown predecessor '{}'",
					entry.vertex, link.predecessor
				)));
			}
		}
	}
	Ok(())
}

/// Asks `oracle` for a table rooted at `start` and walks it back from `end`.
///
/// An unreachable `end` is not an error; it yields the empty path.
///
/// # Errors
///
/// Whatever the oracle fails with, or [`OracleError::Malformed`] when its
/// output does not fit `graph`.
pub fn solve_path(
	oracle: &dyn ShortestPathOracle,
	graph: &Graph,
	start: &str,
	end: &str,
) -> Result<Path, OracleError> {
	let entries = oracle.solve_from(start)?;
	validate_entries(graph, &entries)?;
	let path = reconstruct_path(start, end, &entries);
	if path.is_empty() {
		warn!("no path from {start} to {end}");
	} else {
		info!("shortest path {start} -> {end}: {}", path.vertices().join(" -> "));
	}
	Ok(path)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::types::{Edge, Node};

	fn diamond() -> Graph {
		Graph::new(
			["A", "B", "C", "D", "E"].into_iter().map(Node::new).collect(),
			vec![
				Edge::new("A", "B", 1.0),
				Edge::new("A", "C", 4.0),
				Edge::new("B", "C", 1.0),
				Edge::new("C", "D", 1.0),
				Edge::new("B", "D", 5.0),
			],
		)
		.unwrap()
	}

	fn ids(path: &Path) -> Vec<&str> {
		path.vertices().iter().map(String::as_str).collect()
	}

	struct Broken;

	impl ShortestPathOracle for Broken {
		fn solve_from(&self, _: &str) -> Result<Vec<PredecessorEntry>, OracleError> {
			Err(OracleError::Failed("module not loaded".into()))
		}
	}

	struct Lying;

	impl ShortestPathOracle for Lying {
		fn solve_from(&self, source: &str) -> Result<Vec<PredecessorEntry>, OracleError> {
			Ok(vec![
				PredecessorEntry::root(source),
				PredecessorEntry::via("ghost", source, 1.0),
			])
		}
	}

	#[test]
	fn table_has_source_and_reachable_vertices() {
		let entries = PetgraphOracle::new(&diamond()).solve_from("A").unwrap();
		let source = entries.iter().find(|e| e.vertex == "A").unwrap();
		assert_eq!(source.predecessor, None);

		let d = entries.iter().find(|e| e.vertex == "D").unwrap();
		let link = d.predecessor.as_ref().unwrap();
		assert_eq!(link.predecessor, "C");
		assert_eq!(link.distance, 3.0);

		assert!(entries.iter().all(|e| e.vertex != "E"));
	}

	#[test]
	fn finds_cheapest_path() {
		let graph = diamond();
		let path = solve_path(&PetgraphOracle::new(&graph), &graph, "A", "D").unwrap();
		assert_eq!(ids(&path), ["A", "B", "C", "D"]);
	}

	#[test]
	fn edges_are_directed_as_stored() {
		let graph = diamond();
		let path = solve_path(&PetgraphOracle::new(&graph), &graph, "D", "A").unwrap();
		assert!(path.is_empty());
	}

	#[test]
	fn unreachable_is_empty_not_an_error() {
		let graph = diamond();
		let path = solve_path(&PetgraphOracle::new(&graph), &graph, "A", "E").unwrap();
		assert!(path.is_empty());
	}

	#[test]
	fn unknown_source_is_reported() {
		let err = PetgraphOracle::new(&diamond()).solve_from("Z").unwrap_err();
		assert_eq!(err, OracleError::UnknownSource { id: "Z".into() });
	}

	#[test]
	fn oracle_failures_propagate() {
		let err = solve_path(&Broken, &diamond(), "A", "D").unwrap_err();
		assert!(matches!(err, OracleError::Failed(_)));
	}

	#[test]
	fn malformed_tables_are_rejected() {
		let err = solve_path(&Lying, &diamond(), "A", "D").unwrap_err();
		assert!(matches!(err, OracleError::Malformed(_)));

		let duplicated = vec![PredecessorEntry::root("A"), PredecessorEntry::root("A")];
		assert!(validate_entries(&diamond(), &duplicated).is_err());
	}
}
