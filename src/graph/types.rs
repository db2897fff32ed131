//! Plain data shared by the parser, layout, oracle and renderer.

use std::collections::HashMap;

use super::error::GraphError;

/// A 2-D position in canvas space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// Euclidean distance to `other`.
	pub fn distance(self, other: Point) -> f64 {
		(self.x - other.x).hypot(self.y - other.y)
	}
}

/// Viewport dimensions; drives the centering force and the canvas size.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
	pub width: f64,
	pub height: f64,
}

impl Bounds {
	pub const fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}

	/// Center of the viewport, the target of the centering force.
	pub fn center(self) -> Point {
		Point::new(self.width / 2.0, self.height / 2.0)
	}
}

/// A vertex. Coordinates are optional until the layout seeds them.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	/// Identifier, unique within a graph.
	pub id: String,
	/// Horizontal position, if known.
	pub x: Option<f64>,
	/// Vertical position, if known.
	pub y: Option<f64>,
}

impl Node {
	/// Creates a node without a position.
	pub fn new(id: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			x: None,
			y: None,
		}
	}

	/// Creates a node at a known position.
	pub fn at(id: impl Into<String>, x: f64, y: f64) -> Self {
		Self {
			id: id.into(),
			x: Some(x),
			y: Some(y),
		}
	}

	/// The node's position, when both coordinates are known.
	pub fn position(&self) -> Option<Point> {
		self.x.zip(self.y).map(|(x, y)| Point::new(x, y))
	}
}

/// A weighted connection, directed as stored (`source` to `target`).
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
	/// Id of the source node.
	pub source: String,
	/// Id of the target node.
	pub target: String,
	/// Non-negative weight.
	pub weight: f64,
}

impl Edge {
	pub fn new(source: impl Into<String>, target: impl Into<String>, weight: f64) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
			weight,
		}
	}
}

/// A validated graph: node ids are unique and every edge endpoint exists.
///
/// Node order is input order. Graphs are never edited in place; a new upload
/// replaces the whole value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Graph {
	nodes: Vec<Node>,
	edges: Vec<Edge>,
	index: HashMap<String, usize>,
}

impl Graph {
	/// Builds a graph, checking id uniqueness and edge cross-references.
	///
	/// # Errors
	///
	/// Returns [`GraphError::DuplicateNode`] when two nodes share an id and
	/// [`GraphError::DanglingEdge`] when an edge names an unknown node.
	pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Result<Self, GraphError> {
		let mut index = HashMap::with_capacity(nodes.len());
		for (i, node) in nodes.iter().enumerate() {
			if index.insert(node.id.clone(), i).is_some() {
				return Err(GraphError::DuplicateNode {
					id: node.id.clone(),
				});
			}
		}

		for (i, edge) in edges.iter().enumerate() {
			for id in [&edge.source, &edge.target] {
				if !index.contains_key(id) {
					return Err(GraphError::DanglingEdge {
						edge: i,
						id: id.clone(),
					});
				}
			}
		}

		Ok(Self {
			nodes,
			edges,
			index,
		})
	}

	/// Nodes in input order.
	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	/// Edges in input order.
	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	/// Position of the node with `id` in [`Graph::nodes`].
	pub fn node_index(&self, id: &str) -> Option<usize> {
		self.index.get(id).copied()
	}

	pub fn contains(&self, id: &str) -> bool {
		self.index.contains_key(id)
	}

	/// Index pairs `(source, target)` for every edge, in edge order.
	pub fn edge_indices(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
		self.edges.iter().filter_map(|edge| {
			Some((self.node_index(&edge.source)?, self.node_index(&edge.target)?))
		})
	}

	/// Largest edge weight, floored at 1 so scaling never degenerates.
	pub fn max_weight(&self) -> f64 {
		self.edges.iter().map(|e| e.weight).fold(1.0, f64::max)
	}

	/// Copy of this graph with node positions replaced by `positions`.
	///
	/// Nodes beyond the end of `positions` keep their current coordinates.
	pub fn with_positions(&self, positions: &[Point]) -> Self {
		let mut graph = self.clone();
		for (node, p) in graph.nodes.iter_mut().zip(positions) {
			node.x = Some(p.x);
			node.y = Some(p.y);
		}
		graph
	}
}

/// The `{predecessor, distance}` half of a [`PredecessorEntry`].
#[derive(Clone, Debug, PartialEq)]
pub struct Predecessor {
	/// Id of the vertex preceding the entry's vertex on a shortest path.
	pub predecessor: String,
	/// Cumulative distance from the source to the entry's vertex.
	pub distance: f64,
}

/// One row of an oracle's predecessor table.
#[derive(Clone, Debug, PartialEq)]
pub struct PredecessorEntry {
	/// The vertex this row describes.
	pub vertex: String,
	/// `None` for the source and for unreachable vertices.
	pub predecessor: Option<Predecessor>,
}

impl PredecessorEntry {
	/// Entry for the source vertex (or an unreachable one).
	pub fn root(vertex: impl Into<String>) -> Self {
		Self {
			vertex: vertex.into(),
			predecessor: None,
		}
	}

	/// Entry reached through `predecessor` at cumulative `distance`.
	pub fn via(vertex: impl Into<String>, predecessor: impl Into<String>, distance: f64) -> Self {
		Self {
			vertex: vertex.into(),
			predecessor: Some(Predecessor {
				predecessor: predecessor.into(),
				distance,
			}),
		}
	}
}

/// Ordered vertex ids from start to end inclusive. Empty means no path.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Path(Vec<String>);

impl Path {
	pub const fn empty() -> Self {
		Self(Vec::new())
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Vertex ids in walk order.
	pub fn vertices(&self) -> &[String] {
		&self.0
	}

	pub fn contains(&self, id: &str) -> bool {
		self.0.iter().any(|v| v == id)
	}

	/// Whether `source` is immediately followed by `target`. Order-sensitive.
	pub fn has_step(&self, source: &str, target: &str) -> bool {
		self.0.windows(2).any(|w| match w {
			[a, b] => a == source && b == target,
			_ => false,
		})
	}
}

impl From<Vec<String>> for Path {
	fn from(vertices: Vec<String>) -> Self {
		Self(vertices)
	}
}
