//! Error taxonomy for the graph core.

use thiserror::Error;

/// Malformed input rows. Always fatal to the current parse.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum FormatError {
	/// Fewer than two non-empty rows.
	#[error("Invalid CSV format: Insufficient data")]
	InsufficientData,

	/// A count row that is not a non-negative integer.
	#[error("Invalid number for {context}: {value}")]
	InvalidCount {
		/// Which count ("Number of nodes", "Number of edges").
		context: &'static str,
		value: String,
	},

	/// Fewer node rows than the node count declares.
	#[error("Invalid CSV format: Not enough node data (declared {declared} nodes plus an edge count, found {available} rows)")]
	NotEnoughNodeData {
		declared: usize,
		/// Rows present after the node count.
		available: usize,
	},

	/// Fewer edge rows than the edge count declares.
	#[error("Invalid CSV format: Not enough edge data (declared {declared} edges, found {available})")]
	NotEnoughEdgeData {
		declared: usize,
		/// Edge rows actually present.
		available: usize,
	},

	/// A node row with fewer than three fields.
	#[error("Invalid node data at row {row}")]
	ShortNodeRow {
		/// Zero-based index among non-empty rows.
		row: usize,
	},

	/// An edge row with fewer than three fields.
	#[error("Invalid edge data at row {row}")]
	ShortEdgeRow {
		/// Zero-based index among non-empty rows.
		row: usize,
	},

	/// A coordinate or weight that is not a finite number.
	#[error("Invalid float for {context}: {value}")]
	InvalidFloat {
		/// Which field, e.g. "X coordinate for node a".
		context: String,
		value: String,
	},

	/// An empty id field.
	#[error("Invalid string for {context}")]
	EmptyField {
		/// Which field, e.g. "Node ID at row 2".
		context: String,
	},

	/// A weight below zero.
	#[error("Negative edge weight at row {row}: {value}")]
	NegativeWeight {
		/// Zero-based index among non-empty rows.
		row: usize,
		value: f64,
	},

	/// The tabular reader itself failed (bad quoting, invalid UTF-8).
	#[error("Invalid CSV: {0}")]
	Csv(String),
}

/// Cross-reference violations in otherwise well-formed rows.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GraphError {
	/// Two nodes share an id.
	#[error("Duplicate node id '{id}'")]
	DuplicateNode {
		id: String,
	},

	/// An edge endpoint that names no node.
	#[error("Edge {edge} references unknown node '{id}'")]
	DanglingEdge {
		/// Zero-based edge index.
		edge: usize,
		id: String,
	},
}

/// Everything [`parse_graph`](super::parse_graph) can fail with.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ParseError {
	#[error(transparent)]
	Format(#[from] FormatError),
	#[error(transparent)]
	Graph(#[from] GraphError),
}

/// A selection or path that names a vertex outside the current graph.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ReferenceError {
	/// No graph is loaded.
	#[error("no graph is loaded")]
	NoGraph,
	/// The vertex is not part of the loaded graph.
	#[error("vertex '{id}' is not part of the current graph")]
	UnknownVertex {
		id: String,
	},
}

/// Failures of the shortest-path oracle, reported to the user.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum OracleError {
	/// The source vertex is not in the graph the oracle was built from.
	#[error("unknown source vertex '{id}'")]
	UnknownSource {
		id: String,
	},
	/// The oracle returned data that cannot be interpreted.
	#[error("malformed oracle output: {0}")]
	Malformed(String),
	/// The computation itself failed.
	#[error("shortest path computation failed: {0}")]
	Failed(String),
}

/// Misuse of the layout scheduler.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
	/// The handle was never issued or has been stopped.
	#[error("unknown simulation handle {0}")]
	UnknownHandle(u64),
}
