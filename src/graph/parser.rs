//! Tabular graph format.
//!
//! ```text
//! 3            <- node count N
//! a, 0, 0      <- N rows of `id, x, y`
//! b, 10, 0
//! c, 0, 10
//! 2            <- edge count M
//! a, b, 1.5    <- M rows of `source, target, weight`
//! b, c, 2
//! ```
//!
//! Blank lines are skipped and fields are trimmed. Row numbers in errors
//! count non-empty rows from zero, so the node count is row 0. Rows past the
//! declared edges are ignored.

use csv::{ReaderBuilder, StringRecord, Trim};
use log::debug;

use super::error::{FormatError, ParseError};
use super::types::{Edge, Graph, Node};

/// Parses `input` into a validated [`Graph`]. All or nothing.
///
/// # Errors
///
/// [`ParseError::Format`] for malformed rows and [`ParseError::Graph`] for
/// duplicate ids or edges that reference unknown nodes.
pub fn parse_graph(input: &str) -> Result<Graph, ParseError> {
	let rows = read_rows(input)?;
	if rows.len() < 2 {
		return Err(FormatError::InsufficientData.into());
	}

	let node_count = parse_count(&rows, 0, "Number of nodes")?;
	let node_rows = rows.get(1..).unwrap_or_default();
	if node_rows.len() < node_count.saturating_add(1) {
		return Err(FormatError::NotEnoughNodeData {
			declared: node_count,
			available: node_rows.len(),
		}
		.into());
	}

	let nodes = rows
		.iter()
		.enumerate()
		.skip(1)
		.take(node_count)
		.map(|(row, record)| parse_node(row, record))
		.collect::<Result<Vec<_>, _>>()?;

	let edge_count_row = node_count + 1;
	let edge_count = parse_count(&rows, edge_count_row, "Number of edges")?;
	let available = rows.len() - edge_count_row - 1;
	if available < edge_count {
		return Err(FormatError::NotEnoughEdgeData {
			declared: edge_count,
			available,
		}
		.into());
	}

	let edges = rows
		.iter()
		.enumerate()
		.skip(edge_count_row + 1)
		.take(edge_count)
		.map(|(row, record)| parse_edge(row, record))
		.collect::<Result<Vec<_>, _>>()?;

	debug!("parsed {} nodes and {} edges", nodes.len(), edges.len());
	Ok(Graph::new(nodes, edges)?)
}

fn read_rows(input: &str) -> Result<Vec<StringRecord>, FormatError> {
	let mut reader = ReaderBuilder::new()
		.has_headers(false)
		.flexible(true)
		.trim(Trim::All)
		.from_reader(input.as_bytes());

	let mut rows = Vec::new();
	for record in reader.records() {
		let record = record.map_err(|e| FormatError::Csv(e.to_string()))?;
		if record.iter().all(str::is_empty) {
			continue;
		}
		rows.push(record);
	}
	Ok(rows)
}

fn parse_count(rows: &[StringRecord], row: usize, context: &'static str) -> Result<usize, FormatError> {
	let value = rows.get(row).and_then(|r| r.get(0)).unwrap_or_default();
	value.parse().map_err(|_| FormatError::InvalidCount {
		context,
		value: value.to_string(),
	})
}

fn parse_node(row: usize, record: &StringRecord) -> Result<Node, FormatError> {
	let [id, x, y] = fields(record).ok_or(FormatError::ShortNodeRow { row })?;
	let id = parse_id(id, || format!("Node ID at row {row}"))?;
	let x = parse_float(x, || format!("X coordinate for node {id}"))?;
	let y = parse_float(y, || format!("Y coordinate for node {id}"))?;
	Ok(Node::at(id, x, y))
}

fn parse_edge(row: usize, record: &StringRecord) -> Result<Edge, FormatError> {
	let [source, target, weight] = fields(record).ok_or(FormatError::ShortEdgeRow { row })?;
	let source = parse_id(source, || format!("Source node at row {row}"))?;
	let target = parse_id(target, || format!("Target node at row {row}"))?;
	let weight = parse_float(weight, || format!("Edge weight at row {row}"))?;
	if weight < 0.0 {
		return Err(FormatError::NegativeWeight { row, value: weight });
	}
	Ok(Edge::new(source, target, weight))
}

fn fields(record: &StringRecord) -> Option<[&str; 3]> {
	Some([record.get(0)?, record.get(1)?, record.get(2)?])
}

fn parse_id(value: &str, context: impl FnOnce() -> String) -> Result<String, FormatError> {
	if value.is_empty() {
		return Err(FormatError::EmptyField { context: context() });
	}
	Ok(value.to_string())
}

fn parse_float(value: &str, context: impl FnOnce() -> String) -> Result<f64, FormatError> {
	match value.parse::<f64>() {
		Ok(v) if v.is_finite() => Ok(v),
		_ => Err(FormatError::InvalidFloat {
			context: context(),
			value: value.to_string(),
		}),
	}
}
