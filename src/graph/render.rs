//! Declarative drawing.
//!
//! [`render`] turns the current state into a flat list of [`DrawCommand`]s.
//! It holds no state of its own; the canvas just replays the list.

use super::layout::Frame;
use super::selection::Selection;
use super::types::{Bounds, Graph, Path, Point};

/// Colors and sizes used by [`render`].
#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
	pub background: String,
	/// Fill for selected nodes and path nodes, stroke for path edges.
	pub highlight: String,
	/// Fill for all other nodes.
	pub node: String,
	/// Stroke for all other edges.
	pub edge: String,
	pub label: String,
	pub node_radius: f64,
	pub edge_width: f64,
	/// Label font size in pixels.
	pub label_size: f64,
	/// Label offset from the node center.
	pub label_offset: Point,
}

impl Default for Theme {
	fn default() -> Self {
		Self {
			background: "#111110".into(),
			highlight: "#EF5F00".into(),
			node: "#63635E".into(),
			edge: "#BCBBB5".into(),
			label: "#FFFFFF".into(),
			node_radius: 10.0,
			edge_width: 1.0,
			label_size: 12.0,
			label_offset: Point::new(12.0, 4.0),
		}
	}
}

/// One primitive for the canvas.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
	/// Fill the whole viewport.
	Clear {
		/// Viewport size.
		bounds: Bounds,
		/// Fill color.
		color: String,
	},
	/// A straight edge.
	Line {
		/// Source end.
		from: Point,
		/// Target end.
		to: Point,
		/// Stroke color.
		color: String,
		/// Stroke width.
		width: f64,
	},
	/// A filled node circle.
	Circle {
		/// Index of the node in the graph.
		node: usize,
		/// Circle center.
		center: Point,
		/// Circle radius.
		radius: f64,
		/// Fill color.
		color: String,
	},
	/// A node label.
	Text {
		/// Baseline origin.
		at: Point,
		/// Label text.
		text: String,
		/// Fill color.
		color: String,
		/// Font size in pixels.
		size: f64,
	},
}

/// Draw list for `graph` laid out as `frame`.
///
/// Edges first, then nodes, then labels. A node is highlighted when it lies
/// on `path` or is selected; an edge is highlighted only when its source is
/// immediately followed by its target in `path`.
pub fn render(
	graph: &Graph,
	frame: &Frame,
	selection: &Selection,
	path: &Path,
	bounds: Bounds,
	theme: &Theme,
) -> Vec<DrawCommand> {
	let mut commands = Vec::with_capacity(1 + graph.edges().len() + 2 * graph.nodes().len());
	commands.push(DrawCommand::Clear {
		bounds,
		color: theme.background.clone(),
	});

	for (edge, segment) in graph.edges().iter().zip(&frame.edges) {
		let color = if path.has_step(&edge.source, &edge.target) {
			&theme.highlight
		} else {
			&theme.edge
		};
		commands.push(DrawCommand::Line {
			from: segment.from,
			to: segment.to,
			color: color.clone(),
			width: theme.edge_width,
		});
	}

	for (i, (node, &center)) in graph.nodes().iter().zip(&frame.nodes).enumerate() {
		let color = if path.contains(&node.id) || selection.contains(&node.id) {
			&theme.highlight
		} else {
			&theme.node
		};
		commands.push(DrawCommand::Circle {
			node: i,
			center,
			radius: theme.node_radius,
			color: color.clone(),
		});
	}

	for (node, center) in graph.nodes().iter().zip(&frame.nodes) {
		commands.push(DrawCommand::Text {
			at: Point::new(center.x + theme.label_offset.x, center.y + theme.label_offset.y),
			text: node.id.clone(),
			color: theme.label.clone(),
			size: theme.label_size,
		});
	}

	commands
}

/// Index of the top-most node whose circle contains `point`.
pub fn node_at(frame: &Frame, point: Point, radius: f64) -> Option<usize> {
	frame
		.nodes
		.iter()
		.enumerate()
		.rev()
		.find(|(_, p)| p.distance(point) <= radius)
		.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::layout::Segment;
	use crate::graph::types::{Edge, Node};

	fn graph() -> Graph {
		Graph::new(
			vec![
				Node::at("A", 0.0, 0.0),
				Node::at("B", 50.0, 0.0),
				Node::at("C", 100.0, 0.0),
				Node::at("D", 0.0, 50.0),
			],
			vec![
				Edge::new("A", "B", 1.0),
				Edge::new("B", "C", 1.0),
				Edge::new("C", "B", 1.0),
				Edge::new("A", "D", 1.0),
			],
		)
		.unwrap()
	}

	fn frame(graph: &Graph) -> Frame {
		let nodes: Vec<Point> = graph.nodes().iter().filter_map(Node::position).collect();
		let edges = graph
			.edge_indices()
			.map(|(s, t)| Segment {
				from: nodes[s],
				to: nodes[t],
			})
			.collect();
		Frame {
			nodes,
			edges,
			alpha: 1.0,
		}
	}

	fn path(ids: &[&str]) -> Path {
		Path::from(ids.iter().map(|s| s.to_string()).collect::<Vec<_>>())
	}

	fn node_colors(commands: &[DrawCommand]) -> Vec<&str> {
		commands
			.iter()
			.filter_map(|c| match c {
				DrawCommand::Circle { color, .. } => Some(color.as_str()),
				_ => None,
			})
			.collect()
	}

	fn edge_colors(commands: &[DrawCommand]) -> Vec<&str> {
		commands
			.iter()
			.filter_map(|c| match c {
				DrawCommand::Line { color, .. } => Some(color.as_str()),
				_ => None,
			})
			.collect()
	}

	#[test]
	fn plain_graph_uses_default_colors() {
		let g = graph();
		let theme = Theme::default();
		let commands = render(&g, &frame(&g), &Selection::default(), &Path::empty(), Bounds::new(10.0, 10.0), &theme);
		assert!(matches!(commands[0], DrawCommand::Clear { .. }));
		assert!(node_colors(&commands).iter().all(|c| *c == theme.node));
		assert!(edge_colors(&commands).iter().all(|c| *c == theme.edge));
		assert_eq!(commands.len(), 1 + 4 + 4 + 4);
	}

	#[test]
	fn selected_nodes_are_highlighted() {
		let g = graph();
		let theme = Theme::default();
		let mut selection = Selection::default();
		selection.toggle("C");
		let commands = render(&g, &frame(&g), &selection, &Path::empty(), Bounds::default(), &theme);
		let (h, n) = (theme.highlight.as_str(), theme.node.as_str());
		assert_eq!(node_colors(&commands), [n, n, h, n]);
	}

	#[test]
	fn path_edges_are_order_sensitive() {
		let g = graph();
		let theme = Theme::default();
		let commands = render(&g, &frame(&g), &Selection::default(), &path(&["A", "B", "C"]), Bounds::default(), &theme);
		let (h, e, n) = (theme.highlight.as_str(), theme.edge.as_str(), theme.node.as_str());
		// C -> B is stored against the walk direction and stays plain.
		assert_eq!(edge_colors(&commands), [h, h, e, e]);
		assert_eq!(node_colors(&commands), [h, h, h, n]);
	}

	#[test]
	fn labels_follow_nodes() {
		let g = graph();
		let commands = render(&g, &frame(&g), &Selection::default(), &Path::empty(), Bounds::default(), &Theme::default());
		let labels: Vec<_> = commands
			.iter()
			.filter_map(|c| match c {
				DrawCommand::Text { at, text, .. } => Some((text.as_str(), *at)),
				_ => None,
			})
			.collect();
		assert_eq!(labels[1], ("B", Point::new(62.0, 4.0)));
	}

	#[test]
	fn hit_testing() {
		let g = graph();
		let f = frame(&g);
		assert_eq!(node_at(&f, Point::new(48.0, 3.0), 10.0), Some(1));
		assert_eq!(node_at(&f, Point::new(25.0, 25.0), 10.0), None);
	}
}
