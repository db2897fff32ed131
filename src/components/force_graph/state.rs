use std::sync::Arc;

use crate::graph::{
	Bounds, Frame, Graph, LayoutConfig, Point, SimulationHandle, SimulationScheduler, node_at,
};

/// Layout bookkeeping behind the canvas: which simulation is live and which
/// graph it belongs to.
pub struct CanvasState {
	pub scheduler: SimulationScheduler,
	pub width: f64,
	pub height: f64,
	node_radius: f64,
	handle: Option<SimulationHandle>,
	generation: Option<u64>,
	graph: Option<Arc<Graph>>,
}

impl CanvasState {
	pub fn new(config: LayoutConfig, node_radius: f64) -> Self {
		Self {
			scheduler: SimulationScheduler::new(config),
			width: 0.0,
			height: 0.0,
			node_radius,
			handle: None,
			generation: None,
			graph: None,
		}
	}

	/// Tears down the live simulation and starts a new one for `loaded`.
	///
	/// Restarting the same graph generation resumes from the positions the
	/// old simulation reached; a new generation starts from the file's
	/// coordinates.
	pub fn restart(&mut self, loaded: Option<(u64, Arc<Graph>)>, bounds: Bounds) -> Option<SimulationHandle> {
		let previous = self.handle.take().and_then(|h| self.scheduler.stop(h));
		self.resize(bounds.width, bounds.height);

		let Some((generation, graph)) = loaded else {
			self.generation = None;
			self.graph = None;
			return None;
		};

		let seeded = match previous {
			Some(frame) if self.generation == Some(generation) => graph.with_positions(&frame.nodes),
			_ => (*graph).clone(),
		};
		let handle = self.scheduler.start(&seeded, bounds);
		self.handle = Some(handle);
		self.generation = Some(generation);
		self.graph = Some(graph);
		Some(handle)
	}

	pub fn frame(&self) -> Option<Frame> {
		self.scheduler.frame(self.handle?)
	}

	/// Id of the node under canvas point `(x, y)`.
	pub fn node_at_position(&self, x: f64, y: f64) -> Option<&str> {
		let frame = self.frame()?;
		let idx = node_at(&frame, Point::new(x, y), self.node_radius)?;
		self.graph.as_ref()?.nodes().get(idx).map(|n| n.id.as_str())
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::{Edge, Node};

	fn graph() -> Arc<Graph> {
		Arc::new(
			Graph::new(
				vec![Node::at("a", 100.0, 100.0), Node::at("b", 300.0, 100.0)],
				vec![Edge::new("a", "b", 1.0)],
			)
			.unwrap(),
		)
	}

	#[test]
	fn same_generation_resumes_positions() {
		let mut state = CanvasState::new(LayoutConfig::default(), 10.0);
		let bounds = Bounds::new(400.0, 200.0);
		state.restart(Some((1, graph())), bounds);
		for _ in 0..20 {
			state.scheduler.step();
		}
		let moved = state.frame().unwrap().nodes;

		state.restart(Some((1, graph())), bounds);
		assert_eq!(state.frame().unwrap().nodes, moved);

		state.restart(Some((2, graph())), bounds);
		assert_eq!(state.frame().unwrap().nodes[0], Point::new(100.0, 100.0));
	}

	#[test]
	fn no_graph_means_no_simulation() {
		let mut state = CanvasState::new(LayoutConfig::default(), 10.0);
		state.restart(Some((1, graph())), Bounds::new(400.0, 200.0));
		assert!(state.restart(None, Bounds::new(400.0, 200.0)).is_none());
		assert!(state.frame().is_none());
		assert_eq!(state.scheduler.step(), 0);
	}

	#[test]
	fn hit_tests_against_live_frame() {
		let mut state = CanvasState::new(LayoutConfig::default(), 10.0);
		state.restart(Some((1, graph())), Bounds::new(400.0, 200.0));
		assert_eq!(state.node_at_position(305.0, 95.0), Some("b"));
		assert_eq!(state.node_at_position(200.0, 180.0), None);
		assert_eq!((state.width, state.height), (400.0, 200.0));
	}
}
