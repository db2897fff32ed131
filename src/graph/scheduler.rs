//! Explicit driver for layout simulations.
//!
//! Nothing here owns a timer. The host calls [`SimulationScheduler::step`]
//! once per animation frame; each running simulation advances one tick and
//! its tick callbacks receive the new [`Frame`].
//!
//! Callbacks run while the scheduler is mutably borrowed and must not call
//! back into it.

use std::collections::BTreeMap;
use std::fmt;

use log::{debug, info};

use super::error::LayoutError;
use super::layout::{Frame, LayoutConfig, Simulation};
use super::types::{Bounds, Graph};

/// Identifies a simulation started by a [`SimulationScheduler`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SimulationHandle(u64);

type TickCallback = Box<dyn FnMut(&Frame)>;

struct Slot {
	simulation: Simulation,
	callbacks: Vec<TickCallback>,
}

/// Starts, steps and stops layout simulations.
pub struct SimulationScheduler {
	config: LayoutConfig,
	next_id: u64,
	slots: BTreeMap<u64, Slot>,
}

impl fmt::Debug for SimulationScheduler {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SimulationScheduler")
			.field("config", &self.config)
			.field("running", &self.slots.keys().collect::<Vec<_>>())
			.finish()
	}
}

impl SimulationScheduler {
	/// Creates a scheduler whose simulations use `config`.
	pub const fn new(config: LayoutConfig) -> Self {
		Self {
			config,
			next_id: 0,
			slots: BTreeMap::new(),
		}
	}

	/// Starts a fresh simulation of `graph` inside `bounds`.
	pub fn start(&mut self, graph: &Graph, bounds: Bounds) -> SimulationHandle {
		self.next_id += 1;
		let id = self.next_id;
		self.slots.insert(
			id,
			Slot {
				simulation: Simulation::new(graph, bounds, self.config),
				callbacks: Vec::new(),
			},
		);
		info!(
			"started layout #{id} for {} nodes in {}x{}",
			graph.nodes().len(),
			bounds.width,
			bounds.height
		);
		SimulationHandle(id)
	}

	/// Tears down a simulation and returns its last frame.
	///
	/// Stopping an unknown or already stopped handle returns `None`.
	pub fn stop(&mut self, handle: SimulationHandle) -> Option<Frame> {
		let slot = self.slots.remove(&handle.0)?;
		debug!("stopped layout #{}", handle.0);
		Some(slot.simulation.frame())
	}

	/// Registers `callback` to receive every subsequent frame of `handle`.
	///
	/// # Errors
	///
	/// [`LayoutError::UnknownHandle`] when `handle` is not running.
	pub fn on_tick(
		&mut self,
		handle: SimulationHandle,
		callback: impl FnMut(&Frame) + 'static,
	) -> Result<(), LayoutError> {
		let slot = self
			.slots
			.get_mut(&handle.0)
			.ok_or(LayoutError::UnknownHandle(handle.0))?;
		slot.callbacks.push(Box::new(callback));
		Ok(())
	}

	/// Current frame of `handle`, without advancing it.
	pub fn frame(&self, handle: SimulationHandle) -> Option<Frame> {
		self.slots.get(&handle.0).map(|s| s.simulation.frame())
	}

	/// Whether `handle` exists and has not cooled down yet.
	pub fn is_running(&self, handle: SimulationHandle) -> bool {
		self.slots
			.get(&handle.0)
			.is_some_and(|s| s.simulation.is_running())
	}

	/// Advances every running simulation by one tick and notifies its
	/// callbacks. Returns how many simulations ticked.
	pub fn step(&mut self) -> usize {
		let mut ticked = 0;
		for (id, slot) in &mut self.slots {
			if !slot.simulation.tick() {
				continue;
			}
			ticked += 1;
			let frame = slot.simulation.frame();
			for callback in &mut slot.callbacks {
				callback(&frame);
			}
			if !slot.simulation.is_running() {
				debug!("layout #{id} cooled down");
			}
		}
		ticked
	}
}

impl Default for SimulationScheduler {
	fn default() -> Self {
		Self::new(LayoutConfig::default())
	}
}
