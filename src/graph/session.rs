//! The loaded graph together with its selection and highlighted path.
//!
//! Every transition is a single method call, so observers never see a graph
//! paired with a stale selection or path.

use std::sync::Arc;

use log::{info, warn};

use super::error::ReferenceError;
use super::selection::{ClickOutcome, Selection};
use super::types::{Graph, Path};

/// Ticket identifying one upload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UploadTicket(u64);

/// Hands out upload tickets; only the newest ticket may install a graph.
///
/// A ticket is superseded as soon as a newer upload begins, whether or not
/// the older one has finished.
#[derive(Clone, Debug, Default)]
pub struct UploadTracker {
	latest: u64,
}

impl UploadTracker {
	/// Starts an upload. Any earlier ticket is superseded.
	pub fn begin(&mut self) -> UploadTicket {
		self.latest += 1;
		UploadTicket(self.latest)
	}

	/// Whether `ticket` is still the newest upload.
	pub fn is_current(&self, ticket: UploadTicket) -> bool {
		if ticket.0 == self.latest {
			true
		} else {
			warn!("discarding superseded upload #{}", ticket.0);
			false
		}
	}
}

/// A path computation bound to the selection it was requested for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathRequest {
	/// Start vertex (first selected).
	pub start: String,
	/// End vertex (second selected).
	pub end: String,
	generation: u64,
	revision: u64,
}

/// Graph, selection and path as one atomic unit.
#[derive(Clone, Debug, Default)]
pub struct Session {
	graph: Option<Arc<Graph>>,
	generation: u64,
	selection: Selection,
	revision: u64,
	path: Path,
}

impl Session {
	/// The current graph, if one has been loaded.
	pub fn graph(&self) -> Option<&Arc<Graph>> {
		self.graph.as_ref()
	}

	/// Bumped every time a graph is installed.
	pub const fn generation(&self) -> u64 {
		self.generation
	}

	pub const fn selection(&self) -> &Selection {
		&self.selection
	}

	/// Highlighted path; empty when nothing is highlighted.
	pub const fn path(&self) -> &Path {
		&self.path
	}

	/// Replaces the graph, clearing selection and path.
	pub fn load(&mut self, graph: Graph) {
		info!(
			"loaded graph with {} nodes and {} edges",
			graph.nodes().len(),
			graph.edges().len()
		);
		self.graph = Some(Arc::new(graph));
		self.generation += 1;
		self.selection.clear();
		self.revision += 1;
		self.path = Path::empty();
	}

	/// What [`Session::click`] would do, without doing it.
	///
	/// # Errors
	///
	/// [`ReferenceError`] when `id` is not part of the loaded graph.
	pub fn probe_click(&self, id: &str) -> Result<ClickOutcome, ReferenceError> {
		self.check_vertex(id)?;
		Ok(self.selection.probe(id))
	}

	/// Applies a vertex click. Any change to the selection clears the path.
	///
	/// # Errors
	///
	/// [`ReferenceError`] when `id` is not part of the loaded graph.
	pub fn click(&mut self, id: &str) -> Result<ClickOutcome, ReferenceError> {
		self.check_vertex(id)?;
		let outcome = self.selection.toggle(id);
		if outcome.changed() {
			self.revision += 1;
			self.path = Path::empty();
		} else {
			warn!("ignoring click on '{id}': two nodes already selected");
		}
		Ok(outcome)
	}

	/// A request for the current anchors, once two vertices are selected.
	pub fn path_request(&self) -> Option<PathRequest> {
		let (start, end) = self.selection.endpoints()?;
		Some(PathRequest {
			start: start.to_string(),
			end: end.to_string(),
			generation: self.generation,
			revision: self.revision,
		})
	}

	/// Whether `request` still matches the current graph and selection.
	pub const fn is_fresh(&self, request: &PathRequest) -> bool {
		request.generation == self.generation && request.revision == self.revision
	}

	/// Installs the result of `request`. Returns `false` and changes nothing
	/// when the selection or graph changed after the request was made.
	pub fn apply_path(&mut self, request: &PathRequest, path: Path) -> bool {
		if !self.is_fresh(request) {
			warn!("discarding path for stale selection {} -> {}", request.start, request.end);
			return false;
		}
		self.path = path;
		true
	}

	fn check_vertex(&self, id: &str) -> Result<(), ReferenceError> {
		let graph = self.graph.as_ref().ok_or(ReferenceError::NoGraph)?;
		if graph.contains(id) {
			Ok(())
		} else {
			Err(ReferenceError::UnknownVertex { id: id.to_string() })
		}
	}
}
