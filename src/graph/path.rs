//! Backward walk over an oracle's predecessor table.

use std::collections::HashMap;

use super::types::{Path, PredecessorEntry};

/// Rebuilds the path from `start` to `end` out of a predecessor table.
///
/// Walks from `end` towards `start` through `entry.predecessor.predecessor`
/// links. Returns the empty path when a vertex on the way has no entry or a
/// `None` predecessor; a partial path is never returned. `start == end`
/// yields `[start]`.
///
/// The walk is bounded by the table size, so a cyclic table also yields the
/// empty path instead of looping.
pub fn reconstruct_path(start: &str, end: &str, entries: &[PredecessorEntry]) -> Path {
	let table: HashMap<&str, &PredecessorEntry> =
		entries.iter().map(|e| (e.vertex.as_str(), e)).collect();

	let mut path = Vec::new();
	let mut current = end;
	while current != start {
		if path.len() > table.len() {
			return Path::empty();
		}
		let Some(link) = table.get(current).and_then(|e| e.predecessor.as_ref()) else {
			return Path::empty();
		};
		path.push(current.to_string());
		current = &link.predecessor;
	}
	path.push(start.to_string());
	path.reverse();
	Path::from(path)
}
