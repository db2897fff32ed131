//! Toggle-selection of up to two path anchors.

use super::notice::Notice;

/// What a click did to the selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
	/// The vertex was appended.
	Selected,
	/// The vertex was already selected and has been removed.
	Deselected,
	/// Two other vertices are already selected; nothing changed.
	Rejected,
}

impl ClickOutcome {
	/// Whether the selection changed.
	pub const fn changed(self) -> bool {
		!matches!(self, Self::Rejected)
	}

	/// The notice to surface for this outcome, if any.
	pub const fn notice(self) -> Option<Notice> {
		match self {
			Self::Rejected => Some(Notice::SelectionLimit),
			Self::Selected | Self::Deselected => None,
		}
	}
}

/// Ordered selection of at most [`Selection::CAPACITY`] vertex ids.
///
/// The first id is the path start, the second the path end.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
	ids: Vec<String>,
}

impl Selection {
	/// Maximum number of selected vertices.
	pub const CAPACITY: usize = 2;

	/// Applies a click on vertex `id`.
	pub fn toggle(&mut self, id: &str) -> ClickOutcome {
		if let Some(pos) = self.ids.iter().position(|s| s == id) {
			self.ids.remove(pos);
			ClickOutcome::Deselected
		} else if self.ids.len() < Self::CAPACITY {
			self.ids.push(id.to_string());
			ClickOutcome::Selected
		} else {
			ClickOutcome::Rejected
		}
	}

	/// What [`Selection::toggle`] would do, without doing it.
	pub fn probe(&self, id: &str) -> ClickOutcome {
		if self.contains(id) {
			ClickOutcome::Deselected
		} else if self.ids.len() < Self::CAPACITY {
			ClickOutcome::Selected
		} else {
			ClickOutcome::Rejected
		}
	}

	pub fn contains(&self, id: &str) -> bool {
		self.ids.iter().any(|s| s == id)
	}

	/// `(start, end)` once two vertices are selected.
	pub fn endpoints(&self) -> Option<(&str, &str)> {
		match self.ids.as_slice() {
			[start, end] => Some((start, end)),
			_ => None,
		}
	}

	/// Selected ids in click order.
	pub fn ids(&self) -> &[String] {
		&self.ids
	}

	pub fn len(&self) -> usize {
		self.ids.len()
	}

	pub fn is_empty(&self) -> bool {
		self.ids.is_empty()
	}

	pub fn clear(&mut self) {
		self.ids.clear();
	}
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;

	use super::*;

	#[test]
	fn keeps_click_order() {
		let mut selection = Selection::default();
		assert_eq!(selection.toggle("b"), ClickOutcome::Selected);
		assert_eq!(selection.toggle("a"), ClickOutcome::Selected);
		assert_eq!(selection.endpoints(), Some(("b", "a")));
	}

	#[test]
	fn toggles_off() {
		let mut selection = Selection::default();
		selection.toggle("a");
		selection.toggle("b");
		assert_eq!(selection.toggle("a"), ClickOutcome::Deselected);
		assert_eq!(selection.ids(), ["b"]);
		assert_eq!(selection.endpoints(), None);
	}

	#[test]
	fn third_click_is_rejected() {
		let mut selection = Selection::default();
		selection.toggle("a");
		selection.toggle("b");
		let before = selection.clone();

		let outcome = selection.toggle("c");
		assert_eq!(outcome, ClickOutcome::Rejected);
		assert_eq!(outcome.notice(), Some(Notice::SelectionLimit));
		assert_eq!(selection, before);
	}

	#[test]
	fn probe_matches_toggle() {
		let mut selection = Selection::default();
		for id in ["a", "b", "c", "a", "c", "b"] {
			let expected = selection.probe(id);
			assert_eq!(selection.toggle(id), expected);
		}
	}

	proptest! {
		#[test]
		fn double_click_restores_selection(
			clicks in prop::collection::vec("[a-d]", 0..8),
			id in "[a-d]",
		) {
			let mut selection = Selection::default();
			for click in &clicks {
				selection.toggle(click);
			}
			let before = selection.clone();
			if selection.toggle(&id).changed() {
				selection.toggle(&id);
				prop_assert_eq!(selection.len(), before.len());
				prop_assert!(before.ids().iter().all(|s| selection.contains(s)));
			} else {
				prop_assert_eq!(&selection, &before);
			}
		}
	}
}
