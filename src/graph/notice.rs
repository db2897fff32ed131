//! Interruptive user-facing notices.

use std::fmt;

/// Something the user must be told about.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
	/// The uploaded file could not be parsed.
	ParseFailed(String),
	/// A third vertex was clicked while two are selected.
	SelectionLimit,
	/// The shortest-path oracle failed.
	OracleFailed(String),
}

impl fmt::Display for Notice {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::ParseFailed(msg) => write!(f, "Error parsing file: {msg}"),
			Self::SelectionLimit => write!(f, "You can select at most 2 nodes"),
			Self::OracleFailed(msg) => write!(f, "Could not compute the shortest path: {msg}"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn notice_display() {
		assert_eq!(
			Notice::ParseFailed("Invalid number for Number of nodes: x".into()).to_string(),
			"Error parsing file: Invalid number for Number of nodes: x"
		);
		assert!(Notice::SelectionLimit.to_string().contains("at most 2"));
	}
}
