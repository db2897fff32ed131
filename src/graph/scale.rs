//! Linear mapping between a numeric domain and range.

/// Maps `domain` onto `range` linearly. Values outside the domain are
/// extrapolated, not clamped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
	domain: (f64, f64),
	range: (f64, f64),
}

impl LinearScale {
	pub const fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
		Self { domain, range }
	}

	/// Maps `value` from the domain into the range.
	///
	/// A zero-width domain maps everything to the range midpoint.
	pub fn apply(&self, value: f64) -> f64 {
		let (d0, d1) = self.domain;
		let (r0, r1) = self.range;
		let span = d1 - d0;
		if span == 0.0 {
			return (r0 + r1) / 2.0;
		}
		r0 + (value - d0) / span * (r1 - r0)
	}
}
