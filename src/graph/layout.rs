//! Force-directed layout.
//!
//! A velocity-Verlet relaxation with three forces, applied in this order on
//! every tick:
//!
//! - many-body repulsion between every node pair,
//! - centering, which translates the whole layout so its mean sits at the
//!   viewport center,
//! - one spring per edge whose rest length grows linearly with its weight.
//!
//! The simulation cools: `alpha` decays geometrically towards
//! `alpha_target` and the simulation halts once it drops below `alpha_min`.

use std::f64::consts::PI;

use super::scale::LinearScale;
use super::types::{Bounds, Graph, Point};

/// Tuning knobs for [`Simulation`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutConfig {
	/// Many-body strength; negative repels.
	pub charge_strength: f64,
	/// Rest length of a zero-weight edge.
	pub base_distance: f64,
	/// Extra rest length per unit of the heaviest weight.
	pub weight_distance_multiplier: f64,
	/// Fraction of the centering offset applied per tick.
	pub center_strength: f64,
	/// Fraction of velocity lost per tick.
	pub velocity_decay: f64,
	/// The simulation halts below this alpha.
	pub alpha_min: f64,
	/// Per-tick approach rate of alpha towards its target.
	pub alpha_decay: f64,
	/// Alpha the simulation settles towards.
	pub alpha_target: f64,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		let alpha_min = 0.001;
		Self {
			charge_strength: -200.0,
			base_distance: 20.0,
			weight_distance_multiplier: 10.0,
			center_strength: 1.0,
			velocity_decay: 0.4,
			alpha_min,
			alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
			alpha_target: 0.0,
		}
	}
}

impl LayoutConfig {
	/// Scale from edge weight to spring rest length for `graph`.
	///
	/// Maps `[0, max_weight]` onto
	/// `[base_distance, base_distance + max_weight * weight_distance_multiplier]`
	/// where `max_weight` is floored at 1.
	pub fn distance_scale(&self, graph: &Graph) -> LinearScale {
		let max_weight = graph.max_weight();
		LinearScale::new(
			(0.0, max_weight),
			(
				self.base_distance,
				self.base_distance + max_weight * self.weight_distance_multiplier,
			),
		)
	}

	/// Spring rest length for every edge of `graph`, in edge order.
	pub fn rest_lengths(&self, graph: &Graph) -> Vec<f64> {
		let scale = self.distance_scale(graph);
		graph.edges().iter().map(|e| scale.apply(e.weight)).collect()
	}
}

/// Derived endpoints of one edge.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Segment {
	pub from: Point,
	pub to: Point,
}

/// Snapshot of the layout after a tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
	/// Node positions, in graph node order.
	pub nodes: Vec<Point>,
	/// Edge endpoints, in graph edge order.
	pub edges: Vec<Segment>,
	/// Simulation temperature when the frame was taken.
	pub alpha: f64,
}

#[derive(Clone, Copy, Debug, Default)]
struct Body {
	x: f64,
	y: f64,
	vx: f64,
	vy: f64,
}

#[derive(Clone, Copy, Debug)]
struct Spring {
	source: usize,
	target: usize,
	rest_length: f64,
	strength: f64,
	bias: f64,
}

/// Deterministic source for the tiny offsets that separate coincident nodes.
#[derive(Clone, Copy, Debug)]
struct Lcg(u32);

impl Lcg {
	const fn new() -> Self {
		Self(1)
	}

	fn next(&mut self) -> f64 {
		self.0 = self.0.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
		f64::from(self.0) / 4_294_967_296.0
	}

	fn jiggle(&mut self) -> f64 {
		(self.next() - 0.5) * 1e-6
	}
}

/// A running layout for one graph inside one viewport.
#[derive(Clone, Debug)]
pub struct Simulation {
	config: LayoutConfig,
	bodies: Vec<Body>,
	springs: Vec<Spring>,
	center: Point,
	alpha: f64,
	random: Lcg,
}

impl Simulation {
	/// Seeds a simulation from the node positions of `graph`.
	///
	/// Nodes without coordinates are placed on a phyllotaxis spiral.
	pub fn new(graph: &Graph, bounds: Bounds, config: LayoutConfig) -> Self {
		let bodies = graph
			.nodes()
			.iter()
			.enumerate()
			.map(|(i, node)| {
				let p = node.position().unwrap_or_else(|| spiral(i));
				Body {
					x: p.x,
					y: p.y,
					..Body::default()
				}
			})
			.collect::<Vec<_>>();

		let mut degree = vec![0usize; bodies.len()];
		for (source, target) in graph.edge_indices() {
			degree[source] += 1;
			degree[target] += 1;
		}

		let springs = graph
			.edge_indices()
			.zip(config.rest_lengths(graph))
			.map(|((source, target), rest_length)| {
				let (ds, dt) = (degree[source] as f64, degree[target] as f64);
				Spring {
					source,
					target,
					rest_length,
					strength: 1.0 / ds.min(dt),
					bias: ds / (ds + dt),
				}
			})
			.collect();

		Self {
			config,
			bodies,
			springs,
			center: bounds.center(),
			alpha: 1.0,
			random: Lcg::new(),
		}
	}

	/// Whether the simulation is still above `alpha_min`.
	pub fn is_running(&self) -> bool {
		self.alpha >= self.config.alpha_min
	}

	/// Advances one step. Returns `false` once the simulation has cooled,
	/// in which case nothing moved.
	pub fn tick(&mut self) -> bool {
		if !self.is_running() {
			return false;
		}
		self.alpha += (self.config.alpha_target - self.alpha) * self.config.alpha_decay;

		self.apply_charge();
		self.apply_center();
		self.apply_springs();

		let keep = 1.0 - self.config.velocity_decay;
		for body in &mut self.bodies {
			body.vx *= keep;
			body.vy *= keep;
			body.x += body.vx;
			body.y += body.vy;
		}
		true
	}

	pub fn positions(&self) -> Vec<Point> {
		self.bodies.iter().map(|b| Point::new(b.x, b.y)).collect()
	}

	/// Node positions plus derived edge endpoints.
	pub fn frame(&self) -> Frame {
		let nodes = self.positions();
		let edges = self
			.springs
			.iter()
			.map(|s| Segment {
				from: nodes.get(s.source).copied().unwrap_or_default(),
				to: nodes.get(s.target).copied().unwrap_or_default(),
			})
			.collect();
		Frame {
			nodes,
			edges,
			alpha: self.alpha,
		}
	}

	fn apply_charge(&mut self) {
		let strength = self.config.charge_strength * self.alpha;
		let n = self.bodies.len();
		for i in 0..n {
			for j in (i + 1)..n {
				let (a, b) = (self.bodies[i], self.bodies[j]);
				let mut dx = b.x - a.x;
				let mut dy = b.y - a.y;
				if dx == 0.0 {
					dx = self.random.jiggle();
				}
				if dy == 0.0 {
					dy = self.random.jiggle();
				}
				let mut l = dx * dx + dy * dy;
				if l < 1.0 {
					l = l.sqrt();
				}
				let w = strength / l;
				self.bodies[i].vx += dx * w;
				self.bodies[i].vy += dy * w;
				self.bodies[j].vx -= dx * w;
				self.bodies[j].vy -= dy * w;
			}
		}
	}

	fn apply_center(&mut self) {
		if self.bodies.is_empty() {
			return;
		}
		let n = self.bodies.len() as f64;
		let (sx, sy) = self
			.bodies
			.iter()
			.fold((0.0, 0.0), |(sx, sy), b| (sx + b.x, sy + b.y));
		let dx = (sx / n - self.center.x) * self.config.center_strength;
		let dy = (sy / n - self.center.y) * self.config.center_strength;
		for body in &mut self.bodies {
			body.x -= dx;
			body.y -= dy;
		}
	}

	fn apply_springs(&mut self) {
		for spring in &self.springs {
			let (Some(&source), Some(&target)) =
				(self.bodies.get(spring.source), self.bodies.get(spring.target))
			else {
				continue;
			};
			let mut x = target.x + target.vx - source.x - source.vx;
			let mut y = target.y + target.vy - source.y - source.vy;
			if x == 0.0 {
				x = self.random.jiggle();
			}
			if y == 0.0 {
				y = self.random.jiggle();
			}
			let length = x.hypot(y);
			let pull = (length - spring.rest_length) / length * self.alpha * spring.strength;
			let (x, y) = (x * pull, y * pull);

			if let Some(t) = self.bodies.get_mut(spring.target) {
				t.vx -= x * spring.bias;
				t.vy -= y * spring.bias;
			}
			if let Some(s) = self.bodies.get_mut(spring.source) {
				s.vx += x * (1.0 - spring.bias);
				s.vy += y * (1.0 - spring.bias);
			}
		}
	}
}

fn spiral(i: usize) -> Point {
	let radius = 10.0 * (0.5 + i as f64).sqrt();
	let angle = i as f64 * PI * (3.0 - 5f64.sqrt());
	Point::new(radius * angle.cos(), radius * angle.sin())
}
