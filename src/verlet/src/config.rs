use crate::V3;

// All tunables are fixed at construction, nothing is reconfigured at
// runtime. Coordinates are screen space: origin top left, y down,
// which is why gravity points toward positive y.
#[derive(Clone, Debug)]
pub struct ClothConfig {
	pub origin: V3,
	pub segment_length: f32,
	pub rows: usize,
	pub cols: usize,
	pub gravity: V3,
	pub mass: f32,
	pub iterations: usize,
	pub breaking_limit: f32,
	pub drag: f32,
	pub threshold: f32,
	pub tear_interval: f32,
}

impl Default for ClothConfig {
	fn default() -> Self {
		Self {
			origin: V3::new(500., 0., 0.),
			segment_length: 10.,
			rows: 70,
			cols: 100,
			gravity: V3::new(0., 981., 0.),
			mass: 1.,
			iterations: 10,
			breaking_limit: 20.,
			drag: 0.02,
			threshold: 10.,
			tear_interval: 1. / 60.,
		}
	}
}

impl ClothConfig {
	pub fn with_origin(mut self, origin: V3) -> Self {
		self.origin = origin;
		self
	}

	pub fn with_size(mut self, rows: usize, cols: usize) -> Self {
		self.rows = rows;
		self.cols = cols;
		self
	}

	pub fn with_segment_length(mut self, segment_length: f32) -> Self {
		self.segment_length = segment_length;
		self
	}

	pub fn with_gravity(mut self, gravity: V3) -> Self {
		self.gravity = gravity;
		self
	}

	pub fn with_iterations(mut self, iterations: usize) -> Self {
		self.iterations = iterations;
		self
	}

	pub fn with_breaking_limit(mut self, breaking_limit: f32) -> Self {
		self.breaking_limit = breaking_limit;
		self
	}

	pub fn with_drag(mut self, drag: f32) -> Self {
		self.drag = drag;
		self
	}

	pub fn with_threshold(mut self, threshold: f32) -> Self {
		self.threshold = threshold;
		self
	}
}
