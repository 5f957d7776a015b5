use std::time::SystemTime;

use tracing::debug;

use crate::cloth::Cloth;
use crate::V3;

// Maps raw pointer coordinates onto the grid: grabbing (pin one
// particle to the pointer), dragging and the tear brush. Pointer x/y
// arrive in the same coordinate space the grid was built in; each
// particle keeps its own z, distances are measured against the pointer
// projected onto that z.
pub struct Interaction {
	grabbed: Option<(usize, usize)>,
	pointer: V3,
	tear_active: bool,
	last_tear: Option<SystemTime>,
	threshold: f32,
	tear_interval: f32,
}

impl Interaction {
	pub fn new(threshold: f32, tear_interval: f32) -> Self {
		Self {
			grabbed: None,
			pointer: V3::zeros(),
			tear_active: false,
			last_tear: None,
			threshold,
			tear_interval,
		}
	}

	// Row-major scan, first particle within threshold wins. No-op
	// while something is already held or when nothing is in range.
	pub fn grab(&mut self, x: f32, y: f32, cloth: &Cloth) {
		if self.grabbed.is_some() {
			return;
		}
		for r in 0..cloth.rows() {
			for c in 0..cloth.cols() {
				let p = cloth.at(r, c);
				if p.destroyed {
					continue;
				}
				let distance =
					(p.pos - V3::new(x, y, p.pos[2])).magnitude();
				if distance < self.threshold {
					self.grabbed = Some((r, c));
					self.pointer = V3::new(x, y, p.pos[2]);
					debug!("grab ({}, {})", r, c);
					return;
				}
			}
		}
	}

	pub fn release(&mut self) {
		if self.grabbed.take().is_some() {
			debug!("release");
		}
	}

	pub fn set_pointer(&mut self, x: f32, y: f32, cloth: &mut Cloth) {
		self.pointer = V3::new(x, y, self.pointer[2]);
		if let Some((r, c)) = self.grabbed {
			self.pointer[2] = cloth.at(r, c).pos[2];
		}
		if self.tear_active {
			self.tear(x, y, cloth);
		}
	}

	pub fn set_tear_active(&mut self, on: bool) {
		self.tear_active = on;
	}

	// The grabbed particle follows the pointer unconditionally, fixed
	// particles included; this runs after integration each frame.
	pub fn apply_grab(&self, cloth: &mut Cloth) {
		if let Some((r, c)) = self.grabbed {
			cloth.at_mut(r, c).pos = self.pointer;
		}
	}

	pub fn is_grabbing(&self) -> bool {
		self.grabbed.is_some()
	}

	pub fn grabbed(&self) -> Option<(usize, usize)> {
		self.grabbed
	}

	pub fn pointer(&self) -> V3 {
		self.pointer
	}

	fn tear(&mut self, x: f32, y: f32, cloth: &mut Cloth) {
		let now = SystemTime::now();
		if let Some(last) = self.last_tear {
			let since =
				now.duration_since(last).unwrap().as_secs_f32();
			if since < self.tear_interval {
				return;
			}
		}
		self.last_tear = Some(now);
		debug!("tear brush at ({}, {})", x, y);
		for r in 0..cloth.rows() {
			for c in 0..cloth.cols() {
				let p = cloth.at_mut(r, c);
				let distance =
					(p.pos - V3::new(x, y, p.pos[2])).magnitude();
				if distance < self.threshold {
					p.destroy();
				}
			}
		}
	}
}
