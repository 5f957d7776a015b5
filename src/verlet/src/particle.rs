use crate::V3;
use protocol::pr_model::PrParticle;

#[derive(Clone, Debug)]
pub struct Particle {
	pub pos: V3,
	pub ppos: V3,
	pub accel: V3,
	pub mass: f32,
	pub fixed: bool,
	pub destroyed: bool,
}

impl Particle {
	pub fn new(pos: V3, accel: V3, mass: f32, fixed: bool) -> Self {
		Self {
			pos,
			ppos: pos,
			accel,
			mass,
			fixed,
			destroyed: false,
		}
	}

	// Verlet step; velocity is implicit in pos - ppos.
	pub fn update(&mut self, dt: f32, drag: f32) {
		if self.fixed {
			return;
		}
		let ppos = self.pos;
		self.pos += (1. - drag) * (self.pos - self.ppos)
			+ dt * dt * self.mass * self.accel;
		self.ppos = ppos;
	}

	pub fn velocity(&self) -> V3 {
		self.pos - self.ppos
	}

	// destroyed is monotonic, there is no way back
	pub fn destroy(&mut self) {
		self.destroyed = true;
	}

	pub fn render(&self) -> PrParticle {
		PrParticle {
			pos: [self.pos[0], self.pos[1], self.pos[2]],
			destroyed: self.destroyed,
		}
	}
}
