use crate::config::ClothConfig;
use crate::particle::Particle;
use crate::V3;
use protocol::pr_model::PrModel;

// Rectangular lattice of particles, row major. Neighboring particles
// are implicitly constrained to segment_length: every cell owns the
// constraint to its left and to its up neighbor. Topology never grows
// after construction, particles only leave by being destroyed.
pub struct Cloth {
	particles: Vec<Particle>,
	rows: usize,
	cols: usize,
	pub segment_length: f32,
}

impl Cloth {
	pub fn new(config: &ClothConfig) -> Self {
		let mut particles = Vec::with_capacity(config.rows * config.cols);
		for r in 0..config.rows {
			let fixed = r == 0;
			for c in 0..config.cols {
				let pos = config.origin
					+ V3::new(
						config.segment_length * c as f32,
						config.segment_length * r as f32,
						0.,
					);
				particles.push(Particle::new(
					pos,
					config.gravity,
					config.mass,
					fixed,
				));
			}
		}
		Self {
			particles,
			rows: config.rows,
			cols: config.cols,
			segment_length: config.segment_length,
		}
	}

	pub fn rows(&self) -> usize {
		self.rows
	}

	pub fn cols(&self) -> usize {
		self.cols
	}

	pub fn at(&self, row: usize, col: usize) -> &Particle {
		&self.particles[row * self.cols + col]
	}

	pub fn at_mut(&mut self, row: usize, col: usize) -> &mut Particle {
		&mut self.particles[row * self.cols + col]
	}

	// Owner cell plus one of its left/up neighbors, borrowed together.
	// The neighbor must precede the owner in row-major order.
	pub(crate) fn pair_mut(
		&mut self,
		row: usize,
		col: usize,
		nrow: usize,
		ncol: usize,
	) -> (&mut Particle, &mut Particle) {
		let owner = row * self.cols + col;
		let neighbor = nrow * self.cols + ncol;
		let (head, tail) = self.particles.split_at_mut(owner);
		(&mut tail[0], &mut head[neighbor])
	}

	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	pub fn particles_mut(&mut self) -> &mut [Particle] {
		&mut self.particles
	}

	pub fn destroyed_len(&self) -> usize {
		self.particles.iter().filter(|p| p.destroyed).count()
	}

	pub fn pr_model(&self) -> PrModel {
		PrModel {
			rows: self.rows,
			cols: self.cols,
			particles: self.particles.iter().map(|p| p.render()).collect(),
		}
	}
}
