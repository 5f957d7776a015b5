// Verlet sweep over the whole grid, one step of
//   pos += (1 - drag) * (pos - ppos) + dt^2 * mass * accel
// per free particle. dt comes in as raw wall-clock time and is never
// clamped: one stalled frame yields one oversized, possibly unstable
// step. Destroyed particles still integrate, they are only excluded
// from constraints, picking and rendering, so torn shreds keep
// falling.

use crate::cloth::Cloth;

// Particles are independent here, so the sweep may run in parallel
// without changing results; the solver must not (Gauss-Seidel).
#[cfg(not(debug_assertions))]
pub fn advance(cloth: &mut Cloth, dt: f32, drag: f32) {
	use rayon::prelude::*;
	cloth
		.particles_mut()
		.par_iter_mut()
		.for_each(|p| p.update(dt, drag));
}

#[cfg(debug_assertions)]
pub fn advance(cloth: &mut Cloth, dt: f32, drag: f32) {
	for p in cloth.particles_mut() {
		p.update(dt, drag);
	}
}
