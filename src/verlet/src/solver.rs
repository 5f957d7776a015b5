// One relaxation pass over the implicit distance constraints
// (Jakobsen-style position corrections). Corrections are applied in
// place, so within a pass every constraint sees the moves of the
// constraints processed before it; the scan order (row major, left
// constraint before up constraint) is part of the contract.

use crate::cloth::Cloth;

const DIST_EPS: f32 = 1e-6;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PassOutcome {
	Completed,
	// the pass stopped early at the first over-extended constraint;
	// later passes pick up any that remain
	BrokeAt { row: usize, col: usize },
}

pub fn relax(
	cloth: &mut Cloth,
	breaking_limit: f32,
	grab_active: bool,
) -> PassOutcome {
	for r in 0..cloth.rows() {
		for c in 0..cloth.cols() {
			if cloth.at(r, c).fixed || cloth.at(r, c).destroyed {
				continue;
			}
			if c > 0
				&& !cloth.at(r, c - 1).destroyed
				&& satisfy(cloth, r, c, r, c - 1, breaking_limit, grab_active)
			{
				return PassOutcome::BrokeAt { row: r, col: c };
			}
			if r > 0
				&& !cloth.at(r - 1, c).destroyed
				&& satisfy(cloth, r, c, r - 1, c, breaking_limit, grab_active)
			{
				return PassOutcome::BrokeAt { row: r, col: c };
			}
		}
	}
	PassOutcome::Completed
}

// Returns true if the constraint broke.
fn satisfy(
	cloth: &mut Cloth,
	row: usize,
	col: usize,
	nrow: usize,
	ncol: usize,
	breaking_limit: f32,
	grab_active: bool,
) -> bool {
	let segment_length = cloth.segment_length;
	let (p, n) = cloth.pair_mut(row, col, nrow, ncol);
	let delta = p.pos - n.pos;
	let distance = delta.magnitude();
	// while the user drags a particle the cloth may stretch without
	// limit, breaking is suppressed entirely
	if !grab_active && distance / segment_length > breaking_limit {
		p.destroy();
		n.destroy();
		return true;
	}
	if distance <= DIST_EPS {
		// coincident endpoints, no direction to correct along
		return false;
	}
	let difference = (distance - segment_length) / distance;
	if n.fixed {
		p.pos -= delta * difference;
	} else {
		p.pos -= delta * difference * 0.5;
		n.pos += delta * difference * 0.5;
	}
	false
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::config::ClothConfig;
	use crate::V3;
	use proptest::prelude::*;

	fn chain(rows: usize) -> Cloth {
		Cloth::new(
			&ClothConfig::default()
				.with_origin(V3::zeros())
				.with_size(rows, 1),
		)
	}

	// 3x1 column with the anchor destroyed leaves a single free-free
	// constraint between rows 1 and 2
	fn free_pair(separation: f32) -> Cloth {
		let mut cloth = chain(3);
		cloth.at_mut(0, 0).destroy();
		cloth.at_mut(1, 0).pos = V3::new(0., 10., 0.);
		cloth.at_mut(2, 0).pos = V3::new(0., 10. + separation, 0.);
		cloth
	}

	fn pair_distance(cloth: &Cloth) -> f32 {
		(cloth.at(2, 0).pos - cloth.at(1, 0).pos).magnitude()
	}

	#[test]
	fn stretched_chain_relaxes_toward_rest() {
		let mut cloth = chain(4);
		for r in 1..4 {
			cloth.at_mut(r, 0).pos = V3::new(0., 30. * r as f32, 0.);
		}
		let residual = |cloth: &Cloth| -> f32 {
			(1..4)
				.map(|r| {
					let d = (cloth.at(r, 0).pos - cloth.at(r - 1, 0).pos)
						.magnitude();
					(d - 10.).abs()
				})
				.sum()
		};
		let mut last = residual(&cloth);
		for _ in 0..50 {
			assert_eq!(relax(&mut cloth, 20., false), PassOutcome::Completed);
			let next = residual(&cloth);
			assert!(next <= last + 1e-4);
			last = next;
		}
		assert!(last < 0.05);
	}

	#[test]
	fn fixed_neighbor_takes_no_correction() {
		let mut cloth = chain(2);
		cloth.at_mut(1, 0).pos = V3::new(0., 15., 0.);
		relax(&mut cloth, 20., false);
		assert_eq!(cloth.at(0, 0).pos, V3::zeros());
		// owner takes the full correction back to rest length
		assert!((cloth.at(1, 0).pos[1] - 10.).abs() < 1e-4);
	}

	#[test]
	fn breaking_ratio_is_sharp() {
		// ratio 21 > 20 breaks in a single pass
		let mut cloth = chain(2);
		cloth.at_mut(1, 0).pos = V3::new(0., 210., 0.);
		assert_eq!(
			relax(&mut cloth, 20., false),
			PassOutcome::BrokeAt { row: 1, col: 0 }
		);
		assert!(cloth.at(1, 0).destroyed);
		assert!(cloth.at(0, 0).destroyed);

		// ratio 19 never breaks, no matter how many passes
		let mut cloth = chain(2);
		cloth.at_mut(1, 0).pos = V3::new(0., 190., 0.);
		for _ in 0..100 {
			assert_eq!(relax(&mut cloth, 20., false), PassOutcome::Completed);
		}
		assert_eq!(cloth.destroyed_len(), 0);
		assert!((cloth.at(1, 0).pos[1] - 10.).abs() < 1e-3);
	}

	#[test]
	fn one_break_aborts_the_pass() {
		let config = ClothConfig::default()
			.with_origin(V3::zeros())
			.with_size(2, 3);
		let mut cloth = Cloth::new(&config);
		// two over-extended up constraints in one pass
		cloth.at_mut(1, 0).pos[1] += 300.;
		cloth.at_mut(1, 2).pos[1] += 300.;
		assert_eq!(
			relax(&mut cloth, 20., false),
			PassOutcome::BrokeAt { row: 1, col: 0 }
		);
		// the pass stopped before reaching (1, 2)
		assert!(cloth.at(1, 0).destroyed);
		assert!(cloth.at(0, 0).destroyed);
		assert!(!cloth.at(1, 2).destroyed);
		// the next pass catches it
		match relax(&mut cloth, 20., false) {
			PassOutcome::BrokeAt { row: 1, .. } => {}
			outcome => panic!("expected a second break, got {:?}", outcome),
		}
		assert!(cloth.at(1, 2).destroyed);
	}

	#[test]
	fn grab_suppresses_breaking() {
		let mut cloth = chain(2);
		cloth.at_mut(1, 0).pos = V3::new(0., 500., 0.);
		for _ in 0..10 {
			assert_eq!(relax(&mut cloth, 20., true), PassOutcome::Completed);
		}
		assert_eq!(cloth.destroyed_len(), 0);
	}

	#[test]
	fn coincident_particles_stay_finite() {
		let mut cloth = free_pair(0.);
		let overlap = cloth.at(1, 0).pos;
		cloth.at_mut(2, 0).pos = overlap;
		relax(&mut cloth, 20., false);
		assert!(cloth.at(1, 0).pos.iter().all(|x| x.is_finite()));
		assert!(cloth.at(2, 0).pos.iter().all(|x| x.is_finite()));
		assert_eq!(cloth.at(1, 0).pos, cloth.at(2, 0).pos);
	}

	#[test]
	fn destroyed_neighbor_is_skipped() {
		let mut cloth = free_pair(50.);
		cloth.at_mut(1, 0).destroy();
		let before = cloth.at(2, 0).pos;
		relax(&mut cloth, 20., false);
		assert_eq!(cloth.at(2, 0).pos, before);
	}

	proptest! {
		#[test]
		fn free_pair_restores_rest_length(separation in 0.5f32..190.) {
			let mut cloth = free_pair(separation);
			let before = (pair_distance(&cloth) - 10.).abs();
			prop_assert_eq!(
				relax(&mut cloth, 20., false),
				PassOutcome::Completed
			);
			let after = (pair_distance(&cloth) - 10.).abs();
			prop_assert!(after <= before + 1e-3);
			prop_assert!(after < 1e-2);
		}
	}
}
