use std::time::SystemTime;

pub enum TimeModel {
	// fixed pft steps, for benches and offline runs
	FixedStep,
	// sleep toward the frame budget, then report the true elapsed
	// wall-clock time
	RtFrameLock,
}

pub struct TimeManager {
	pft: f32,
	model: TimeModel,
	pause_start: Option<SystemTime>,
	start_time: SystemTime,
	total_pause: u128,
}

impl Default for TimeManager {
	fn default() -> Self {
		Self {
			pft: 1. / 60.,
			model: TimeModel::RtFrameLock,
			pause_start: None,
			start_time: SystemTime::now(),
			total_pause: 0,
		}
	}
}

impl TimeManager {
	pub fn with_model(mut self, model: TimeModel) -> Self {
		self.model = model;
		self
	}

	pub fn with_pft(mut self, pft: f32) -> Self {
		self.pft = pft;
		self
	}

	pub fn pft(&self) -> f32 {
		self.pft
	}

	pub fn set_paused(&mut self, paused: bool) {
		if paused == self.pause_start.is_some() {
			return;
		}
		if paused {
			self.pause_start = Some(SystemTime::now());
		} else {
			let pause_time = SystemTime::now()
				.duration_since(self.pause_start.take().unwrap())
				.unwrap()
				.as_micros();
			self.total_pause += pause_time;
		}
	}

	pub fn take_time(&mut self) -> f32 {
		match self.model {
			TimeModel::FixedStep => self.pft,
			TimeModel::RtFrameLock => {
				if self.pause_start.is_some() {
					// single-stepped while paused
					return self.pft;
				}
				let budget = (self.pft * 1e6) as u128;
				let passed = SystemTime::now()
					.duration_since(self.start_time)
					.unwrap()
					.as_micros()
					.saturating_sub(self.total_pause);
				if passed < budget {
					std::thread::sleep(std::time::Duration::from_micros(
						(budget - passed) as u64,
					));
				}
				// report what really elapsed, never clamped: one
				// stalled frame shows up as one oversized step
				let now = SystemTime::now();
				let dt = now
					.duration_since(self.start_time)
					.unwrap()
					.as_micros()
					.saturating_sub(self.total_pause);
				self.start_time = now;
				self.total_pause = 0;
				dt as f32 / 1e6
			}
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn fixed_step_is_deterministic() {
		let mut tm = TimeManager::default()
			.with_model(TimeModel::FixedStep)
			.with_pft(0.005);
		assert_eq!(tm.take_time(), 0.005);
		assert_eq!(tm.take_time(), 0.005);
	}

	#[test]
	fn frame_lock_reports_at_least_the_budget() {
		let mut tm = TimeManager::default()
			.with_model(TimeModel::RtFrameLock)
			.with_pft(0.002);
		let dt = tm.take_time();
		assert!(dt >= 0.002);
		// a real stall is reported as-is
		std::thread::sleep(std::time::Duration::from_millis(10));
		let dt = tm.take_time();
		assert!(dt >= 0.009);
	}

	#[test]
	fn paused_time_is_excluded() {
		let mut tm = TimeManager::default()
			.with_model(TimeModel::RtFrameLock)
			.with_pft(0.001);
		tm.take_time();
		tm.set_paused(true);
		std::thread::sleep(std::time::Duration::from_millis(20));
		tm.set_paused(false);
		let dt = tm.take_time();
		assert!(dt < 0.02);
	}
}
