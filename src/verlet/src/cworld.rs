use std::sync::mpsc::{Receiver, Sender};
use std::time::SystemTime;

use tracing::{debug, info};

use crate::cloth::Cloth;
use crate::config::ClothConfig;
use crate::controller_message::ControllerMessage;
use crate::integrator;
use crate::interaction::Interaction;
use crate::solver::{self, PassOutcome};
use crate::time_manager::{TimeManager, TimeModel};
use protocol::pr_model::PrModel;
use protocol::user_event::{UpdateInfo, UserEvent};

pub struct CWorld {
	config: ClothConfig,
	cloth: Cloth,
	interaction: Interaction,
	time_manager: TimeManager,

	// -1: always play
	// 0: pause
	// n: play n frames
	forward_frames: i32,
}

impl Default for CWorld {
	fn default() -> Self {
		Self::new(ClothConfig::default())
	}
}

impl CWorld {
	pub fn new(config: ClothConfig) -> Self {
		info!(
			"create cloth {}x{}, segment {}",
			config.rows, config.cols, config.segment_length
		);
		let cloth = Cloth::new(&config);
		let interaction =
			Interaction::new(config.threshold, config.tear_interval);
		Self {
			config,
			cloth,
			interaction,
			time_manager: TimeManager::default(),
			forward_frames: -1,
		}
	}

	pub fn with_time_model(mut self, model: TimeModel) -> Self {
		self.time_manager = self.time_manager.with_model(model);
		self
	}

	pub fn with_paused(mut self) -> Self {
		self.forward_frames = 1; // provide first frame
		self
	}

	pub fn cloth(&self) -> &Cloth {
		&self.cloth
	}

	pub fn pft(&self) -> f32 {
		self.time_manager.pft()
	}

	// One frame: integrate, pin the grabbed particle to the pointer,
	// then run the relaxation passes. A pass that breaks a constraint
	// ends early; the remaining passes of the same frame continue.
	pub fn update(&mut self, dt: f32) {
		if dt == 0f32 {
			return;
		}
		integrator::advance(&mut self.cloth, dt, self.config.drag);
		self.interaction.apply_grab(&mut self.cloth);
		for _ in 0..self.config.iterations {
			if let PassOutcome::BrokeAt { row, col } = solver::relax(
				&mut self.cloth,
				self.config.breaking_limit,
				self.interaction.is_grabbing(),
			) {
				debug!("constraint broke at ({}, {})", row, col);
			}
		}
	}

	pub fn handle_message(&mut self, msg: ControllerMessage) {
		match msg {
			ControllerMessage::PointerMove(x, y) => {
				self.interaction.set_pointer(x, y, &mut self.cloth)
			}
			ControllerMessage::PrimaryPress(x, y) => {
				self.interaction.grab(x, y, &self.cloth)
			}
			ControllerMessage::PrimaryRelease => self.interaction.release(),
			ControllerMessage::SecondaryPress(x, y) => {
				self.interaction.set_tear_active(true);
				self.interaction.set_pointer(x, y, &mut self.cloth);
			}
			ControllerMessage::SecondaryRelease => {
				self.interaction.set_tear_active(false)
			}
			ControllerMessage::TogglePause => {
				if self.forward_frames == 0 {
					self.forward_frames = -1;
				} else {
					self.forward_frames = 0;
				}
				self.time_manager.set_paused(self.forward_frames == 0);
			}
			ControllerMessage::FrameForward => {
				if self.forward_frames == 0 {
					self.forward_frames += 1;
				}
			}
		}
	}

	pub fn pr_model(&self) -> PrModel {
		self.cloth.pr_model()
	}

	fn update_info(&self, load: f32) -> UpdateInfo {
		UpdateInfo {
			load,
			particle_len: self.cloth.rows() * self.cloth.cols(),
			destroyed_len: self.cloth.destroyed_len(),
		}
	}

	// Headless driver, mostly for benches.
	pub fn run(&mut self, frames: usize) {
		for _ in 0..frames {
			let dt = self.time_manager.take_time();
			self.update(dt);
		}
	}

	// Simulation-side pump: drain input, step, publish a snapshot.
	// Ends when the frontend drops its receiver.
	pub fn run_thread(
		&mut self,
		tx: Sender<UserEvent>,
		rx: Receiver<ControllerMessage>,
	) {
		loop {
			while let Ok(msg) = rx.try_recv() {
				self.handle_message(msg);
			}
			if self.forward_frames != 0 {
				if self.forward_frames > 0 {
					self.forward_frames -= 1;
				}
				let dt = self.time_manager.take_time();
				let frame_start = SystemTime::now();
				self.update(dt);
				let spent = SystemTime::now()
					.duration_since(frame_start)
					.unwrap()
					.as_secs_f32();
				let load = spent / self.time_manager.pft();
				let model = self.pr_model();
				let info = self.update_info(load);
				if tx.send(UserEvent::Update(model, info)).is_err() {
					debug!("frontend gone, stopping");
					return;
				}
			} else {
				std::thread::sleep(std::time::Duration::from_millis(10));
			}
		}
	}
}
