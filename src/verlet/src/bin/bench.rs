use std::time::SystemTime;
use verlet::config::ClothConfig;
use verlet::cworld::CWorld;
use verlet::time_manager::TimeModel;

fn main() {
	tracing_subscriber::fmt::init();
	let start = SystemTime::now();
	let mut cworld =
		CWorld::new(ClothConfig::default()).with_time_model(TimeModel::FixedStep);
	let rframes = 600;
	cworld.run(rframes);
	let time = rframes as f32 * cworld.pft();
	let duration = SystemTime::now().duration_since(start).unwrap().as_micros();
	eprintln!("{:.3}%", duration as f32 / time / 1e4);
}
