pub mod cloth;
pub mod config;
pub mod controller_message;
pub mod cworld;
pub mod integrator;
pub mod interaction;
pub mod particle;
pub mod solver;
pub mod time_manager;

pub type V3 = nalgebra::Vector3<f32>;
