pub mod config;
pub mod dynamics;
pub mod io;
pub mod physics;
pub mod sim;

pub use dynamics::state::{Params, ParticleState, Record};
pub use sim::error::SimError;

// Flat access to the integration entry points
pub mod integrator {
    pub use crate::sim::integrator::euler_step;
    pub use crate::sim::runner::{run, simulate, simulate_with, RecordSink, Trajectory};
}
