pub mod error;
pub mod integrator;
pub mod runner;

pub use error::SimError;
pub use integrator::euler_step;
pub use runner::{run, simulate, simulate_with, RecordSink, Trajectory};
