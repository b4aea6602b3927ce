pub mod state;

pub use state::{Params, ParticleState, Record};
