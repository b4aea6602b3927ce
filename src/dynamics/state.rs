use nalgebra::Vector2;

use crate::physics::spring;
use crate::sim::error::SimError;

/// ULPs within which `time_interval / time_step` snaps to the nearest integer,
/// so an interval of exactly `N * h` in floating point still gives N steps.
pub const STEP_COUNT_ULPS: f64 = 4.0;

// ---------------------------------------------------------------------------
// Input parameters
// ---------------------------------------------------------------------------

/// The six scalar inputs of a run, in acquisition order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Params {
    pub initial_position: f64, // x0
    pub initial_velocity: f64, // v0
    pub time_step: f64,        // h
    pub time_interval: f64,    // T
    pub mass: f64,             // m
    pub spring_constant: f64,  // k
}

impl Params {
    /// Check the static parameters. Runs before any step is taken.
    pub fn validate(&self) -> Result<(), SimError> {
        if !self.time_step.is_finite() || self.time_step <= 0.0 {
            return Err(SimError::InvalidTimeStep {
                time_step: self.time_step,
            });
        }
        if !self.time_interval.is_finite() || self.time_interval < self.time_step {
            return Err(SimError::InvalidInterval {
                time_interval: self.time_interval,
                time_step: self.time_step,
            });
        }
        if !self.mass.is_finite() || self.mass == 0.0 {
            return Err(SimError::InvalidMass { mass: self.mass });
        }
        let others = [
            ("initial_position", self.initial_position),
            ("initial_velocity", self.initial_velocity),
            ("spring_constant", self.spring_constant),
        ];
        for (name, value) in others {
            if !value.is_finite() {
                return Err(SimError::NonFiniteInput { name, value });
            }
        }
        Ok(())
    }

    /// Number of steps in a run: floor(T / h).
    pub fn step_count(&self) -> usize {
        let ratio = self.time_interval / self.time_step;
        let nearest = ratio.round();
        if (ratio - nearest).abs() <= nearest * STEP_COUNT_ULPS * f64::EPSILON {
            nearest as usize
        } else {
            ratio.floor() as usize
        }
    }
}

// ---------------------------------------------------------------------------
// Particle state
// ---------------------------------------------------------------------------

/// A single particle on a spring. Only constructible from valid parameters.
#[derive(Debug, Clone)]
pub struct ParticleState {
    params: Params,
    pub position: f64, // x
    pub velocity: f64, // v
    pub force: f64,    // cached -k x
}

impl ParticleState {
    /// Validate `params` and reset the particle to its initial conditions.
    pub fn new(params: Params) -> Result<Self, SimError> {
        params.validate()?;
        let mut state = ParticleState {
            params,
            position: 0.0,
            velocity: 0.0,
            force: 0.0,
        };
        state.reset_to_initial();
        Ok(state)
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Put the particle back at (x0, v0).
    pub fn reset_to_initial(&mut self) {
        self.position = self.params.initial_position;
        self.velocity = self.params.initial_velocity;
        self.compute_force();
    }

    /// Refresh the cached force from the current position and return it.
    pub fn compute_force(&mut self) -> f64 {
        self.force = spring::restoring_force(self.params.spring_constant, self.position);
        self.force
    }

    /// Advance one semi-implicit Euler step.
    pub fn step(&mut self) {
        crate::sim::integrator::euler_step(self);
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite() && self.force.is_finite()
    }

    /// Snapshot of the current state tagged with `time`.
    pub fn record(&self, time: f64) -> Record {
        Record {
            time,
            force: self.force,
            position: self.position,
            velocity: self.velocity,
        }
    }
}

// ---------------------------------------------------------------------------
// Per-step output record
// ---------------------------------------------------------------------------

/// State after one completed step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Record {
    pub time: f64,     // i * h
    pub force: f64,    // -k x at the new position
    pub position: f64,
    pub velocity: f64,
}

impl Record {
    /// (x, v) point for phase-space plots.
    pub fn phase_point(&self) -> Vector2<f64> {
        Vector2::new(self.position, self.velocity)
    }
}
