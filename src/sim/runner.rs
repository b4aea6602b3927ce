use log::{debug, info, warn};

use crate::dynamics::state::{Params, ParticleState, Record};
use crate::physics::spring;
use crate::sim::error::SimError;

/// Sample count per natural period below which the run is flagged as coarse.
const MIN_SAMPLES_PER_PERIOD: f64 = 20.0;

/// Planned step count above which a run is flagged as likely unintended.
const MAX_PLANNED_STEPS: usize = 1_000_000_000;

// ---------------------------------------------------------------------------
// Record sinks
// ---------------------------------------------------------------------------

/// Consumer of per-step records, fed in chronological order.
pub trait RecordSink {
    fn accept(&mut self, record: &Record);
}

impl RecordSink for Vec<Record> {
    fn accept(&mut self, record: &Record) {
        self.push(*record);
    }
}

// ---------------------------------------------------------------------------
// Lazy trajectory
// ---------------------------------------------------------------------------

/// Iterator over the records of one run. Finite, fused, not restartable.
#[derive(Debug)]
pub struct Trajectory {
    state: ParticleState,
    step: usize,
    total: usize,
    done: bool,
}

impl Trajectory {
    /// Steps taken so far.
    pub fn steps_taken(&self) -> usize {
        self.step
    }

    /// Steps the run will take if nothing blows up.
    pub fn total_steps(&self) -> usize {
        self.total
    }

    /// Current particle state.
    pub fn state(&self) -> &ParticleState {
        &self.state
    }
}

impl Iterator for Trajectory {
    type Item = Result<Record, SimError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.step >= self.total {
            self.done = true;
            return None;
        }

        self.state.step();
        self.step += 1;
        let time = self.step as f64 * self.state.params().time_step;

        if !self.state.is_finite() {
            self.done = true;
            return Some(Err(SimError::NonFiniteResult {
                last_valid_step: self.step - 1,
                time,
            }));
        }

        Some(Ok(self.state.record(time)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            (0, Some(0))
        } else {
            (0, Some(self.total - self.step))
        }
    }
}

impl std::iter::FusedIterator for Trajectory {}

/// Start stepping `state` from wherever it currently is.
///
/// The first record comes after the first step, at t = h. Records are produced
/// for floor(T / h) steps.
pub fn run(state: ParticleState) -> Trajectory {
    let total = state.params().step_count();
    Trajectory {
        state,
        step: 0,
        total,
        done: false,
    }
}

// ---------------------------------------------------------------------------
// Whole-run drivers
// ---------------------------------------------------------------------------

/// Validate, run to completion and collect every record.
/// Nothing is returned unless the whole run stays finite.
pub fn simulate(params: &Params) -> Result<Vec<Record>, SimError> {
    let mut records = Vec::with_capacity(params.step_count().min(1_000_000));
    simulate_with(params, &mut records)?;
    Ok(records)
}

/// Validate, then stream each record into `sink`. Returns the number of steps.
pub fn simulate_with(params: &Params, sink: &mut dyn RecordSink) -> Result<usize, SimError> {
    let state = ParticleState::new(*params)?;
    check_resolution(params);

    let mut trajectory = run(state);
    debug!("integrating {} steps", trajectory.total_steps());

    for record in trajectory.by_ref() {
        sink.accept(&record?);
    }

    let s = trajectory.state();
    info!(
        "finished {} steps: x = {:.6}, v = {:.6}, F = {:.6}",
        trajectory.steps_taken(),
        s.position,
        s.velocity,
        s.force
    );
    Ok(trajectory.steps_taken())
}

/// True when the run would take an unreasonable number of steps.
fn exceeds_step_budget(params: &Params) -> bool {
    params.step_count() > MAX_PLANNED_STEPS
}

/// Warn when the step is large compared to the oscillation, or the run is huge.
fn check_resolution(params: &Params) {
    debug!("parameters: {:?}", params);
    if exceeds_step_budget(params) {
        warn!(
            "interval {} / step {} plans {} steps (more than {}); the run may not finish",
            params.time_interval,
            params.time_step,
            params.step_count(),
            MAX_PLANNED_STEPS
        );
    }
    let (m, k, h) = (params.mass, params.spring_constant, params.time_step);

    if let Some(limit) = spring::stability_limit(m, k) {
        if h >= limit {
            warn!(
                "time step {} is at or beyond the stability limit {:.6}; expect blow-up",
                h, limit
            );
            return;
        }
    }
    if let Some(period) = spring::natural_period(m, k) {
        if h * MIN_SAMPLES_PER_PERIOD > period {
            warn!(
                "time step {} resolves the period {:.6} with fewer than {} samples",
                h, period, MIN_SAMPLES_PER_PERIOD
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn unit_spring(h: f64, t: f64) -> Params {
        Params {
            initial_position: 1.0,
            initial_velocity: 0.0,
            time_step: h,
            time_interval: t,
            mass: 1.0,
            spring_constant: 1.0,
        }
    }

    fn energy(p: &Params, r: &Record) -> f64 {
        0.5 * p.mass * r.velocity * r.velocity + 0.5 * p.spring_constant * r.position * r.position
    }

    #[test]
    fn rest_stays_at_rest() {
        let p = Params {
            initial_position: 0.0,
            ..unit_spring(0.05, 5.0)
        };
        for k in [0.5, 1.0, 30.0] {
            let p = Params {
                spring_constant: k,
                mass: 2.0,
                ..p
            };
            let traj = simulate(&p).unwrap();
            assert_eq!(traj.len(), 100);
            for r in &traj {
                assert_eq!(r.position, 0.0);
                assert_eq!(r.velocity, 0.0);
                assert_eq!(r.force, 0.0);
            }
        }
    }

    #[test]
    fn yields_one_record_per_step() {
        for (n, h) in [(1usize, 0.1), (3, 0.1), (10, 0.1), (250, 0.01), (7, 0.37)] {
            let p = unit_spring(h, n as f64 * h);
            let traj = simulate(&p).unwrap();
            assert_eq!(traj.len(), n, "h = {}, N = {}", h, n);
            for (i, r) in traj.iter().enumerate() {
                assert_eq!(r.time, (i + 1) as f64 * h);
            }
        }
    }

    #[test]
    fn first_record_is_after_first_step() {
        let traj = simulate(&unit_spring(0.1, 1.0)).unwrap();
        let first = traj[0];
        assert_eq!(first.time, 0.1);
        assert_relative_eq!(first.force, -0.99);
        assert_relative_eq!(first.position, 0.99);
        assert_relative_eq!(first.velocity, -0.1);
    }

    #[test]
    fn energy_drift_is_small() {
        let period = 2.0 * PI;
        let h = period / 1000.0;
        let p = unit_spring(h, 3.0 * period);
        let e0 = 0.5 * p.spring_constant * p.initial_position.powi(2);
        let traj = simulate(&p).unwrap();
        assert!(traj.len() >= 2999);
        for r in &traj {
            let drift = (energy(&p, r) - e0).abs() / e0;
            assert!(drift < 0.05, "energy drift {:.4} at t={:.3}", drift, r.time);
        }
    }

    #[test]
    fn oscillates_through_equilibrium() {
        let period = 2.0 * PI;
        let traj = simulate(&unit_spring(period / 2000.0, period)).unwrap();
        let min_x = traj.iter().map(|r| r.position).fold(f64::INFINITY, f64::min);
        assert!(min_x < -0.99, "should swing to the far side, min x = {}", min_x);
        let last = traj.last().unwrap();
        assert!((last.position - 1.0).abs() < 0.01);
    }

    #[test]
    fn runs_are_bit_identical() {
        let p = Params {
            initial_position: 0.3,
            initial_velocity: -1.2,
            time_step: 0.003,
            time_interval: 4.0,
            mass: 0.8,
            spring_constant: 7.5,
        };
        let a = simulate(&p).unwrap();
        let b = simulate(&p).unwrap();
        assert_eq!(a.len(), b.len());
        for (ra, rb) in a.iter().zip(&b) {
            assert_eq!(ra.time.to_bits(), rb.time.to_bits());
            assert_eq!(ra.force.to_bits(), rb.force.to_bits());
            assert_eq!(ra.position.to_bits(), rb.position.to_bits());
            assert_eq!(ra.velocity.to_bits(), rb.velocity.to_bits());
        }
    }

    #[test]
    fn invalid_params_fail_before_stepping() {
        let mut sink: Vec<Record> = Vec::new();
        let p = Params {
            mass: 0.0,
            ..unit_spring(0.1, 1.0)
        };
        assert!(matches!(simulate_with(&p, &mut sink), Err(SimError::InvalidMass { .. })));
        let p = unit_spring(0.0, 1.0);
        assert!(matches!(simulate_with(&p, &mut sink), Err(SimError::InvalidTimeStep { .. })));
        let p = unit_spring(0.1, 0.05);
        assert!(matches!(simulate_with(&p, &mut sink), Err(SimError::InvalidInterval { .. })));
        assert!(sink.is_empty());
    }

    #[test]
    fn blow_up_reports_last_valid_step() {
        // Anti-restoring spring with a huge step overflows within a few hundred steps.
        let p = Params {
            initial_position: 1.0,
            initial_velocity: 0.0,
            time_step: 10.0,
            time_interval: 1.0e5,
            mass: 1.0,
            spring_constant: -1.0e3,
        };
        let mut sink: Vec<Record> = Vec::new();
        match simulate_with(&p, &mut sink) {
            Err(SimError::NonFiniteResult { last_valid_step, time }) => {
                assert_eq!(last_valid_step, sink.len());
                assert_eq!(time, (last_valid_step + 1) as f64 * p.time_step);
            }
            other => panic!("expected NonFiniteResult, got {:?}", other),
        }
        assert!(simulate(&p).is_err());
    }

    #[test]
    fn huge_runs_exceed_step_budget() {
        assert!(!exceeds_step_budget(&unit_spring(0.01, 20.0)));
        assert!(exceeds_step_budget(&unit_spring(1.0e-20, 1.0e20)));
        let p = unit_spring(1.0e-20, 1.0e20);
        let traj = run(ParticleState::new(p).unwrap());
        assert_eq!(traj.total_steps(), usize::MAX);
    }

    #[test]
    fn trajectory_is_lazy_and_fused() {
        let state = ParticleState::new(unit_spring(0.5, 1.0)).unwrap();
        let mut traj = run(state);
        assert_eq!(traj.total_steps(), 2);
        assert_eq!(traj.steps_taken(), 0);
        assert!(traj.next().unwrap().is_ok());
        assert_eq!(traj.steps_taken(), 1);
        assert!(traj.next().unwrap().is_ok());
        assert!(traj.next().is_none());
        assert!(traj.next().is_none());
        assert_eq!(traj.steps_taken(), 2);
    }

    #[test]
    fn run_after_reset_repeats_sequence() {
        let p = unit_spring(0.1, 2.0);
        let mut state = ParticleState::new(p).unwrap();
        let first: Vec<Record> = run(state.clone()).map(|r| r.unwrap()).collect();
        for _ in 0..5 {
            state.step();
        }
        state.reset_to_initial();
        let second: Vec<Record> = run(state).map(|r| r.unwrap()).collect();
        assert_eq!(first, second);
    }
}
