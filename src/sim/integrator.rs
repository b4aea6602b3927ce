use crate::dynamics::state::ParticleState;

// ---------------------------------------------------------------------------
// Semi-implicit Euler step
// ---------------------------------------------------------------------------

/// Advance `state` by one time step, in place.
///
/// Order matters and each line sees the values written by the previous one:
///   1. F = -k x
///   2. v += (F / m) h
///   3. x += v h          (new v, not the start-of-step one)
///   4. F = -k x          (reported force belongs to the new x)
pub fn euler_step(state: &mut ParticleState) {
    let h = state.params().time_step;
    let m = state.params().mass;

    state.compute_force();
    state.velocity = state.velocity + (state.force / m) * h;
    state.position = state.position + state.velocity * h;
    state.compute_force();
}
